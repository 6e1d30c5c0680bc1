//! Live tests for recurring budget items.

mod common;

use chrono::Days;
use rust_decimal_macros::dec;
use serde_json::json;
use tallyguard_client::RECURRING_TABLE;
use tallyguard_core::fixtures::generator::today;
use tallyguard_core::{
    Frequency, RecurringOverrides, RecurringTransactionRecord, TestDataFactory, compare_records,
};

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_create_valid_recurring_transaction() {
    let admin = common::admin();
    let owner = common::unique_owner();
    let mut factory = TestDataFactory::new(owner.clone());

    let record = factory.create_recurring_transaction(
        RecurringOverrides::default()
            .name("Monthly Rent")
            .amount(dec!(1500.00))
            .frequency(Frequency::Monthly),
    );
    let rows = admin.insert_recurring(&record).await.unwrap();

    assert_eq!(rows.len(), 1);
    compare_records(&rows[0], &record, &[]).unwrap();
    assert_eq!(rows[0]["is_active"], json!(true));
    assert!(rows[0]["end_date"].is_null());

    common::cleanup(&admin, &[&owner]).await;
}

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_create_recurring_all_frequencies() {
    let admin = common::admin();
    let owner = common::unique_owner();
    let mut factory = TestDataFactory::new(owner.clone());

    for frequency in Frequency::ALL {
        let record = factory
            .create_recurring_transaction(RecurringOverrides::default().frequency(frequency));
        let rows = admin.insert_recurring(&record).await.unwrap();
        assert_eq!(rows[0]["frequency"], json!(frequency.as_str()));
    }

    common::cleanup(&admin, &[&owner]).await;
}

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_create_recurring_with_end_date() {
    let admin = common::admin();
    let owner = common::unique_owner();
    let mut factory = TestDataFactory::new(owner.clone());

    let end = today() + Days::new(365);
    let record = factory.create_recurring_transaction(
        RecurringOverrides::default()
            .start_date(today())
            .end_date(end),
    );
    record.validate_window().unwrap();

    let rows = admin.insert_recurring(&record).await.unwrap();
    assert_eq!(rows[0]["end_date"], json!(end));

    common::cleanup(&admin, &[&owner]).await;
}

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_create_recurring_without_owner_fails() {
    let admin = common::admin();

    let err = admin
        .insert_recurring(&json!({
            "name": "No Owner",
            "amount": 100,
            "frequency": "Monthly",
            "type": "Expense",
            "account_type": "Cash",
            "category_id": 1,
            "start_date": today(),
        }))
        .await
        .unwrap_err();

    assert!(err.is_constraint_violation(), "unexpected error: {err}");
}

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_read_own_recurring_transactions() {
    let admin = common::admin();
    let owner = common::unique_owner();
    let mut factory = TestDataFactory::new(owner.clone());

    let records: Vec<RecurringTransactionRecord> = (0..3)
        .map(|_| factory.create_recurring_transaction(RecurringOverrides::default()))
        .collect();
    admin.insert_recurring(&records).await.unwrap();

    let stored: Vec<RecurringTransactionRecord> = admin
        .table(RECURRING_TABLE)
        .eq("user_id", &owner)
        .order("id", true)
        .select_as()
        .await
        .unwrap();

    assert_eq!(stored.len(), 3);
    assert_eq!(
        stored.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        ["Recurring 1", "Recurring 2", "Recurring 3"]
    );

    common::cleanup(&admin, &[&owner]).await;
}

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_filter_recurring_by_frequency() {
    let admin = common::admin();
    let owner = common::unique_owner();
    let mut factory = TestDataFactory::new(owner.clone());

    let records: Vec<RecurringTransactionRecord> = [
        Frequency::Monthly,
        Frequency::Monthly,
        Frequency::Weekly,
    ]
    .into_iter()
    .map(|f| factory.create_recurring_transaction(RecurringOverrides::default().frequency(f)))
    .collect();
    admin.insert_recurring(&records).await.unwrap();

    let monthly = admin
        .table(RECURRING_TABLE)
        .eq("user_id", &owner)
        .eq("frequency", Frequency::Monthly)
        .select()
        .await
        .unwrap();

    assert_eq!(monthly.len(), 2);
    assert!(monthly.iter().all(|r| r["frequency"] == "Monthly"));

    common::cleanup(&admin, &[&owner]).await;
}

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_filter_active_recurring_transactions() {
    let admin = common::admin();
    let owner = common::unique_owner();
    let mut factory = TestDataFactory::new(owner.clone());

    let records = vec![
        factory.create_recurring_transaction(RecurringOverrides::default().active(true)),
        factory.create_recurring_transaction(RecurringOverrides::default().active(false)),
    ];
    admin.insert_recurring(&records).await.unwrap();

    let active = admin
        .table(RECURRING_TABLE)
        .eq("user_id", &owner)
        .eq("is_active", true)
        .select()
        .await
        .unwrap();

    assert_eq!(active.len(), 1);
    assert_eq!(common::name_of(&active[0]), records[0].name);

    common::cleanup(&admin, &[&owner]).await;
}

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_update_recurring_transaction() {
    let admin = common::admin();
    let owner = common::unique_owner();
    let mut factory = TestDataFactory::new(owner.clone());

    let created = admin
        .insert_recurring(
            &factory.create_recurring_transaction(
                RecurringOverrides::default().amount(dec!(100.00)),
            ),
        )
        .await
        .unwrap();
    let id = common::id_of(&created[0]);

    let updated = admin
        .table(RECURRING_TABLE)
        .eq("id", id)
        .update(&json!({"amount": 150.00, "name": "Updated Recurring"}))
        .await
        .unwrap();

    assert_eq!(updated.len(), 1);
    compare_records(
        &updated[0],
        &json!({"amount": 150.00, "name": "Updated Recurring"}),
        &[],
    )
    .unwrap();

    common::cleanup(&admin, &[&owner]).await;
}

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_deactivate_recurring_transaction() {
    let admin = common::admin();
    let owner = common::unique_owner();
    let mut factory = TestDataFactory::new(owner.clone());

    let created = admin
        .insert_recurring(&factory.create_recurring_transaction(RecurringOverrides::default()))
        .await
        .unwrap();
    let id = common::id_of(&created[0]);

    let updated = admin
        .table(RECURRING_TABLE)
        .eq("id", id)
        .update(&json!({"is_active": false}))
        .await
        .unwrap();

    assert_eq!(updated[0]["is_active"], json!(false));
    common::cleanup(&admin, &[&owner]).await;
}

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_update_frequency() {
    let admin = common::admin();
    let owner = common::unique_owner();
    let mut factory = TestDataFactory::new(owner.clone());

    let created = admin
        .insert_recurring(&factory.create_recurring_transaction(
            RecurringOverrides::default().frequency(Frequency::Monthly),
        ))
        .await
        .unwrap();
    let id = common::id_of(&created[0]);

    let updated = admin
        .table(RECURRING_TABLE)
        .eq("id", id)
        .update(&json!({"frequency": Frequency::Weekly}))
        .await
        .unwrap();

    assert_eq!(updated[0]["frequency"], json!("Weekly"));
    common::cleanup(&admin, &[&owner]).await;
}

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_delete_recurring_transaction() {
    let admin = common::admin();
    let owner = common::unique_owner();
    let mut factory = TestDataFactory::new(owner.clone());

    let created = admin
        .insert_recurring(&factory.create_recurring_transaction(RecurringOverrides::default()))
        .await
        .unwrap();
    let id = common::id_of(&created[0]);

    admin
        .table(RECURRING_TABLE)
        .eq("id", id)
        .delete()
        .await
        .unwrap();

    let remaining = admin
        .table(RECURRING_TABLE)
        .eq("id", id)
        .count()
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_bulk_delete_recurring_transactions() {
    let admin = common::admin();
    let owner = common::unique_owner();
    let mut factory = TestDataFactory::new(owner.clone());

    let records: Vec<RecurringTransactionRecord> = (0..3)
        .map(|_| factory.create_recurring_transaction(RecurringOverrides::default()))
        .collect();
    let created = admin.insert_recurring(&records).await.unwrap();
    let ids: Vec<i64> = created.iter().map(common::id_of).collect();

    let deleted = admin
        .table(RECURRING_TABLE)
        .in_("id", &ids)
        .delete()
        .await
        .unwrap();

    assert_eq!(deleted.len(), 3);
}

#[tokio::test]
#[ignore = "requires a live store (TALLYGUARD__STORE__*)"]
async fn test_due_items_query_matches_local_rule() {
    let admin = common::admin();
    let owner = common::unique_owner();
    let mut factory = TestDataFactory::new(owner.clone());
    let now = today();

    let records = vec![
        factory.create_recurring_transaction(
            RecurringOverrides::default()
                .frequency(Frequency::Monthly)
                .start_date(now - Days::new(30)),
        ),
        factory.create_recurring_transaction(
            RecurringOverrides::default().start_date(now + Days::new(30)),
        ),
        factory.create_recurring_transaction(
            RecurringOverrides::default()
                .start_date(now - Days::new(10))
                .active(false),
        ),
    ];
    admin.insert_recurring(&records).await.unwrap();

    let due: Vec<RecurringTransactionRecord> = admin
        .table(RECURRING_TABLE)
        .eq("user_id", &owner)
        .eq("is_active", true)
        .lte("start_date", now)
        .order("id", true)
        .select_as()
        .await
        .unwrap();

    let expected: Vec<&str> = records
        .iter()
        .filter(|r| r.is_due_on(now))
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(
        due.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        expected
    );

    common::cleanup(&admin, &[&owner]).await;
}
