//! Table queries over the REST surface.
//!
//! Filters are encoded as `column=op.value` query pairs, ordering as
//! `order=column.asc`, and row windows with an inclusive `Range` header.

use std::fmt::Display;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tallyguard_shared::types::{PageRequest, RowRange};
use tracing::{debug, warn};

use crate::client::StoreClient;
use crate::error::StoreError;

const RETURN_REPRESENTATION: &str = "return=representation";
const COUNT_EXACT: &str = "count=exact";

/// Comparison operators understood by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Equal.
    Eq,
    /// Not equal.
    Neq,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Member of a list.
    In,
    /// `IS` (null, true, false).
    Is,
}

impl FilterOp {
    /// Operator prefix, e.g. `eq`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::In => "in",
            Self::Is => "is",
        }
    }
}

/// A single `column=op.value` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Column name.
    pub column: String,
    /// Operator.
    pub op: FilterOp,
    /// Encoded operand.
    pub operand: String,
}

impl Filter {
    /// Query pair for this filter.
    #[must_use]
    pub fn to_pair(&self) -> (String, String) {
        (
            self.column.clone(),
            format!("{}.{}", self.op.as_str(), self.operand),
        )
    }
}

/// Encodes a list operand, quoting items that contain reserved characters.
#[must_use]
pub fn encode_list<I, V>(values: I) -> String
where
    I: IntoIterator<Item = V>,
    V: Display,
{
    let items: Vec<String> = values
        .into_iter()
        .map(|v| quote_list_item(&v.to_string()))
        .collect();
    format!("({})", items.join(","))
}

fn quote_list_item(item: &str) -> String {
    let reserved = item
        .chars()
        .any(|c| matches!(c, ',' | '(' | ')' | '"' | '\\') || c.is_whitespace());
    if !reserved && !item.is_empty() {
        return item.to_string();
    }
    let escaped = item.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Parses the total out of a `Content-Range` header, e.g. `0-24/57` or `*/0`.
#[must_use]
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

/// A query against one table, finished by one of the terminal operations.
#[derive(Debug, Clone)]
#[must_use = "queries do nothing until a terminal operation is awaited"]
pub struct TableQuery<'a> {
    client: &'a StoreClient,
    table: String,
    columns: String,
    filters: Vec<Filter>,
    order: Vec<String>,
    range: Option<RowRange>,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a StoreClient, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            range: None,
        }
    }

    /// Columns to return, e.g. `id,name,amount`.
    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    /// Adds a filter.
    pub fn filter(mut self, column: &str, op: FilterOp, operand: impl Display) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            op,
            operand: operand.to_string(),
        });
        self
    }

    /// `column = value`.
    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, FilterOp::Eq, value)
    }

    /// `column <> value`.
    pub fn neq(self, column: &str, value: impl Display) -> Self {
        self.filter(column, FilterOp::Neq, value)
    }

    /// `column < value`.
    pub fn lt(self, column: &str, value: impl Display) -> Self {
        self.filter(column, FilterOp::Lt, value)
    }

    /// `column <= value`.
    pub fn lte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, FilterOp::Lte, value)
    }

    /// `column > value`.
    pub fn gt(self, column: &str, value: impl Display) -> Self {
        self.filter(column, FilterOp::Gt, value)
    }

    /// `column >= value`.
    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.filter(column, FilterOp::Gte, value)
    }

    /// `column IN (values)`.
    pub fn in_<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let list = encode_list(values);
        self.filter(column, FilterOp::In, list)
    }

    /// `column IS NULL`.
    pub fn is_null(self, column: &str) -> Self {
        self.filter(column, FilterOp::Is, "null")
    }

    /// Appends an ordering term.
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.order.push(format!("{column}.{direction}"));
        self
    }

    /// Restricts the result to rows `from..=to`.
    pub fn range(mut self, from: u64, to: u64) -> Self {
        self.range = Some(RowRange::new(from, to));
        self
    }

    /// Restricts the result to one page.
    ///
    /// An empty page size leaves the range unset.
    pub fn page(mut self, page: PageRequest) -> Self {
        self.range = page.row_range();
        self
    }

    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 2);
        pairs.push(("select".to_string(), self.columns.clone()));
        pairs.extend(self.filters.iter().map(Filter::to_pair));
        if !self.order.is_empty() {
            pairs.push(("order".to_string(), self.order.join(",")));
        }
        pairs
    }

    fn prepare(&self, method: Method) -> RequestBuilder {
        let reads = method == Method::GET || method == Method::HEAD;
        let mut builder = self
            .client
            .request(method, &self.table)
            .query(&self.query_pairs());

        if reads {
            if let Some(range) = self.range {
                builder = builder
                    .header("Range-Unit", "items")
                    .header("Range", range.header_value());
            }
        } else {
            builder = builder.header("Prefer", RETURN_REPRESENTATION);
        }
        builder
    }

    fn prepare_select(&self) -> RequestBuilder {
        self.prepare(Method::GET)
    }

    fn prepare_insert<T: Serialize + ?Sized>(&self, rows: &T) -> RequestBuilder {
        self.prepare(Method::POST).json(rows)
    }

    fn prepare_update<T: Serialize + ?Sized>(&self, patch: &T) -> RequestBuilder {
        self.prepare(Method::PATCH).json(patch)
    }

    fn prepare_delete(&self) -> RequestBuilder {
        self.prepare(Method::DELETE)
    }

    fn prepare_count(&self) -> RequestBuilder {
        self.prepare(Method::HEAD).header("Prefer", COUNT_EXACT)
    }

    /// Reads matching rows.
    pub async fn select(self) -> Result<Vec<Value>, StoreError> {
        execute(self.prepare_select(), &self.table, "select").await
    }

    /// Reads matching rows into `T`.
    pub async fn select_as<T: DeserializeOwned>(self) -> Result<Vec<T>, StoreError> {
        self.select()
            .await?
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(StoreError::from))
            .collect()
    }

    /// Inserts one row or an array of rows and returns the stored rows.
    pub async fn insert<T: Serialize + ?Sized>(self, rows: &T) -> Result<Vec<Value>, StoreError> {
        execute(self.prepare_insert(rows), &self.table, "insert").await
    }

    /// Applies `patch` to matching rows and returns the updated rows.
    ///
    /// Rows hidden from the caller are not touched, so the result may be
    /// empty without an error.
    pub async fn update<T: Serialize + ?Sized>(self, patch: &T) -> Result<Vec<Value>, StoreError> {
        execute(self.prepare_update(patch), &self.table, "update").await
    }

    /// Deletes matching rows and returns them.
    pub async fn delete(self) -> Result<Vec<Value>, StoreError> {
        execute(self.prepare_delete(), &self.table, "delete").await
    }

    /// Counts matching rows without transferring them.
    pub async fn count(self) -> Result<u64, StoreError> {
        let response = self.prepare_count().send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::from_response(status.as_u16(), &body));
        }

        let total = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| StoreError::Api {
                status: status.as_u16(),
                code: None,
                message: "response has no exact count".to_string(),
                details: None,
                hint: None,
            })?;

        debug!(table = %self.table, total, "Counted rows");
        Ok(total)
    }
}

async fn execute(
    builder: RequestBuilder,
    table: &str,
    operation: &'static str,
) -> Result<Vec<Value>, StoreError> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let err = StoreError::from_response(status.as_u16(), &body);
        warn!(table, operation, status = status.as_u16(), error = %err, "Store request failed");
        return Err(err);
    }

    let rows = decode_rows(&body)?;
    debug!(table, operation, rows = rows.len(), "Store request succeeded");
    Ok(rows)
}

/// Normalises a response body into a list of rows.
fn decode_rows(body: &str) -> Result<Vec<Value>, StoreError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(match serde_json::from_str(body)? {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        row => vec![row],
    })
}
