//! Typed listing options and their conversion into query parameters.

use crate::models::{AccountType, OwnershipType, TransactionStatus};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::collections::BTreeMap;

pub const PAGE_SIZE: &str = "page[size]";
pub const DEFAULT_PAGE_SIZE: &str = "100";

/// Query parameters keyed by name, one value per name.
pub type Query = BTreeMap<String, String>;

/// A single named query parameter contributed by a listing option.
pub trait QueryOption {
    fn name(&self) -> &'static str;

    /// Already stringified in the form the API expects.
    fn value(&self) -> String;
}

/// Collect options into a query. A later option overwrites an earlier one of
/// the same name. Values are passed through without validation.
pub fn collect_query<O: QueryOption>(options: &[O]) -> Query {
    let mut query = Query::new();
    for option in options {
        query.insert(option.name().to_string(), option.value());
    }
    query
}

/// Like [`collect_query`], with `page[size]` falling back to 100 when no
/// option sets it.
pub fn build_query<O: QueryOption>(options: &[O]) -> Query {
    let mut query = collect_query(options);
    query
        .entry(PAGE_SIZE.to_string())
        .or_insert_with(|| DEFAULT_PAGE_SIZE.to_string());
    query
}

fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAccountsOption {
    PageSize(i64),
    AccountType(AccountType),
    OwnershipType(OwnershipType),
}

impl QueryOption for ListAccountsOption {
    fn name(&self) -> &'static str {
        match self {
            ListAccountsOption::PageSize(_) => PAGE_SIZE,
            ListAccountsOption::AccountType(_) => "filter[accountType]",
            ListAccountsOption::OwnershipType(_) => "filter[ownershipType]",
        }
    }

    fn value(&self) -> String {
        match self {
            ListAccountsOption::PageSize(size) => size.to_string(),
            ListAccountsOption::AccountType(kind) => kind.to_string(),
            ListAccountsOption::OwnershipType(kind) => kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTransactionsOption {
    PageSize(i64),
    Status(TransactionStatus),
    Since(DateTime<FixedOffset>),
    Until(DateTime<FixedOffset>),
    /// Category id, e.g. `takeaway`.
    Category(String),
    /// Tag name.
    Tag(String),
}

impl QueryOption for ListTransactionsOption {
    fn name(&self) -> &'static str {
        match self {
            ListTransactionsOption::PageSize(_) => PAGE_SIZE,
            ListTransactionsOption::Status(_) => "filter[status]",
            ListTransactionsOption::Since(_) => "filter[since]",
            ListTransactionsOption::Until(_) => "filter[until]",
            ListTransactionsOption::Category(_) => "filter[category]",
            ListTransactionsOption::Tag(_) => "filter[tag]",
        }
    }

    fn value(&self) -> String {
        match self {
            ListTransactionsOption::PageSize(size) => size.to_string(),
            ListTransactionsOption::Status(status) => status.to_string(),
            ListTransactionsOption::Since(ts) | ListTransactionsOption::Until(ts) => {
                format_timestamp(ts)
            }
            ListTransactionsOption::Category(id) => id.clone(),
            ListTransactionsOption::Tag(tag) => tag.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTagsOption {
    PageSize(i64),
}

impl QueryOption for ListTagsOption {
    fn name(&self) -> &'static str {
        PAGE_SIZE
    }

    fn value(&self) -> String {
        match self {
            ListTagsOption::PageSize(size) => size.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCategoriesOption {
    /// Only return the children of this parent category id.
    Parent(String),
}

impl QueryOption for ListCategoriesOption {
    fn name(&self) -> &'static str {
        "filter[parent]"
    }

    fn value(&self) -> String {
        match self {
            ListCategoriesOption::Parent(id) => id.clone(),
        }
    }
}
