//! Rust client for the Up Bank REST API.
//! Provides a small async interface over accounts, transactions, tags and
//! categories, with every paginated listing fully materialised.

pub mod client;
pub mod envelope;
pub mod error;
mod logging;
pub mod models;
pub mod query;
pub mod transport;

pub use client::{BASE_URL, Client, ClientBuilder};
pub use envelope::{
    DataEnvelope, ErrorEnvelope, ErrorObject, ErrorSource, Links, ListEnvelope, Resource,
    ResourceRef, ToMany, ToOne,
};
pub use error::{ApiError, UpError};
pub use models::{
    Account, AccountAttributes, AccountType, CardPurchaseMethod, Category, CategoryAttributes,
    Money, OwnershipType, Ping, PingMeta, Tag, Transaction, TransactionAttributes,
    TransactionStatus,
};
pub use query::{
    ListAccountsOption, ListCategoriesOption, ListTagsOption, ListTransactionsOption, Query,
    QueryOption, build_query, collect_query,
};
pub use transport::{Transport, TransportError};
