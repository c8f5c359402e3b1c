mod common;

use chrono::{FixedOffset, TimeZone};
use common::FixtureTransport;
use rust_decimal::Decimal;
use std::str::FromStr;
use upbank::{
    AccountType, CardPurchaseMethod, ListAccountsOption, ListCategoriesOption, ListTagsOption,
    ListTransactionsOption, Money, OwnershipType, TransactionStatus, UpError,
};

fn aud(value: &str, base_units: i64) -> Money {
    Money {
        currency_code: "AUD".to_string(),
        value: Decimal::from_str(value).unwrap(),
        value_in_base_units: base_units,
    }
}

fn accounts_transport() -> FixtureTransport {
    FixtureTransport::new()
        .route("page-2", 200, "accounts-2.json")
        .route("page-3", 200, "accounts-3.json")
        .route("/accounts", 200, "accounts-1.json")
}

#[tokio::test]
async fn list_accounts_follows_every_page() {
    let transport = accounts_transport();
    let client = transport.client();

    let accounts = client.list_accounts(&[]).await.unwrap();

    let names: Vec<&str> = accounts.iter().map(|a| a.display_name.as_str()).collect();
    assert_eq!(names, vec!["Spending", "Savings", "Home Loan"]);
    assert_eq!(accounts[0].account_type, AccountType::Transactional);
    assert_eq!(accounts[0].balance, aud("1422.00", 142200));
    assert_eq!(accounts[2].account_type, AccountType::HomeLoan);
    assert_eq!(accounts[2].ownership_type, OwnershipType::Joint);
    assert_eq!(accounts[2].balance, aud("-52489.00", -5248900));
    let sydney = FixedOffset::east_opt(11 * 3600).unwrap();
    assert_eq!(
        accounts[0].created_at,
        sydney.with_ymd_and_hms(2024, 11, 6, 14, 26, 50).unwrap()
    );

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(
        requests[0].url,
        "https://api.up.com.au/api/v1/accounts?page%5Bsize%5D=100"
    );
    assert_eq!(
        requests[2].url,
        "https://api.up.com.au/api/v1/accounts?page%5Bafter%5D=page-3&page%5Bsize%5D=1"
    );
}

#[tokio::test]
async fn list_accounts_sends_filters_on_first_page_only() {
    let transport = accounts_transport();
    let client = transport.client();

    client
        .list_accounts(&[
            ListAccountsOption::PageSize(1),
            ListAccountsOption::AccountType(AccountType::Saver),
            ListAccountsOption::OwnershipType(OwnershipType::Individual),
        ])
        .await
        .unwrap();

    let requests = transport.requests();
    let first = url::Url::parse(&requests[0].url).unwrap();
    let pairs: Vec<(String, String)> = first.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("filter[accountType]".to_string(), "SAVER".to_string()),
            ("filter[ownershipType]".to_string(), "INDIVIDUAL".to_string()),
            ("page[size]".to_string(), "1".to_string()),
        ]
    );
    assert!(!requests[1].url.contains("filter"));
}

#[tokio::test]
async fn list_transactions_decodes_attributes() {
    let transport = FixtureTransport::new()
        .route("page-2", 200, "transactions-2.json")
        .route("/transactions", 200, "transactions-1.json");
    let client = transport.client();
    let since = FixedOffset::east_opt(11 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 11, 1, 0, 0, 0)
        .unwrap();

    let transactions = client
        .list_transactions(&[
            ListTransactionsOption::Status(TransactionStatus::Held),
            ListTransactionsOption::Since(since),
            ListTransactionsOption::PageSize(1),
        ])
        .await
        .unwrap();

    assert_eq!(transactions.len(), 2);
    let held = &transactions[0];
    assert_eq!(held.status, TransactionStatus::Held);
    assert_eq!(held.amount, aud("-42.50", -4250));
    assert_eq!(
        held.round_up.as_ref().map(|r| r.amount.value_in_base_units),
        Some(-50)
    );
    assert_eq!(
        held.card_purchase_method.as_ref().map(|c| c.method),
        Some(CardPurchaseMethod::Contactless)
    );
    assert_eq!(held.note.as_ref().map(|n| n.text.as_str()), Some("Friday pizzas"));
    assert!(held.settled_at.is_none());

    let settled = &transactions[1];
    assert_eq!(settled.status, TransactionStatus::Settled);
    assert_eq!(
        settled.message.as_deref(),
        Some("Money for the pizzas last night.")
    );
    assert!(settled.settled_at.is_some());
    assert!(settled.performing_customer.is_none());

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].url.contains("filter%5Bsince%5D=2024-11-01T00%3A00%3A00%2B11%3A00"));
    assert!(requests[0].url.contains("filter%5Bstatus%5D=HELD"));
}

#[tokio::test]
async fn list_transactions_unauthorized_returns_no_data() {
    let transport = FixtureTransport::new().route("/transactions", 401, "unauthorized.json");
    let client = transport.client();

    let err = client.list_transactions(&[]).await.unwrap_err();

    assert!(matches!(err, UpError::Api(_)));
    let message = err.to_string();
    assert!(message.contains("error response returned from API"));
    assert!(message.contains("Not Authorized"));
    assert!(message.contains("status_code=401"));
}

#[tokio::test]
async fn failed_later_page_discards_earlier_pages() {
    let transport = FixtureTransport::new()
        .route("page-2", 401, "unauthorized.json")
        .route("/accounts", 200, "accounts-1.json");
    let client = transport.client();

    let result = client.list_accounts(&[]).await;

    assert!(result.is_err());
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn list_tags_returns_names_in_order() {
    let transport = FixtureTransport::new()
        .route("page-2", 200, "tags-2.json")
        .route("/tags", 200, "tags-1.json");
    let client = transport.client();

    let tags = client
        .list_tags(&[ListTagsOption::PageSize(3)])
        .await
        .unwrap();

    let names: Vec<&str> = tags.iter().map(|t| t.name()).collect();
    assert_eq!(
        names,
        vec!["Holiday", "Pizza Night", "Dining Out", "Shopping", "Fitness"]
    );
    assert!(tags.iter().all(|t| t.object.kind == "tags"));
    assert_eq!(
        transport.requests()[0].url,
        "https://api.up.com.au/api/v1/tags?page%5Bsize%5D=3"
    );
}

#[tokio::test]
async fn list_categories_filters_by_parent() {
    let transport = FixtureTransport::new().route("/categories", 200, "categories.json");
    let client = transport.client();

    let categories = client
        .list_categories(&[ListCategoriesOption::Parent("good-life".to_string())])
        .await
        .unwrap();

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Takeaway", "Restaurants & Cafes"]);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url,
        "https://api.up.com.au/api/v1/categories?filter%5Bparent%5D=good-life"
    );
}

#[tokio::test]
async fn list_categories_without_filters_sends_no_query() {
    let transport = FixtureTransport::new().route("/categories", 200, "categories.json");
    let client = transport.client();

    client.list_categories(&[]).await.unwrap();

    assert_eq!(
        transport.requests()[0].url,
        "https://api.up.com.au/api/v1/categories"
    );
}

#[tokio::test]
async fn empty_listing_page_ends_the_listing() {
    let transport = FixtureTransport::new().empty("/tags", 200);
    let client = transport.client();

    let tags = client.list_tags(&[]).await.unwrap();

    assert!(tags.is_empty());
    assert_eq!(transport.requests().len(), 1);
}
