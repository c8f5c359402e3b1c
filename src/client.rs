use crate::envelope::{DataEnvelope, ErrorEnvelope, ListEnvelope};
use crate::error::{ApiError, UpError};
use crate::logging::ClientLogger;
use crate::models::{
    Account, AccountAttributes, Category, CategoryAttributes, Ping, Tag, Transaction,
    TransactionAttributes, tag_refs,
};
use crate::query::{
    ListAccountsOption, ListCategoriesOption, ListTagsOption, ListTransactionsOption, Query,
    build_query, collect_query,
};
use crate::transport::Transport;
use log::{LevelFilter, Log};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Request, Url};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, debug_span, instrument};

pub const BASE_URL: &str = "https://api.up.com.au/api/v1";
const TIMEOUT: Duration = Duration::from_secs(30);

/// One round trip's worth of input for [`Client::send`].
struct ApiRequest<'a, B: ?Sized = ()> {
    method: Method,
    path: &'a str,
    query: Option<&'a Query>,
    body: Option<&'a B>,
}

impl<'a> ApiRequest<'a> {
    fn get(path: &'a str) -> Self {
        Self {
            method: Method::GET,
            path,
            query: None,
            body: None,
        }
    }
}

impl<'a, B: ?Sized> ApiRequest<'a, B> {
    fn with_body(method: Method, path: &'a str, body: &'a B) -> Self {
        Self {
            method,
            path,
            query: None,
            body: Some(body),
        }
    }

    fn query(mut self, query: Option<&'a Query>) -> Self {
        self.query = query;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    headers: HeaderMap,
    transport: Arc<dyn Transport>,
    logger: ClientLogger,
}

pub struct ClientBuilder {
    token: String,
    base_url: String,
    transport: Option<Arc<dyn Transport>>,
    logger: ClientLogger,
    log_level: LevelFilter,
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("token", &"<token>")
            .field("base_url", &self.base_url)
            .field("transport", &self.transport)
            .field("logger", &self.logger)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl ClientBuilder {
    /// Override the base URL (useful for tests or proxies).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send requests through `transport` instead of a default reqwest client.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Send log records to `logger` instead of the `log` facade.
    pub fn logger(mut self, logger: Arc<dyn Log>) -> Self {
        self.logger = ClientLogger::new(logger);
        self
    }

    pub fn log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    pub fn build(self) -> Result<Client, UpError> {
        if self.token.is_empty() {
            return Err(UpError::EmptyToken);
        }

        let base_url = self.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| UpError::InvalidOption(format!("invalid base url {base_url}: {e}")))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| {
            UpError::InvalidOption("token is not a valid header value".to_string())
        })?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(reqwest::Client::builder().timeout(TIMEOUT).build()?),
        };

        let logger = self.logger.with_level(self.log_level);
        logger.debug(format_args!("client setup successfully; base_url={base_url}"));
        Ok(Client {
            base_url,
            headers,
            transport,
            logger,
        })
    }
}

impl Client {
    /// Create a new client with the default base URL, transport and logger.
    pub fn new(token: impl Into<String>) -> Result<Self, UpError> {
        Self::builder(token).build()
    }

    pub fn builder(token: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            token: token.into(),
            base_url: BASE_URL.to_string(),
            transport: None,
            logger: ClientLogger::default(),
            log_level: LevelFilter::Info,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn log_level(&self) -> LevelFilter {
        self.logger.level()
    }

    /// Check the token is accepted.
    #[instrument(skip_all)]
    pub async fn ping(&self) -> Result<Ping, UpError> {
        self.send(ApiRequest::get("/util/ping"))
            .await?
            .ok_or(UpError::InvalidResponse)
    }

    /// List every account, following pagination to the end.
    #[instrument(skip_all)]
    pub async fn list_accounts(
        &self,
        options: &[ListAccountsOption],
    ) -> Result<Vec<AccountAttributes>, UpError> {
        let accounts: Vec<Account> = self.paginate("/accounts", build_query(options)).await?;
        Ok(accounts.into_iter().map(|a| a.attributes).collect())
    }

    /// List every transaction across all accounts, newest first.
    #[instrument(skip_all)]
    pub async fn list_transactions(
        &self,
        options: &[ListTransactionsOption],
    ) -> Result<Vec<TransactionAttributes>, UpError> {
        let transactions: Vec<Transaction> =
            self.paginate("/transactions", build_query(options)).await?;
        Ok(transactions.into_iter().map(|t| t.attributes).collect())
    }

    #[instrument(skip_all)]
    pub async fn list_tags(&self, options: &[ListTagsOption]) -> Result<Vec<Tag>, UpError> {
        self.paginate("/tags", build_query(options)).await
    }

    /// The categories endpoint takes no page size, so none is injected.
    #[instrument(skip_all)]
    pub async fn list_categories(
        &self,
        options: &[ListCategoriesOption],
    ) -> Result<Vec<CategoryAttributes>, UpError> {
        let categories: Vec<Category> =
            self.paginate("/categories", collect_query(options)).await?;
        Ok(categories.into_iter().map(|c| c.attributes).collect())
    }

    #[instrument(skip(self, tags))]
    pub async fn add_tags_to_transaction<S: AsRef<str>>(
        &self,
        id: &str,
        tags: &[S],
    ) -> Result<(), UpError> {
        self.update_tags(Method::POST, id, tags).await
    }

    #[instrument(skip(self, tags))]
    pub async fn remove_tags_from_transaction<S: AsRef<str>>(
        &self,
        id: &str,
        tags: &[S],
    ) -> Result<(), UpError> {
        self.update_tags(Method::DELETE, id, tags).await
    }

    async fn update_tags<S: AsRef<str>>(
        &self,
        method: Method,
        id: &str,
        tags: &[S],
    ) -> Result<(), UpError> {
        let path = format!("/transactions/{id}/relationships/tags");
        let body = DataEnvelope::new(tag_refs(tags));
        self.send::<_, IgnoredAny>(ApiRequest::with_body(method, &path, &body))
            .await?;
        Ok(())
    }

    /// Fetch `path` and every page after it. Any failure discards the pages
    /// already read.
    async fn paginate<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query,
    ) -> Result<Vec<T>, UpError> {
        let mut items = Vec::new();
        let mut path = path.to_string();
        let mut query = Some(query);
        loop {
            // an empty page has no next link to follow
            let Some(page) = self
                .send::<_, ListEnvelope<T>>(ApiRequest::get(&path).query(query.as_ref()))
                .await?
            else {
                break;
            };
            items.extend(page.data);

            let Some(next) = page.links.next_page() else {
                break;
            };
            self.logger.debug(format_args!("following next page {next}"));
            // next links carry their own query string
            path = next
                .strip_prefix(self.base_url.as_str())
                .unwrap_or(next)
                .to_string();
            query = None;
        }
        Ok(items)
    }

    /// Execute one request. A 2xx body is decoded into `T` (`None` when the
    /// body is empty); anything else is decoded as an error document.
    async fn send<B, T>(&self, request: ApiRequest<'_, B>) -> Result<Option<T>, UpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let span = debug_span!("sender", method = %request.method, path = request.path);
        self.dispatch(request).instrument(span).await
    }

    async fn dispatch<B, T>(&self, request: ApiRequest<'_, B>) -> Result<Option<T>, UpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = request
            .body
            .map(|body| serde_json::to_vec(body))
            .transpose()
            .map_err(UpError::Marshal)?;

        let mut url = Url::parse(&format!("{}{}", self.base_url, request.path))?;
        if let Some(query) = request.query.filter(|q| !q.is_empty()) {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        let mut http_request = Request::new(request.method, url);
        *http_request.headers_mut() = self.headers.clone();
        if let Some(body) = body {
            *http_request.body_mut() = Some(body.into());
        }

        let response = self
            .transport
            .execute(http_request)
            .await
            .map_err(UpError::Send)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(UpError::ResponseRead)?;
        let raw = String::from_utf8_lossy(&bytes);

        if status.is_success() {
            self.logger.debug(format_args!(
                "response from API; status_code={} body={}",
                status.as_u16(),
                raw
            ));
            if bytes.is_empty() {
                return Ok(None);
            }
            return serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(UpError::Unmarshal);
        }

        self.logger.error(format_args!(
            "response from API; status_code={} body={}",
            status.as_u16(),
            raw
        ));
        let envelope: ErrorEnvelope = serde_json::from_slice(&bytes).map_err(UpError::Unmarshal)?;
        Err(UpError::Api(ApiError {
            status,
            errors: envelope.errors,
        }))
    }
}
