//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod analytics;
mod connections;
mod contacts;
mod customer;
mod hlr;
mod messages;
mod pricelists;
mod search;
mod users;
mod wallets;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::{ParseError, Url};

use crate::domain::{ApiErrorMessage, ApiToken, ValidationError};
use crate::transport::{ApiRequest, TokenKind};

pub use analytics::AnalyticsApi;
pub use connections::ConnectionsApi;
pub use contacts::ContactsApi;
pub use customer::CustomerApi;
pub use hlr::HlrApi;
pub use messages::MessagesApi;
pub use pricelists::PricelistsApi;
pub use search::SearchApi;
pub use users::UsersApi;
pub use wallets::WalletsApi;

const DEFAULT_BASE_URL: &str = "https://api.beepsend.com";
const DEFAULT_API_VERSION: u16 = 2;

const ENV_API_TOKEN: &str = "BEEPSEND_API_TOKEN";
const ENV_HLR_TOKEN: &str = "BEEPSEND_HLR_TOKEN";
const ENV_API_URL: &str = "BEEPSEND_API_URL";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: Method,
    url: Url,
    headers: Vec<(&'static str, String)>,
    body: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method, request.url);
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Clone)]
/// Credentials for Beepsend API calls.
///
/// HLR lookups are billed to an HLR connection, which has its own token. When no HLR token is
/// configured the main token is used for HLR calls as well.
pub struct Auth {
    token: ApiToken,
    hlr_token: Option<ApiToken>,
}

impl Auth {
    /// Create [`Auth`] from a connection or user token (non-empty after trimming).
    pub fn token(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            token: ApiToken::new(value)?,
            hlr_token: None,
        })
    }

    /// Use a separate token for HLR endpoints.
    pub fn with_hlr_token(mut self, value: impl Into<String>) -> Result<Self, ValidationError> {
        self.hlr_token = Some(ApiToken::new(value)?);
        Ok(self)
    }

    fn token_for(&self, kind: TokenKind) -> &ApiToken {
        match kind {
            TokenKind::Api => &self.token,
            TokenKind::Hlr => self.hlr_token.as_ref().unwrap_or(&self.token),
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("token", &"<redacted>")
            .field("hlr_token", &self.hlr_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Where the API token is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPlacement {
    /// `Authorization: Token <token>` header.
    #[default]
    Header,
    /// `api_token=<token>` query parameter.
    Query,
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`BeepsendClient`].
///
/// The well-known HTTP failures of the API get their own variants carrying the decoded
/// error messages; any other non-2xx status is reported as [`BeepsendError::HttpStatus`].
pub enum BeepsendError {
    /// HTTP 401: missing, invalid, or revoked token.
    #[error("unauthorized{}", describe(.errors))]
    Unauthorized { errors: Vec<ApiErrorMessage> },

    /// HTTP 400 or 403: the API refused the request as invalid or forbidden.
    #[error("invalid request (HTTP {status}){}", describe(.errors))]
    InvalidRequest {
        status: u16,
        errors: Vec<ApiErrorMessage>,
    },

    /// HTTP 404.
    #[error("not found{}", describe(.errors))]
    NotFound { errors: Vec<ApiErrorMessage> },

    /// HTTP 5xx.
    #[error("server error (HTTP {status}){}", describe(.errors))]
    Server {
        status: u16,
        errors: Vec<ApiErrorMessage>,
    },

    /// Any other non-successful HTTP status code.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[source] ParseError),

    #[error("environment variable {var} is not set")]
    MissingEnv { var: &'static str },
}

fn describe(errors: &[ApiErrorMessage]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let joined = errors
        .iter()
        .map(|err| match (&err.field, err.code) {
            (Some(field), _) => format!("{field}: {}", err.description),
            (None, Some(code)) => format!("[{code}] {}", err.description),
            (None, None) => err.description.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ");
    format!(": {joined}")
}

impl BeepsendError {
    fn from_status(status: u16, body: String) -> Self {
        let errors = crate::transport::decode_error_body(&body);
        match status {
            401 => Self::Unauthorized { errors },
            400 | 403 => Self::InvalidRequest { status, errors },
            404 => Self::NotFound { errors },
            500..=599 => Self::Server { status, errors },
            _ => {
                let body = if body.trim().is_empty() {
                    None
                } else {
                    Some(body)
                };
                Self::HttpStatus { status, body }
            }
        }
    }

    /// HTTP status of the failed response, if the failure came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::InvalidRequest { status, .. }
            | Self::Server { status, .. }
            | Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error messages decoded from the response body (empty when there are none).
    pub fn api_errors(&self) -> &[ApiErrorMessage] {
        match self {
            Self::Unauthorized { errors }
            | Self::NotFound { errors }
            | Self::InvalidRequest { errors, .. }
            | Self::Server { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Returns `true` for rejected credentials (HTTP 401 and 403).
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. } | Self::InvalidRequest { status: 403, .. }
        )
    }

    /// Returns `true` if repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Transport(_))
    }
}

#[derive(Debug, Clone)]
/// Builder for [`BeepsendClient`].
///
/// Use this when you need to customize the endpoint, API version, timeouts, user-agent, or how
/// the token is sent.
pub struct BeepsendClientBuilder {
    auth: Auth,
    base_url: String,
    api_version: u16,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: String,
    token_placement: TokenPlacement,
}

impl BeepsendClientBuilder {
    /// Create a builder with the default endpoint and no timeout override.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_version: DEFAULT_API_VERSION,
            timeout: None,
            connect_timeout: None,
            user_agent: default_user_agent(),
            token_placement: TokenPlacement::default(),
        }
    }

    /// Configure a builder from `BEEPSEND_API_TOKEN`, `BEEPSEND_HLR_TOKEN` (optional) and
    /// `BEEPSEND_API_URL` (optional).
    pub fn from_env() -> Result<Self, BeepsendError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BeepsendError> {
        let token = lookup(ENV_API_TOKEN).ok_or(BeepsendError::MissingEnv { var: ENV_API_TOKEN })?;
        let mut auth = Auth::token(token)?;
        if let Some(hlr_token) = lookup(ENV_HLR_TOKEN).filter(|it| !it.trim().is_empty()) {
            auth = auth.with_hlr_token(hlr_token)?;
        }

        let mut builder = Self::new(auth);
        if let Some(base_url) = lookup(ENV_API_URL).filter(|it| !it.trim().is_empty()) {
            builder = builder.base_url(base_url);
        }
        Ok(builder)
    }

    /// Override the API host (default `https://api.beepsend.com`). A path prefix is kept.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the API version path segment (default `2`).
    pub fn api_version(mut self, version: u16) -> Self {
        self.api_version = version;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn token_placement(mut self, placement: TokenPlacement) -> Self {
        self.token_placement = placement;
        self
    }

    /// Build a [`BeepsendClient`].
    pub fn build(self) -> Result<BeepsendClient, BeepsendError> {
        parse_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|err| BeepsendError::Transport(Box::new(err)))?;

        Ok(BeepsendClient {
            auth: self.auth,
            base_url: self.base_url.trim().to_owned(),
            api_version: self.api_version,
            token_placement: self.token_placement,
            user_agent: self.user_agent,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn default_user_agent() -> String {
    format!("beepsend-rust/{}", env!("CARGO_PKG_VERSION"))
}

fn parse_base_url(raw: &str) -> Result<Url, BeepsendError> {
    let url = Url::parse(raw.trim()).map_err(BeepsendError::InvalidBaseUrl)?;
    if url.cannot_be_a_base() {
        return Err(BeepsendError::InvalidBaseUrl(
            ParseError::RelativeUrlWithCannotBeABaseBase,
        ));
    }
    Ok(url)
}

#[derive(Clone)]
/// High-level Beepsend client.
///
/// Operations are grouped by API area and reached through resource handles:
///
/// ```rust,no_run
/// # async fn run() -> Result<(), beepsend::BeepsendError> {
/// use beepsend::{Auth, BeepsendClient};
///
/// let client = BeepsendClient::new(Auth::token("...")?);
/// let me = client.users().me().await?;
/// let wallets = client.wallets().list().await?;
/// # let _ = (me, wallets);
/// # Ok(())
/// # }
/// ```
///
/// Every call performs exactly one HTTP request. Non-2xx responses are returned as
/// [`BeepsendError`]; nothing is retried.
pub struct BeepsendClient {
    auth: Auth,
    base_url: String,
    api_version: u16,
    token_placement: TokenPlacement,
    /// Sent as `User-Agent` on every request.
    user_agent: String,
    http: Arc<dyn HttpTransport>,
}

impl BeepsendClient {
    /// Create a client using the default endpoint.
    ///
    /// For more customization, use [`BeepsendClient::builder`].
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_version: DEFAULT_API_VERSION,
            token_placement: TokenPlacement::default(),
            user_agent: default_user_agent(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> BeepsendClientBuilder {
        BeepsendClientBuilder::new(auth)
    }

    pub fn customer(&self) -> CustomerApi<'_> {
        CustomerApi { client: self }
    }

    pub fn connections(&self) -> ConnectionsApi<'_> {
        ConnectionsApi { client: self }
    }

    pub fn pricelists(&self) -> PricelistsApi<'_> {
        PricelistsApi { client: self }
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { client: self }
    }

    pub fn messages(&self) -> MessagesApi<'_> {
        MessagesApi { client: self }
    }

    pub fn hlr(&self) -> HlrApi<'_> {
        HlrApi { client: self }
    }

    pub fn contacts(&self) -> ContactsApi<'_> {
        ContactsApi { client: self }
    }

    pub fn search(&self) -> SearchApi<'_> {
        SearchApi { client: self }
    }

    pub fn wallets(&self) -> WalletsApi<'_> {
        WalletsApi { client: self }
    }

    pub fn analytics(&self) -> AnalyticsApi<'_> {
        AnalyticsApi { client: self }
    }

    fn endpoint_url(&self, request: &ApiRequest) -> Result<Url, BeepsendError> {
        let mut url = parse_base_url(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| {
                BeepsendError::InvalidBaseUrl(ParseError::RelativeUrlWithCannotBeABaseBase)
            })?
            .pop_if_empty()
            .push(&self.api_version.to_string())
            .extend(&request.segments);

        let with_token = self.token_placement == TokenPlacement::Query;
        if with_token || !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            if with_token {
                pairs.append_pair(
                    ApiToken::FIELD,
                    self.auth.token_for(request.token).as_str(),
                );
            }
            pairs.extend_pairs(&request.query);
        }
        Ok(url)
    }

    async fn send(&self, request: ApiRequest) -> Result<HttpResponse, BeepsendError> {
        let url = self.endpoint_url(&request)?;
        let path = request.path();

        let mut headers = vec![
            ("accept", request.accept.to_owned()),
            ("user-agent", self.user_agent.clone()),
        ];
        if self.token_placement == TokenPlacement::Header {
            let token = self.auth.token_for(request.token);
            headers.push(("authorization", format!("Token {}", token.as_str())));
        }
        let body = match request.body {
            Some(body) => {
                headers.push(("content-type", "application/json".to_owned()));
                let encoded = serde_json::to_string(&body)
                    .map_err(|err| BeepsendError::Transport(Box::new(err)))?;
                Some(encoded)
            }
            None => None,
        };

        debug!(method = %request.method, path = %path, "sending Beepsend request");
        let response = self
            .http
            .send(HttpRequest {
                method: request.method.clone(),
                url,
                headers,
                body,
            })
            .await
            .map_err(BeepsendError::Transport)?;
        debug!(status = response.status, path = %path, "received Beepsend response");

        if !(200..=299).contains(&response.status) {
            let err = BeepsendError::from_status(response.status, response.body);
            warn!(
                method = %request.method,
                path = %path,
                status = response.status,
                error = %err,
                "Beepsend request failed"
            );
            return Err(err);
        }

        Ok(response)
    }

    async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, BeepsendError> {
        let response = self.send(request).await?;
        crate::transport::decode_json(&response.body)
            .map_err(|err| BeepsendError::Parse(Box::new(err)))
    }

    /// For endpoints answering `204 No Content`; any body is ignored.
    async fn execute_empty(&self, request: ApiRequest) -> Result<(), BeepsendError> {
        self.send(request).await.map(|_| ())
    }

    async fn execute_text(&self, request: ApiRequest) -> Result<String, BeepsendError> {
        Ok(self.send(request).await?.body)
    }
}
