//! Consul key-value store backend.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use hyper::header::HeaderName;
use hyper::{StatusCode, Uri};
use tracing::{debug, info};
use url::Url;

use crate::http_client::{DEFAULT_TIMEOUT, HyperClient, build_https_client, get_text};
use crate::settings;
use crate::traits::{BackendKind, StoreBackend, StoreError, StoreResult};

/// Environment variable holding the Consul agent host.
pub const CONSUL_HOST_ENV: &str = "CONSUL_HOST";
/// Environment variable holding the Consul agent port.
pub const CONSUL_PORT_ENV: &str = "CONSUL_PORT";
/// Environment variable holding the ACL token.
pub const CONSUL_TOKEN_ENV: &str = "CONSUL_TOKEN";
/// Environment variable that switches the client to HTTPS when `true`.
pub const SSL_ENV: &str = "SSL";

const DEFAULT_HOST: &str = "127.0.0.1";
const TOKEN_HEADER: &str = "x-consul-token";

/// Connection settings for [`ConsulStore`].
#[derive(Clone, PartialEq, Eq)]
pub struct ConsulConfig {
    host: String,
    port: Option<u16>,
    secure: bool,
    token: Option<String>,
    timeout: Duration,
}

impl fmt::Debug for ConsulConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsulConfig")
            .field("host", &self.host)
            .field("port", &self.port())
            .field("secure", &self.secure)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl ConsulConfig {
    /// Creates settings for a plain-HTTP agent at `host`.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            secure: false,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] if `CONSUL_PORT` is not a valid port.
    pub fn from_env() -> StoreResult<Self> {
        Self::from_lookup(settings::process_env)
    }

    /// Reads settings through `lookup`, which maps variable names to values.
    ///
    /// The host defaults to `127.0.0.1`; the port defaults to 443 when `SSL`
    /// is `true` and 80 otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] if `CONSUL_PORT` is not a valid port.
    pub fn from_lookup<F>(lookup: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = settings::non_empty(&lookup, CONSUL_HOST_ENV)
            .unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let mut config = Self::new(host).with_secure(settings::flag(&lookup, SSL_ENV));
        if let Some(port) = settings::port(&lookup, CONSUL_PORT_ENV)? {
            config = config.with_port(port);
        }
        if let Some(token) = settings::non_empty(&lookup, CONSUL_TOKEN_ENV) {
            config = config.with_token(token);
        }
        Ok(config)
    }

    /// Sets an explicit port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Switches between HTTP and HTTPS.
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Supplies an ACL token sent with every lookup.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the agent host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the effective port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(if self.secure { 443 } else { 80 })
    }

    /// Returns whether HTTPS is used.
    #[must_use]
    pub const fn is_secure(&self) -> bool {
        self.secure
    }

    /// Returns the ACL token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Backend that reads documents from Consul's KV store.
pub struct ConsulStore {
    client: HyperClient,
    base: Url,
    token: Option<String>,
    timeout: Duration,
}

impl fmt::Debug for ConsulStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsulStore")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl ConsulStore {
    /// Constructs a store from the supplied settings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] if the host does not form a valid URL.
    pub fn new(config: ConsulConfig) -> StoreResult<Self> {
        let scheme = if config.secure { "https" } else { "http" };
        let base = Url::parse(&format!("{scheme}://{}:{}/", config.host, config.port()))
            .map_err(|err| StoreError::configuration(format!("invalid Consul address: {err}")))?;

        info!(address = %base, "using Consul KV config store");

        Ok(Self {
            client: build_https_client()?,
            base,
            token: config.token,
            timeout: config.timeout,
        })
    }

    /// Reads settings from the environment and constructs the store.
    ///
    /// # Errors
    ///
    /// See [`ConsulConfig::from_env`] and [`ConsulStore::new`].
    pub fn from_env() -> StoreResult<Self> {
        Self::new(ConsulConfig::from_env()?)
    }

    fn key_uri(&self, key: &str) -> StoreResult<Uri> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::configuration("Consul address cannot carry a path"))?
            .pop_if_empty()
            .extend(["v1", "kv"])
            .extend(key.trim_start_matches('/').split('/'));
        url.set_query(Some("raw"));

        url.as_str()
            .parse::<Uri>()
            .map_err(|err| StoreError::configuration(format!("invalid Consul key `{key}`: {err}")))
    }
}

#[async_trait]
impl StoreBackend for ConsulStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Consul
    }

    async fn load_file(&self, name: &str) -> StoreResult<String> {
        let uri = self.key_uri(name)?;
        debug!(key = name, "fetching config from Consul KV");

        let mut headers = Vec::new();
        if let Some(token) = self.token.as_deref() {
            headers.push((HeaderName::from_static(TOKEN_HEADER), token));
        }

        let response = get_text(&self.client, uri, &headers, self.timeout, "Consul").await?;
        match response.status {
            StatusCode::NOT_FOUND => Err(StoreError::not_found(name)),
            status if status.is_success() => Ok(response.body),
            status => Err(StoreError::response(format!(
                "Consul returned {status} for `{name}`: {}",
                response.body
            ))),
        }
    }
}
