//! Nacos configuration-center backend.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use hyper::{StatusCode, Uri};
use tracing::{debug, info};
use url::Url;

use crate::http_client::{DEFAULT_TIMEOUT, HyperClient, build_https_client, get_text};
use crate::settings;
use crate::traits::{BackendKind, StoreBackend, StoreError, StoreResult};

/// Environment variable holding the Nacos server endpoint.
pub const NACOS_ENDPOINT_ENV: &str = "NACOS_ENDPOINT";
/// Environment variable holding the namespace (tenant).
pub const NACOS_NAMESPACE_ENV: &str = "NACOS_NAMESPACE";
/// Environment variable holding the config group.
pub const NACOS_GROUP_ENV: &str = "NACOS_GROUP";
/// Environment variable holding the server port.
pub const NACOS_PORT_ENV: &str = "NACOS_PORT";

/// Group used when none is configured.
pub const DEFAULT_GROUP: &str = "default";

const CONFIGS_PATH: &str = "/nacos/v1/cs/configs";

/// Connection settings for [`NacosStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NacosConfig {
    endpoint: Url,
    namespace: Option<String>,
    group: String,
    port: Option<u16>,
    timeout: Duration,
}

impl NacosConfig {
    /// Creates settings for the server at `endpoint`.
    ///
    /// Endpoints without a scheme are treated as `http://`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] if the endpoint is not a valid URL.
    pub fn new(endpoint: impl AsRef<str>) -> StoreResult<Self> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint.as_ref())?,
            namespace: None,
            group: DEFAULT_GROUP.to_owned(),
            port: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`NacosConfig::from_lookup`].
    pub fn from_env() -> StoreResult<Self> {
        Self::from_lookup(settings::process_env)
    }

    /// Reads settings through `lookup`, which maps variable names to values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] if `NACOS_ENDPOINT` is missing or
    /// invalid, or `NACOS_PORT` is not a valid port.
    pub fn from_lookup<F>(lookup: F) -> StoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = settings::non_empty(&lookup, NACOS_ENDPOINT_ENV).ok_or_else(|| {
            StoreError::configuration(format!("{NACOS_ENDPOINT_ENV} must be set for nacos mode"))
        })?;

        let mut config = Self::new(endpoint)?;
        if let Some(namespace) = settings::non_empty(&lookup, NACOS_NAMESPACE_ENV) {
            config = config.with_namespace(namespace);
        }
        if let Some(group) = settings::non_empty(&lookup, NACOS_GROUP_ENV) {
            config = config.with_group(group);
        }
        if let Some(port) = settings::port(&lookup, NACOS_PORT_ENV)? {
            config = config.with_port(port);
        }
        Ok(config)
    }

    /// Scopes lookups to a namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Overrides the config group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Sets an explicit server port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the config group.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Returns whether the endpoint uses HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.endpoint.scheme() == "https"
    }

    /// Returns the effective port: the explicit one, else 443 for HTTPS
    /// endpoints and 80 otherwise.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(if self.is_secure() { 443 } else { 80 })
    }
}

fn parse_endpoint(raw: &str) -> StoreResult<Url> {
    let raw = raw.trim();
    let lowered = raw.to_ascii_lowercase();
    let candidate = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        raw.to_owned()
    } else {
        format!("http://{raw}")
    };

    let url = Url::parse(&candidate).map_err(|err| {
        StoreError::configuration(format!("invalid Nacos endpoint `{raw}`: {err}"))
    })?;
    if url.host_str().is_none() {
        return Err(StoreError::configuration(format!(
            "Nacos endpoint `{raw}` has no host"
        )));
    }
    Ok(url)
}

/// Backend that reads documents from a Nacos configuration center.
///
/// Nacos refuses to publish empty content, so a successful response with an
/// empty body is reported as [`StoreError::NotFound`]. This differs from
/// [`LocalFileStore`](crate::LocalFileStore), where an empty file is returned
/// as-is and loads as an empty document.
pub struct NacosStore {
    client: HyperClient,
    base: Url,
    namespace: Option<String>,
    group: String,
    timeout: Duration,
}

impl fmt::Debug for NacosStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NacosStore")
            .field("base", &self.base.as_str())
            .field("namespace", &self.namespace)
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

impl NacosStore {
    /// Constructs a store from the supplied settings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] if the endpoint cannot carry the
    /// configured port.
    pub fn new(config: NacosConfig) -> StoreResult<Self> {
        let port = config.port();
        let mut base = config.endpoint;
        base.set_port(Some(port))
            .map_err(|()| StoreError::configuration("Nacos endpoint cannot carry a port"))?;
        base.set_path(CONFIGS_PATH);
        base.set_query(None);
        base.set_fragment(None);

        info!(
            address = %base,
            group = %config.group,
            namespace = config.namespace.as_deref().unwrap_or(""),
            "using Nacos config store"
        );

        Ok(Self {
            client: build_https_client()?,
            base,
            namespace: config.namespace,
            group: config.group,
            timeout: config.timeout,
        })
    }

    /// Reads settings from the environment and constructs the store.
    ///
    /// # Errors
    ///
    /// See [`NacosConfig::from_env`] and [`NacosStore::new`].
    pub fn from_env() -> StoreResult<Self> {
        Self::new(NacosConfig::from_env()?)
    }

    fn config_uri(&self, data_id: &str) -> StoreResult<Uri> {
        let mut url = self.base.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("dataId", data_id)
                .append_pair("group", &self.group);
            if let Some(namespace) = self.namespace.as_deref() {
                query.append_pair("tenant", namespace);
            }
        }

        url.as_str().parse::<Uri>().map_err(|err| {
            StoreError::configuration(format!("invalid Nacos data id `{data_id}`: {err}"))
        })
    }
}

#[async_trait]
impl StoreBackend for NacosStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Nacos
    }

    async fn load_file(&self, name: &str) -> StoreResult<String> {
        let uri = self.config_uri(name)?;
        debug!(data_id = name, group = %self.group, "fetching config from Nacos");

        let response = get_text(&self.client, uri, &[], self.timeout, "Nacos").await?;
        match response.status {
            StatusCode::NOT_FOUND => Err(StoreError::not_found(name)),
            // Nacos answers some absent data ids with 200 and no content.
            status if status.is_success() && response.body.is_empty() => {
                Err(StoreError::not_found(name))
            }
            status if status.is_success() => Ok(response.body),
            status => Err(StoreError::response(format!(
                "Nacos returned {status} for `{name}`: {}",
                response.body
            ))),
        }
    }
}
