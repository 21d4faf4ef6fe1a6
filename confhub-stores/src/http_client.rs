use std::sync::Arc;
use std::time::Duration;

use hyper::body::to_bytes;
use hyper::client::HttpConnector;
use hyper::header::HeaderName;
use hyper::{Body, Client, Request, StatusCode, Uri};
use hyper_rustls::HttpsConnector;
use rustls::{ClientConfig, OwnedTrustAnchor, RootCertStore};
use tokio::time::timeout;
use webpki_roots::TLS_SERVER_ROOTS;

use crate::traits::{StoreError, StoreResult};

pub(crate) type HyperClient = Client<HttpsConnector<HttpConnector>, Body>;

pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[allow(clippy::unnecessary_wraps)]
pub(crate) fn build_https_client() -> StoreResult<HyperClient> {
    let mut roots = RootCertStore::empty();
    roots.add_trust_anchors(TLS_SERVER_ROOTS.iter().map(|anchor| {
        OwnedTrustAnchor::from_subject_spki_name_constraints(
            anchor.subject,
            anchor.spki,
            anchor.name_constraints,
        )
    }));

    let config = ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);

    let connector = HttpsConnector::from((http, Arc::new(config)));

    Ok(Client::builder().build::<_, Body>(connector))
}

/// Status and UTF-8 body of a completed GET.
pub(crate) struct TextResponse {
    pub(crate) status: StatusCode,
    pub(crate) body: String,
}

pub(crate) async fn get_text(
    client: &HyperClient,
    uri: Uri,
    headers: &[(HeaderName, &str)],
    limit: Duration,
    store: &str,
) -> StoreResult<TextResponse> {
    let mut builder = Request::get(uri);
    for (name, value) in headers {
        builder = builder.header(name.clone(), *value);
    }
    let req = builder.body(Body::empty()).map_err(|err| {
        StoreError::transport(format!("failed to build {store} request: {err}"))
    })?;

    let response = timeout(limit, client.request(req))
        .await
        .map_err(|_| StoreError::transport(format!("{store} request timed out")))?
        .map_err(|err| StoreError::transport(format!("{store} request failed: {err}")))?;

    let status = response.status();
    let bytes = to_bytes(response.into_body()).await.map_err(|err| {
        StoreError::transport(format!("failed to read {store} response: {err}"))
    })?;

    let body = String::from_utf8(bytes.to_vec()).map_err(|err| {
        StoreError::response(format!("{store} returned non UTF-8 content: {err}"))
    })?;

    Ok(TextResponse { status, body })
}
