use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

/// Retrieval of off-chain JSON metadata by content-addressed URI.
///
/// Every failure mode — unrecognised scheme, unreachable gateway, non-JSON
/// bytes, non-object top level — yields `None`; callers leave the target
/// fields at their defaults and continue.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, uri: &str) -> Option<Value>;
}

/// Extract the content id from a metadata URI.
///
/// Accepts `ipfs://<cid>` and gateway-path URIs (`…/ipfs/<cid>`); anything
/// else is not content-addressed and is ignored.
pub fn extract_cid(uri: &str) -> Option<String> {
    let cid = if let Some(rest) = uri.strip_prefix("ipfs://") {
        rest.trim_start_matches('/')
    } else if let Some((_, rest)) = uri.split_once("/ipfs/") {
        rest
    } else {
        return None;
    };

    if cid.is_empty() {
        None
    } else {
        Some(cid.to_string())
    }
}

/// Pull one string-valued field out of a metadata document.
///
/// A key that is missing or holds a non-string value counts as absent; each
/// field resolves independently of the rest of the document.
pub fn string_field(doc: &Value, key: &str) -> Option<String> {
    doc.get(key)?.as_str().map(str::to_owned)
}

/// [`MetadataFetcher`] over an HTTP content-addressed gateway.
pub struct IpfsGateway {
    client: reqwest::Client,
    base: String,
}

impl IpfsGateway {
    pub fn new(gateway: &str) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            client,
            base: gateway.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MetadataFetcher for IpfsGateway {
    async fn fetch(&self, uri: &str) -> Option<Value> {
        let cid = extract_cid(uri)?;
        let url = format!("{}/{}", self.base, cid);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(uri = %uri, error = %e, "Metadata fetch failed");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::warn!(uri = %uri, status = %response.status(), "Metadata fetch failed");
            return None;
        }

        let value: Value = response.json().await.ok()?;
        value.is_object().then_some(value)
    }
}
