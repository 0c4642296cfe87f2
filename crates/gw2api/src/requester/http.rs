use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use super::{Params, Requester};
use crate::{config::ClientConfig, error::TransportError};

/// [`Requester`] backed by a blocking [`ureq::Agent`].
/// Inside a tokio runtime each request runs on the blocking pool; elsewhere it blocks the caller.
#[derive(Debug, Clone)]
pub struct UreqRequester {
    agent: ureq::Agent,
    base_url: Url,
}

impl UreqRequester {
    pub fn new(agent: ureq::Agent, base_url: Url) -> Self {
        Self { agent, base_url }
    }
    pub fn from_config(config: &ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .https_only(config.base_url.scheme() == "https")
            .build();
        Self::new(agent, config.base_url.clone())
    }
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
    fn full_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

impl Default for UreqRequester {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

/// one blocking GET, with every failure mapped to a [`TransportError`]
fn call(
    agent: &ureq::Agent,
    full_url: &str,
    path: &str,
    params: &[(&'static str, String)],
) -> Result<Value, TransportError> {
    let mut request = agent.get(full_url);
    for (key, value) in params {
        request = request.query(key, value);
    }
    debug!(url = %path, "sending request");
    match request.call() {
        Ok(response) => response
            .into_json::<Value>()
            .map_err(|source| TransportError::Malformed {
                url: path.to_string(),
                source,
            }),
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            warn!(url = %path, status, "api responded with an error status");
            Err(TransportError::Status {
                url: path.to_string(),
                status,
                body,
            })
        }
        Err(ureq::Error::Transport(transport)) => {
            warn!(url = %path, %transport, "transport error");
            Err(TransportError::Network {
                url: path.to_string(),
                source: Box::new(transport),
            })
        }
    }
}

#[async_trait]
impl Requester for UreqRequester {
    async fn get(&self, url: &str, params: &Params) -> Result<Value, TransportError> {
        let full_url = self.full_url(url);
        // outside of tokio there is no blocking pool, so block the caller's executor instead
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            trace!(url, "no tokio runtime, calling inline");
            return call(&self.agent, &full_url, url, params);
        };
        let agent = self.agent.clone();
        let params = params.to_vec();
        let path = url.to_string();
        handle
            .spawn_blocking(move || call(&agent, &full_url, &path, &params))
            .await
            .map_err(|e| TransportError::Aborted {
                url: url.to_string(),
                reason: e.to_string(),
            })?
    }
}
