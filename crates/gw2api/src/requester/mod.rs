//! The seam between endpoint descriptors and the network.
//!
//! Endpoints never perform io themselves. They build a path and query parameters and hand them
//! to a [`Requester`]. [`http::UreqRequester`] talks to the real api, [`mock::MockRequester`]
//! replays canned responses in tests.
use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

pub mod http;
pub mod mock;

/// query parameters in the order they should appear in the url
pub type Params = [(&'static str, String)];

#[async_trait]
pub trait Requester: Send + Sync + std::fmt::Debug {
    /// GET `url` (a path like `/v2/colors`) with `params` and return the parsed json body.
    /// Timeouts, retries and rate limiting are all the implementor's business.
    async fn get(&self, url: &str, params: &Params) -> Result<Value, TransportError>;
}
