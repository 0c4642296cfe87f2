//! Endpoint descriptors for the Guild Wars 2 web api.
//!
//! Every endpoint is described by a url path and a set of [`EndpointFlags`] which say
//! what the endpoint can do (pagination, bulk requests, `ids=all`, localization, api keys).
//! An [`Endpoint`] turns those flags into requests and hands them to a [`Requester`],
//! which is the only thing that actually talks to the network.
//!
//! ```no_run
//! # async fn run() -> Result<(), gw2api::ApiError> {
//! let client = gw2api::Client::default();
//! let answer = client.backstory().answers().get("7-54").await?;
//! println!("{}", answer.title);
//! # Ok(())
//! # }
//! ```
//!
//! resources:
//! 1. https://wiki.guildwars2.com/wiki/API:Main
//! 2. https://wiki.guildwars2.com/wiki/API:2
//! 3. https://wiki.guildwars2.com/wiki/API:API_key
pub mod client;
pub mod config;
pub mod end_point;
pub mod error;
pub mod requester;
pub mod trace;

pub use client::Client;
pub use config::{ClientConfig, Language};
pub use end_point::{Endpoint, EndpointFlags, Operation, RequestContext, ResourceId};
pub use error::{ApiError, TransportError};
pub use requester::{http::UreqRequester, mock::MockRequester, Requester};

pub(crate) mod prelude {
    pub use crate::end_point::{Endpoint, EndpointFlags, ResourceId};
    pub use serde::{Deserialize, Serialize};
    pub use url::Url;
}

pub const API_BASE_URL: &str = "https://api.guildwars2.com";
/// every endpoint path starts with this
pub const V2_PREFIX: &str = "/v2";
// https://wiki.guildwars2.com/wiki/API:Changelog
pub const LATEST_SCHEMA: &str = "2021-04-06T21:00:00.000Z";
