use std::sync::Arc;

use miette::Result;
use tracing::info;

use crate::{
    config::{ClientConfig, Language},
    end_point::{Endpoint, EndpointFlags, RequestContext},
    requester::{http::UreqRequester, Requester},
};

/// Entry point that hands out endpoint descriptors sharing one [`RequestContext`].
///
/// The per endpoint accessors (`backstory()`, `colors()`, ...) live next to their resource
/// types in [`crate::end_point`].
#[derive(Debug, Clone)]
pub struct Client {
    context: RequestContext,
}

impl Client {
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self {
            context: RequestContext::new(requester),
        }
    }
    /// a client talking to the real api with a [`UreqRequester`]
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        info!(
            base_url = %config.base_url,
            language = %config.language,
            authenticated = config.api_key.is_some(),
            "creating client"
        );
        let mut client = Self::new(Arc::new(UreqRequester::from_config(config)))
            .language(config.language);
        if let Some(key) = &config.api_key {
            client = client.authenticate(key.as_str());
        }
        if let Some(schema) = &config.schema {
            client = client.schema(schema.as_str());
        }
        Ok(client)
    }
    pub fn context(&self) -> &RequestContext {
        &self.context
    }
    pub fn language(mut self, language: Language) -> Self {
        self.context.language = language;
        self
    }
    pub fn authenticate(mut self, api_key: impl Into<Arc<str>>) -> Self {
        self.context.api_key = Some(api_key.into());
        self
    }
    pub fn schema(mut self, schema: impl Into<Arc<str>>) -> Self {
        self.context.schema = Some(schema.into());
        self
    }
    /// a descriptor for any path. prefer the typed accessors
    pub fn endpoint<T>(&self, url: &str, flags: EndpointFlags) -> Endpoint<T> {
        Endpoint::new(self.context.clone(), url, flags)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Arc::new(UreqRequester::default()))
    }
}
