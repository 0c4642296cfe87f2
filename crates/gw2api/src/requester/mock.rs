use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use serde_json::Value;
use tracing::trace;

use super::{Params, Requester};
use crate::error::TransportError;

/// A request as seen by [`MockRequester`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
}

/// Replays queued responses in FIFO order, regardless of the requested url.
/// Every request is recorded so tests can check what an endpoint asked for.
#[derive(Debug, Default)]
pub struct MockRequester {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockRequester {
    pub fn new() -> Self {
        Self::default()
    }
    /// forget queued responses and recorded requests
    pub fn reset(&self) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
    pub fn add_response(&self, data: Value) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(data));
    }
    pub fn add_error(&self, err: TransportError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(err));
    }
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
    pub fn pending_responses(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Requester for MockRequester {
    async fn get(&self, url: &str, params: &Params) -> Result<Value, TransportError> {
        trace!(url, ?params, "mock request");
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                url: url.to_string(),
                params: params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            });
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::NoMockResponse {
                    url: url.to_string(),
                })
            })
    }
}
