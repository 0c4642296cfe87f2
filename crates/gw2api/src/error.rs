use miette::Diagnostic;
use thiserror::Error;

use crate::end_point::Operation;

/// Errors produced by an [`crate::Endpoint`].
#[derive(Diagnostic, Debug, Error)]
pub enum ApiError {
    #[error("{url} does not support `{operation}`")]
    #[diagnostic(code(api_error::not_supported))]
    NotSupported {
        url: String,
        operation: Operation,
    },
    #[error("page size {size} is out of range. expected 1..={max}")]
    #[diagnostic(code(api_error::invalid_page_size))]
    InvalidPageSize { size: u16, max: u16 },
    #[error("{url} requires an api key, but none was set")]
    #[diagnostic(
        code(api_error::missing_api_key),
        help("call `authenticate` on the client or endpoint, or set GW2API_KEY")
    )]
    MissingApiKey { url: String },
    #[error(transparent)]
    #[diagnostic(code(api_error::transport))]
    Transport(#[from] TransportError),
    #[error("failed to decode response of {url}")]
    #[diagnostic(code(api_error::decode))]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("response of {url} contains an object without `id`")]
    #[diagnostic(code(api_error::missing_id))]
    MissingId { url: String },
}

/// Whatever went wrong inside a [`crate::Requester`]. Endpoints pass it through untouched.
#[derive(Diagnostic, Debug, Error)]
pub enum TransportError {
    #[error("{url} responded with status {status}: {body}")]
    #[diagnostic(code(transport_error::status))]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("network error while requesting {url}")]
    #[diagnostic(code(transport_error::network))]
    Network {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("response of {url} is not valid json")]
    #[diagnostic(code(transport_error::malformed))]
    Malformed {
        url: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request task for {url} did not finish: {reason}")]
    #[diagnostic(code(transport_error::aborted))]
    Aborted { url: String, reason: String },
    #[error("mock requester has no response queued for {url}")]
    #[diagnostic(
        code(transport_error::no_mock_response),
        help("queue one with `MockRequester::add_response`")
    )]
    NoMockResponse { url: String },
}
