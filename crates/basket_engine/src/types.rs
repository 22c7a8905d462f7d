use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub type RequestId = u64;

/// One entry of the item-prices endpoint. Absent and `null` prices both map to `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemPrice {
    pub name: String,
    #[serde(default)]
    pub your_price: Option<f64>,
    #[serde(default)]
    pub kroger_price: Option<f64>,
}

/// Exactly one event is emitted per issued request.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    SearchCompleted {
        request_id: RequestId,
        result: Result<Vec<ItemPrice>, GatewayError>,
    },
    ComparisonCompleted {
        request_id: RequestId,
        result: Result<Vec<ItemPrice>, GatewayError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct GatewayError {
    pub kind: FailureKind,
    pub message: String,
}

impl GatewayError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build price gateway: {0}")]
    Gateway(#[from] GatewayError),
}
