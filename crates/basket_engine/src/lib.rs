//! Market basket engine: the remote price gateway and request execution.
mod engine;
mod gateway;
mod types;

pub use engine::EngineHandle;
pub use gateway::{GatewaySettings, PriceGateway, ReqwestGateway};
pub use types::{EngineError, EngineEvent, FailureKind, GatewayError, ItemPrice, RequestId};
