pub mod endpoint;
pub mod resilient;
pub mod transport;

pub use endpoint::EndpointConfig;
pub use resilient::{backoff_delay, ResilientTransport, BACKOFF_STEP};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
