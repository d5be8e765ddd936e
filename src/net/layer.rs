pub mod request_id;
pub mod timeout;
pub mod trace;

pub use request_id::RIDLayer;
pub use timeout::TimeoutLayer;
