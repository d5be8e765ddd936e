mod response;

pub mod error;
pub use error::{ApiError, ApiErrorKind, Detail};

pub mod traits;
pub use traits::Validator;

pub mod auth;
pub mod singleplayer;

mod payload;
pub use payload::Payload;

#[cfg(feature = "client")]
pub mod client;
