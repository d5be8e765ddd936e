pub mod session;
pub mod initiator;
pub mod password;

pub use initiator::Initiator;
