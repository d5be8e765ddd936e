use futures::future::BoxFuture;
use trivia_api::auth::{Signup, Login, Authenticated, User};

use crate::net::error;
use crate::sec::authn::Initiator;

pub mod local;

pub use local::LocalController;

/// collaborator behind the auth routes. the route table decides which
/// operation runs and who may call it, everything else happens here
pub trait AuthController: Send + Sync {
    fn signup(&self, body: Signup) -> BoxFuture<'_, error::Result<Authenticated>>;

    fn login(&self, body: Login) -> BoxFuture<'_, error::Result<Authenticated>>;

    /// only called for requests that passed the session guard
    fn me(&self, initiator: Initiator) -> BoxFuture<'_, error::Result<User>>;
}
