use std::sync::Arc;

use crate::error;
use crate::config;
use crate::controller::{AuthController, LocalController};
use crate::sec;

pub struct Shared {
    sec: Arc<sec::state::Sec>,
    auth: Arc<dyn AuthController>,
}

pub type ArcShared = Arc<Shared>;

impl Shared {
    pub fn new(sec: Arc<sec::state::Sec>, auth: Arc<dyn AuthController>) -> Self {
        Shared { sec, auth }
    }

    pub fn from_config(config: &config::Config) -> error::Result<Shared> {
        tracing::debug!("creating Shared state");

        let sec = Arc::new(sec::state::Sec::from_config(config)?);
        let auth = Arc::new(LocalController::new(sec.clone()));

        Ok(Shared::new(sec, auth))
    }

    pub fn sec(&self) -> &sec::state::Sec {
        &self.sec
    }

    pub fn auth(&self) -> &dyn AuthController {
        self.auth.as_ref()
    }
}
