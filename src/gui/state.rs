use crate::provider::ProviderConfig;
use crate::session::Session;

/// Shared application state. The session is the authoritative aggregate;
/// screens render projections of it and route every mutation through its
/// transition methods.
#[derive(Debug)]
pub struct AppState {
    pub session: Session,
    pub config: ProviderConfig,
}

impl AppState {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            session: Session::new(),
            config,
        }
    }
}
