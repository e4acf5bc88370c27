use std::sync::Arc;

use crate::domain::client::outbound::{
    ConfigurePort, DonePort, InitPort, PausePort, QueryPort, ResumePort, StartPort, StopPort,
};

/// Entrance to the client-side logic, providing ports for external adapters.
pub struct ApplicationCore {
    pub init: Arc<dyn InitPort>,
    pub start: Arc<dyn StartPort>,
    pub stop: Arc<dyn StopPort>,
    pub pause: Arc<dyn PausePort>,
    pub resume: Arc<dyn ResumePort>,
    pub done: Arc<dyn DonePort>,
    pub configure: Arc<dyn ConfigurePort>,
    pub query: Arc<dyn QueryPort>,
}

impl ApplicationCore {
    /// Create a new [`ApplicationCore`] from injected adapters.
    #[allow(clippy::too_many_arguments)]
    pub fn setup(
        init: Arc<dyn InitPort>,
        start: Arc<dyn StartPort>,
        stop: Arc<dyn StopPort>,
        pause: Arc<dyn PausePort>,
        resume: Arc<dyn ResumePort>,
        done: Arc<dyn DonePort>,
        configure: Arc<dyn ConfigurePort>,
        query: Arc<dyn QueryPort>,
    ) -> ApplicationCore {
        Self {
            init,
            start,
            stop,
            pause,
            resume,
            done,
            configure,
            query,
        }
    }
}
