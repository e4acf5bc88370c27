use std::sync::Arc;

use snafu::prelude::*;

use crate::client::app::connector::Connector;
use crate::client::outbound::exchange;
use crate::domain::client::outbound::{BadResponseSnafu, PausePort, RequestDaemonError};
use crate::protocol::{Request, Response};

/// A [`PausePort`] implementation over the daemon connection.
pub struct PauseService {
    connector: Arc<dyn Connector>,
}

impl PauseService {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }
}

#[async_trait::async_trait]
impl PausePort for PauseService {
    async fn pause(&self) -> Result<(), RequestDaemonError> {
        match exchange(self.connector.as_ref(), Request::Pause).await? {
            Response::Pause => Ok(()),
            _ => BadResponseSnafu.fail(),
        }
    }
}
