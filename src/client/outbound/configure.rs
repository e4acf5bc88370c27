use std::sync::Arc;

use snafu::prelude::*;

use crate::client::app::connector::Connector;
use crate::client::outbound::exchange;
use crate::domain::client::outbound::{BadResponseSnafu, ConfigurePort, RequestDaemonError};
use crate::domain::entity::DurationKind;
use crate::protocol::{Request, Response};

/// A [`ConfigurePort`] implementation over the daemon connection.
pub struct ConfigureService {
    connector: Arc<dyn Connector>,
}

impl ConfigureService {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }
}

#[async_trait::async_trait]
impl ConfigurePort for ConfigureService {
    async fn configure(&self, kind: DurationKind, minutes: u32) -> Result<(), RequestDaemonError> {
        let request = Request::Configure {
            key: kind.key().to_owned(),
            minutes,
        };

        match exchange(self.connector.as_ref(), request).await? {
            Response::Configure => Ok(()),
            _ => BadResponseSnafu.fail(),
        }
    }
}
