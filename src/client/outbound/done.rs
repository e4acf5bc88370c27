use std::sync::Arc;

use snafu::prelude::*;

use crate::client::app::connector::Connector;
use crate::client::outbound::exchange;
use crate::domain::client::outbound::{BadResponseSnafu, DonePort, RequestDaemonError};
use crate::protocol::{Request, Response};

/// A [`DonePort`] implementation over the daemon connection.
pub struct DoneService {
    connector: Arc<dyn Connector>,
}

impl DoneService {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }
}

#[async_trait::async_trait]
impl DonePort for DoneService {
    async fn mark_done(&self) -> Result<(), RequestDaemonError> {
        match exchange(self.connector.as_ref(), Request::Done).await? {
            Response::Done => Ok(()),
            _ => BadResponseSnafu.fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::client::outbound::tests::fake_daemon;
    use crate::protocol::Protocol;

    #[tokio::test]
    async fn done_service_run() {
        let connector = fake_daemon(Protocol::Response(Response::Done));
        let service = DoneService::new(connector);
        assert!(service.mark_done().await.is_ok());
    }

    #[tokio::test]
    async fn done_service_error_bad_response() {
        let connector = fake_daemon(Protocol::Response(Response::Stop));
        let service = DoneService::new(connector);
        assert!(matches!(
            service.mark_done().await,
            Err(RequestDaemonError::BadResponse),
        ));
    }
}
