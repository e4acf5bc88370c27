use std::sync::Arc;

use snafu::prelude::*;

use crate::client::app::connector::Connector;
use crate::client::outbound::exchange;
use crate::domain::client::outbound::{BadResponseSnafu, RequestDaemonError, StopPort};
use crate::protocol::{Request, Response};

/// A [`StopPort`] implementation over the daemon connection.
pub struct StopService {
    connector: Arc<dyn Connector>,
}

impl StopService {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }
}

#[async_trait::async_trait]
impl StopPort for StopService {
    async fn stop(&self) -> Result<(), RequestDaemonError> {
        match exchange(self.connector.as_ref(), Request::Stop).await? {
            Response::Stop => Ok(()),
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
    async fn stop_service_run() {
        let connector = fake_daemon(Protocol::Response(Response::Stop));
        let service = StopService::new(connector);
        assert!(service.stop().await.is_ok());
    }

    #[tokio::test]
    async fn stop_service_error_bad_response() {
        let connector = fake_daemon(Protocol::Response(Response::Pause));
        let service = StopService::new(connector);
        assert!(matches!(
            service.stop().await,
            Err(RequestDaemonError::BadResponse),
        ));
    }
}
