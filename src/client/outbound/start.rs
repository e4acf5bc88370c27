use std::sync::Arc;

use snafu::prelude::*;

use crate::client::app::connector::Connector;
use crate::client::outbound::exchange;
use crate::domain::client::outbound::{BadResponseSnafu, RequestDaemonError, StartPort};
use crate::protocol::{Request, Response};

/// A [`StartPort`] implementation over the daemon connection.
pub struct StartService {
    connector: Arc<dyn Connector>,
}

impl StartService {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }
}

#[async_trait::async_trait]
impl StartPort for StartService {
    async fn start(&self) -> Result<(), RequestDaemonError> {
        match exchange(self.connector.as_ref(), Request::Start).await? {
            Response::Start => Ok(()),
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
    async fn start_service_run() {
        let connector = fake_daemon(Protocol::Response(Response::Start));
        let service = StartService::new(connector);
        assert!(service.start().await.is_ok());
    }

    #[tokio::test]
    async fn start_service_error_bad_response() {
        let connector = fake_daemon(Protocol::Response(Response::Stop));
        let service = StartService::new(connector);
        assert!(matches!(
            service.start().await,
            Err(RequestDaemonError::BadResponse),
        ));
    }
}
