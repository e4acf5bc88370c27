use std::sync::Arc;

use snafu::prelude::*;

use crate::client::app::connector::Connector;
use crate::client::outbound::exchange;
use crate::domain::client::outbound::{BadResponseSnafu, RequestDaemonError, ResumePort};
use crate::protocol::{Request, Response};

/// A [`ResumePort`] implementation over the daemon connection.
pub struct ResumeService {
    connector: Arc<dyn Connector>,
}

impl ResumeService {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }
}

#[async_trait::async_trait]
impl ResumePort for ResumeService {
    async fn resume(&self) -> Result<(), RequestDaemonError> {
        match exchange(self.connector.as_ref(), Request::Resume).await? {
            Response::Resume => Ok(()),
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
    async fn resume_service_run() {
        let connector = fake_daemon(Protocol::Response(Response::Resume));
        let service = ResumeService::new(connector);
        assert!(service.resume().await.is_ok());
    }

    #[tokio::test]
    async fn resume_service_error_bad_response() {
        let connector = fake_daemon(Protocol::Response(Response::Start));
        let service = ResumeService::new(connector);
        assert!(matches!(
            service.resume().await,
            Err(RequestDaemonError::BadResponse),
        ));
    }
}
