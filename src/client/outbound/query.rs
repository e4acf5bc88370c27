use std::sync::Arc;

use snafu::prelude::*;

use crate::client::app::connector::Connector;
use crate::client::outbound::exchange;
use crate::domain::client::outbound::{
    BadResponseSnafu, QueryPort, QueryResponse, RequestDaemonError,
};
use crate::protocol::{Request, Response};

/// A [`QueryPort`] implementation over the daemon connection.
pub struct QueryService {
    connector: Arc<dyn Connector>,
}

impl QueryService {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }
}

#[async_trait::async_trait]
impl QueryPort for QueryService {
    async fn query(&self) -> Result<QueryResponse, RequestDaemonError> {
        match exchange(self.connector.as_ref(), Request::Query).await? {
            Response::Query {
                phase,
                remaining,
                clock,
                completed,
            } => Ok(QueryResponse {
                phase,
                remaining,
                clock,
                completed,
            }),
            _ => BadResponseSnafu.fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::time::Duration;

    use crate::client::outbound::tests::fake_daemon;
    use crate::protocol::Protocol;

    #[tokio::test]
    async fn query_service_run() {
        let connector = fake_daemon(Protocol::Response(Response::Query {
            phase: "Pomodoro (paused)".to_owned(),
            remaining: Duration::from_secs(754),
            clock: "12:34".to_owned(),
            completed: 3,
        }));

        let service = QueryService::new(connector);
        let response = service.query().await.unwrap();
        assert_eq!(response.phase, "Pomodoro (paused)");
        assert_eq!(response.remaining, Duration::from_secs(754));
        assert_eq!(response.clock, "12:34");
        assert_eq!(response.completed, 3);
    }

    #[tokio::test]
    async fn query_service_error_bad_response() {
        let connector = fake_daemon(Protocol::Response(Response::Start));
        let service = QueryService::new(connector);
        assert!(matches!(
            service.query().await,
            Err(RequestDaemonError::BadResponse),
        ));
    }
}
