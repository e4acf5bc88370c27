mod configure;
mod done;
mod init;
mod pause;
mod query;
mod resume;
mod start;
mod stop;

pub use configure::ConfigureService;
pub use done::DoneService;
pub use init::InitService;
pub use pause::PauseService;
pub use query::QueryService;
pub use resume::ResumeService;
pub use start::StartService;
pub use stop::StopService;

use snafu::prelude::*;

use crate::client::app::connector::{ConnectError, Connector};
use crate::domain::client::outbound::{BadResponseSnafu, RequestDaemonError, UnavailableSnafu};
use crate::protocol::{Connection, Protocol, Request, Response};

/// One request-response round trip with the daemon, shared by all services.
async fn exchange(
    connector: &dyn Connector,
    request: Request,
) -> Result<Response, RequestDaemonError> {
    let stream = match connector.connect().await {
        Ok(stream) => stream,
        Err(ConnectError::Unavailable { endpoint }) => return UnavailableSnafu { endpoint }.fail(),
        Err(err) => return Err(err).whatever_context("Could not connect"),
    };

    let mut connection = Connection::from(stream);

    connection
        .send(Protocol::Request(request).into())
        .await
        .whatever_context("Could not send request")?;

    let response: Protocol = connection
        .receive()
        .await
        .whatever_context("Could not receive response")?
        .into();

    match response {
        Protocol::Response(response) => Ok(response),
        _ => BadResponseSnafu.fail(),
    }
}
