use std::sync::Arc;

use snafu::prelude::*;
use tracing::{field::Empty, Instrument, Span};

use crate::daemon::app::listener::{ListenError, Listener};
use crate::domain::daemon::ApplicationCore;
use crate::domain::entity::DurationKind;
use crate::protocol::connection::{ReceiveFrameError, SendFrameError};
use crate::protocol::{Connection, Protocol, Request, Response};
use crate::tracing_report;
use crate::utils::stream::Stream;

/// A dedicated server which accepts client connections and dispatches their
/// requests to the application core.
pub struct Server {
    listener: Box<dyn Listener>,
    core: Arc<ApplicationCore>,
}

impl Server {
    /// Creates a new [`Server`].
    pub fn new(listener: Box<dyn Listener>, core: ApplicationCore) -> Self {
        Self {
            listener,
            core: Arc::new(core),
        }
    }

    /// Accept connections and handle their requests until accepting fails.
    ///
    /// # Errors
    ///
    /// This function will return an error if the server fails to accept
    /// connections.
    #[tracing::instrument(skip(self))]
    pub async fn serve(&self) -> Result<(), ServerError> {
        loop {
            let stream = match self.listener.accept().await {
                Ok(stream) => {
                    tracing::info!("Accepted connection");
                    stream
                }
                Err(err) => {
                    tracing_report!(err);
                    return Err(err).context(ListenSnafu);
                }
            };

            let core = Arc::clone(&self.core);
            let connection = Connection::from(stream);

            let span = tracing::info_span!("handle", req = Empty).or_current();
            tokio::spawn(
                async move {
                    if let Err(err) = Self::handle(core, connection).await {
                        tracing_report!(err, "Could not handle request");
                    }
                }
                .instrument(span),
            );
        }
    }

    /// Handle one request from an accepted connection.
    ///
    /// # Errors
    ///
    /// This function will return an error if handling the connection fails.
    async fn handle<S: Stream>(
        core: Arc<ApplicationCore>,
        mut connection: Connection<S>,
    ) -> Result<(), ServerError> {
        let request = match connection.receive().await {
            Ok(frame) => match Protocol::from(frame) {
                Protocol::Request(request) => request,
                protocol => return BadRequestSnafu { protocol }.fail(),
            },
            Err(err) => return Err(err).context(ReceiveSnafu),
        };

        Span::current().record("req", format!("{request:?}"));
        tracing::info!("Received request");

        let response = match request {
            Request::Start => {
                core.start.start().await;
                Response::Start
            }
            Request::Stop => {
                core.stop.stop().await;
                Response::Stop
            }
            Request::Pause => {
                core.pause.pause().await;
                Response::Pause
            }
            Request::Resume => {
                core.resume.resume().await;
                Response::Resume
            }
            Request::Done => {
                core.done.mark_done().await;
                Response::Done
            }
            Request::Configure { key, minutes } => {
                match DurationKind::from_key(&key) {
                    Some(kind) => core.configure.configure(kind, minutes).await,
                    None => tracing::warn!(key, "Ignored unknown duration key"),
                }
                Response::Configure
            }
            Request::Query => {
                let response = core.query.query().await;
                Response::Query {
                    phase: response.phase,
                    remaining: response.remaining,
                    clock: response.clock,
                    completed: response.completed,
                }
            }
        };
        tracing::info!("Handled request");

        connection
            .send(Protocol::Response(response).into())
            .await
            .context(SendSnafu)
            .inspect(|_| tracing::info!("Sent response"))
    }
}

/// An error type for the server.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ServerError {
    #[snafu(display("Could not accept a connection"))]
    Listen { source: ListenError },
    #[snafu(display("Could not receive a request"))]
    Receive { source: ReceiveFrameError },
    #[snafu(display("Could not handle {protocol:?}"))]
    BadRequest { protocol: Protocol },
    #[snafu(display("Could not send a response"))]
    Send { source: SendFrameError },
}
