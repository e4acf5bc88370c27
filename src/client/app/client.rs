use std::sync::Arc;

use snafu::prelude::*;

use crate::client::app::command::{Command, StatusArguments};
use crate::domain::client::outbound::{InitDaemonError, RequestDaemonError};
use crate::domain::client::ApplicationCore;

/// Main business logic implementation on the client side.
pub struct Client {
    core: Arc<ApplicationCore>,
}

impl Client {
    /// Creates a new [`Client`].
    pub fn new(core: Arc<ApplicationCore>) -> Self {
        Self { core }
    }

    /// Run the requested `command` against the daemon.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request fails.
    pub async fn run(&self, command: Command) -> Result<(), ClientError> {
        match command {
            Command::Init => self.core.init.init().await.context(InitDaemonSnafu),
            Command::Start => self.core.start.start().await.context(RequestSnafu),
            Command::Stop => self.core.stop.stop().await.context(RequestSnafu),
            Command::Pause => self.core.pause.pause().await.context(RequestSnafu),
            Command::Resume => self.core.resume.resume().await.context(RequestSnafu),
            Command::Done => self.core.done.mark_done().await.context(RequestSnafu),
            Command::Status(args) => self.status(args).await,
            Command::Set { kind, minutes } => self
                .core
                .configure
                .configure(kind, minutes)
                .await
                .context(RequestSnafu),
        }
    }

    /// Query the daemon and print the selected fields as aligned
    /// `key = value` lines.
    async fn status(&self, args: StatusArguments) -> Result<(), ClientError> {
        let response = self.core.query.query().await.context(RequestSnafu)?;
        let enable_all = !args.phase && !args.remaining && !args.completed;
        let mut outputs = Vec::new();

        if enable_all || args.phase {
            outputs.push(("Phase".to_owned(), response.phase));
        }

        if enable_all || args.remaining {
            let value = format!("{} ({}s)", response.clock, response.remaining.as_secs());
            outputs.push(("Remaining".to_owned(), value));
        }

        if enable_all || args.completed {
            outputs.push(("Completed".to_owned(), response.completed.to_string()));
        }

        let key_align = outputs
            .iter()
            .map(|(key, _)| key.len())
            .max()
            .unwrap_or_default();

        for (mut key, value) in outputs {
            let padding = " ".repeat(key_align - key.len());
            key.push_str(&padding);
            println!("{key} = {value}");
        }

        Ok(())
    }
}

/// An error for the client's operations.
#[derive(Debug, Snafu)]
pub enum ClientError {
    #[snafu(display("Could not initialize daemon"))]
    InitDaemon { source: InitDaemonError },
    #[snafu(display("Could not request daemon"))]
    Request { source: RequestDaemonError },
}
