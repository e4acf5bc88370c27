use std::io::{Error as IoError, ErrorKind as IoErrorKind};
use std::path::Path;
use std::sync::Arc;

use snafu::prelude::*;
use tokio::io::DuplexStream;
use tokio::net::UnixListener as TokioUnixListener;
use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::utils::stream::Stream;

/// Abstract listener which accepts incoming connections on some endpoint.
#[async_trait::async_trait]
pub trait Listener: Send + Sync {
    /// Accept one connection and return its stream.
    ///
    /// # Errors
    ///
    /// This function will return an error if the connection fails to
    /// establish.
    async fn accept(&self) -> Result<Box<dyn Stream>, ListenError>;
}

/// An error for the listening procedure.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ListenError {
    #[snafu(display("Could not bind to occupied endpoint {endpoint}"))]
    InUse { endpoint: String },
    #[snafu(display("Could not bind due to system error"))]
    BindSystem {
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
    #[snafu(display("Could not bind: {message}"))]
    BindUnknown { message: String },
    #[snafu(display("Could not accept connection due to system error"))]
    AcceptSystem {
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}

/// A [`Listener`] implementation over a UNIX domain socket.
#[derive(Debug)]
pub struct UnixListener {
    listener: TokioUnixListener,
}

impl UnixListener {
    /// Bind a [`UnixListener`] to the given socket path.
    ///
    /// # Errors
    ///
    /// This function will return an error if it fails to bind to the socket.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ListenError> {
        match TokioUnixListener::bind(path.as_ref()) {
            Ok(listener) => Ok(Self { listener }),
            Err(err) => match err.kind() {
                IoErrorKind::AddrInUse => InUseSnafu {
                    endpoint: path.as_ref().to_string_lossy(),
                }
                .fail(),
                _ => Err(err).context(BindSystemSnafu),
            },
        }
    }
}

#[async_trait::async_trait]
impl Listener for UnixListener {
    async fn accept(&self) -> Result<Box<dyn Stream>, ListenError> {
        self.listener
            .accept()
            .await
            .map(|(stream, _)| -> Box<dyn Stream> { Box::new(stream) })
            .context(AcceptSystemSnafu)
    }
}

impl From<TokioUnixListener> for UnixListener {
    fn from(value: TokioUnixListener) -> Self {
        Self { listener: value }
    }
}

/// A [`Listener`] implementation handing out in-memory [`DuplexStream`]s.
/// This is typically used for testing purposes.
#[derive(Debug)]
pub struct DuplexListener {
    peer: Sender<DuplexStream>,
    buffer_size: usize,
}

impl DuplexListener {
    /// Create a [`DuplexListener`] and the channel receiver on which the
    /// peer halves of accepted connections arrive.
    pub fn new(buffer_size: usize) -> (Self, Receiver<DuplexStream>) {
        let (sender, receiver) = mpsc::channel(1);
        let listener = Self {
            peer: sender,
            buffer_size,
        };
        (listener, receiver)
    }
}

#[async_trait::async_trait]
impl Listener for DuplexListener {
    async fn accept(&self) -> Result<Box<dyn Stream>, ListenError> {
        let (local, peer) = tokio::io::duplex(self.buffer_size);
        self.peer.send(peer).await.map_err(|_| {
            BindUnknownSnafu {
                message: "Peer already closed",
            }
            .build()
        })?;
        Ok(Box::new(local))
    }
}
