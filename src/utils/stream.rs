use tokio::io::{AsyncRead, AsyncWrite, DuplexStream};
use tokio::net::UnixStream;

/// Marker for byte streams the protocol layer can drive, regardless of
/// whether they are real sockets or in-memory pipes.
pub trait Stream: AsyncRead + AsyncWrite + Unpin + Send {}

impl Stream for UnixStream {}

impl Stream for DuplexStream {}

impl Stream for Box<dyn Stream> {}
