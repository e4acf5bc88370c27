use bytes::{Buf, BytesMut};
use snafu::prelude::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt, Error as IoError};

use crate::protocol::frame::{Frame, ParseFrameError, WriteFrameError};
use crate::utils::stream::Stream;

/// A wrapper of a stream (typically a socket) which sends and receives whole
/// [`Frame`]s, buffering partial reads in between.
pub struct Connection<S: Stream> {
    stream: S,
    buffer: BytesMut,
}

impl<S: Stream> Connection<S> {
    /// Serialize a [`Frame`] and send it through the wrapped stream.
    ///
    /// # Errors
    ///
    /// This function will return an error if serialization or stream IO
    /// fails.
    pub async fn send(&mut self, frame: Frame) -> Result<(), SendFrameError> {
        let mut buffer = BytesMut::with_capacity(256);
        frame.write(&mut buffer).context(EncodeSnafu)?;
        self.stream.write_all(&buffer).await.context(SendIoSnafu)?;
        Ok(())
    }

    /// Receive bytes from the wrapped stream until they form a complete
    /// [`Frame`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the peer closes early, the data
    /// is broken, or stream IO fails.
    pub async fn receive(&mut self) -> Result<Frame, ReceiveFrameError> {
        loop {
            match Frame::parse(&self.buffer[..]) {
                Ok((frame, offset)) => {
                    self.buffer.advance(offset);
                    return Ok(frame);
                }
                Err(ParseFrameError::Incomplete) => {}
                Err(err) => return Err(err).context(DecodeSnafu),
            }

            match self.stream.read_buf(&mut self.buffer).await {
                Ok(0) => return ClosedSnafu.fail(),
                Ok(_) => {}
                Err(err) => return Err(err).context(ReceiveIoSnafu),
            }
        }
    }
}

impl<S: Stream> From<S> for Connection<S> {
    fn from(value: S) -> Self {
        Self {
            stream: value,
            buffer: BytesMut::with_capacity(1024),
        }
    }
}

/// An error type for sending a [`Frame`] through a connection.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SendFrameError {
    #[snafu(display("Could not encode frame"))]
    Encode { source: WriteFrameError },
    #[snafu(display("Could not send bytes through the inner stream"))]
    SendIo { source: IoError },
}

/// An error type for receiving a [`Frame`] from a connection.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ReceiveFrameError {
    #[snafu(display("Could not decode frame"))]
    Decode { source: ParseFrameError },
    #[snafu(display("Connection closed before a whole frame arrived"))]
    Closed,
    #[snafu(display("Could not receive bytes from the inner stream"))]
    ReceiveIo { source: IoError },
}
