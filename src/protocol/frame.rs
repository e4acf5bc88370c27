use bytes::{Buf, BufMut};
use serde_json::Error as SerdeError;
use snafu::prelude::*;

use crate::protocol::data::Protocol;

/// Leading marker of every frame on the wire.
const FRAME_START: u8 = b'@';

/// A wrapper of [`Protocol`] converting the inner data from and to bytes so
/// it can travel over a byte stream.
///
/// On the wire a [`Frame`] is a `b'@'` marker, a big-endian `u32` payload
/// length, and that many bytes of JSON payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: Protocol,
}

impl Frame {
    /// Parse a [`Frame`] from a prefix of `buf`, returning it together with
    /// the number of bytes consumed.
    ///
    /// The cursor may have advanced even on failure; its position is only
    /// meaningful when parsing succeeds.
    ///
    /// # Errors
    ///
    /// This function will return an error if the buffered bytes do not hold
    /// a complete frame yet or the payload is broken.
    pub fn parse<B: Buf>(mut buf: B) -> Result<(Self, usize), ParseFrameError> {
        ensure!(buf.remaining() >= 1, IncompleteSnafu);
        ensure!(buf.get_u8() == FRAME_START, InvalidStartSnafu);

        ensure!(buf.remaining() >= 4, IncompleteSnafu);
        let len = buf.get_u32() as usize;
        ensure!(len > 0, InvalidLengthSnafu);

        ensure!(buf.remaining() >= len, IncompleteSnafu);
        let reader = buf.take(len).reader();
        let data: Protocol = serde_json::from_reader(reader).context(DeserializationSnafu)?;

        Ok((data.into(), 5 + len))
    }

    /// Serialize this [`Frame`] and append it to `buf`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the serialization fails.
    pub fn write<B: BufMut>(&self, mut buf: B) -> Result<(), WriteFrameError> {
        let payload = serde_json::to_vec(&self.data).context(SerializationSnafu)?;
        buf.put_u8(FRAME_START);
        buf.put_u32(payload.len() as u32);
        buf.put_slice(&payload);
        Ok(())
    }
}

impl From<Protocol> for Frame {
    fn from(value: Protocol) -> Self {
        Self { data: value }
    }
}

impl From<Frame> for Protocol {
    fn from(value: Frame) -> Self {
        value.data
    }
}

/// An error type for parsing a [`Frame`] from bytes.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ParseFrameError {
    #[snafu(display("Could not parse a frame with incomplete data"))]
    Incomplete,
    #[snafu(display("Could not parse the start marker"))]
    InvalidStart,
    #[snafu(display("The payload length should be non-zero"))]
    InvalidLength,
    #[snafu(display("Could not deserialize payload"))]
    Deserialization { source: SerdeError },
}

/// An error type for writing a [`Frame`] to bytes.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum WriteFrameError {
    #[snafu(display("Could not serialize frame"))]
    Serialization { source: SerdeError },
}
