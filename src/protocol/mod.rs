pub mod connection;

mod data;
mod frame;

pub use connection::Connection;
pub use data::{Protocol, Request, Response};
pub use frame::{Frame, ParseFrameError, WriteFrameError};
