use serde::{Deserialize, Serialize};
use tokio::time::Duration;

/// A [`Protocol`] represents the underlying data type used by the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Protocol {
    Request(Request),
    Response(Response),
}

/// A [`Request`] represents requests from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum Request {
    Start,
    Stop,
    Pause,
    Resume,
    Done,
    Query,
    Configure { key: String, minutes: u32 },
}

/// A [`Response`] represents a daemon's reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum Response {
    Start,
    Stop,
    Pause,
    Resume,
    Done,
    Query {
        phase: String,
        remaining: Duration,
        clock: String,
        completed: u8,
    },
    Configure,
}
