//! A pomodoro timer split into a background daemon and a thin CLI client.
//!
//! The daemon owns the countdown engine and publishes its state changes on an
//! event bus; the client talks to it over a UNIX socket. Domain logic lives in
//! [`domain`], engine-independent of any transport or presentation concern.

pub mod client;
pub mod daemon;
pub mod domain;
pub mod protocol;
pub mod utils;
