//! Camera upload ingestion and live-view fan-out.
//!
//! Uploads are decoded, classified as `scan` (something was recognized) or
//! `prev` (plain live view), queued per channel, and pushed to connected
//! viewers by one dispatcher task per channel. The two channels never wait on
//! each other.

pub mod arguments;
pub mod broadcaster;
pub mod channel;
pub mod config;
pub mod dispatcher;
pub mod event;
pub mod ingest;
pub mod queue;
pub mod server;
pub mod service;
