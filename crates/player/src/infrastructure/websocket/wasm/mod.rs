//! WASM WebSocket implementation using web-sys

mod client;

pub use client::run_transport;
