//! API Client
//!
//! HTTP/JSON communication with the habit server.

pub mod client;

pub use client::*;
