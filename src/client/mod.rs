//! Access to the local client's control API
//!
//! This module locates the running client, extracts its connection
//! credentials, and talks to its HTTP API.

pub mod api;
pub mod discovery;

pub use api::{ControlApi, HttpControlApi};
pub use discovery::{discover_credentials, parse_credentials, resolve_credentials, ClientCredentials};
