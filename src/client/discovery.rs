//! Connection credentials of the running client
//!
//! The client publishes its API port and a per-session auth token on its own
//! command line, so both are read from the process list.

use crate::config::ClientSettings;
use crate::error::LobbyError;
use std::fmt;
use sysinfo::System;
use tracing::{debug, info};

const APP_PORT_FLAG: &str = "--app-port=";
const AUTH_TOKEN_FLAG: &str = "--remoting-auth-token=";

/// Port and token for the local control API
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub port: u16,
    pub token: String,
}

// Keep the token out of logs
impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("port", &self.port)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Extract port and token from the client's command line arguments
///
/// When a flag is repeated the last occurrence wins.
pub fn parse_credentials<S: AsRef<str>>(args: &[S]) -> Result<ClientCredentials, LobbyError> {
    let mut port = None;
    let mut token = None;

    for arg in args.iter().map(AsRef::as_ref) {
        if let Some(value) = arg.strip_prefix(APP_PORT_FLAG) {
            port = Some(value);
        } else if let Some(value) = arg.strip_prefix(AUTH_TOKEN_FLAG) {
            token = Some(value);
        }
    }

    let (port, token) = match (port, token) {
        (Some(port), Some(token)) if !token.is_empty() => (port, token),
        _ => {
            return Err(LobbyError::CredentialsNotFound {
                reason: format!("expected both {APP_PORT_FLAG} and {AUTH_TOKEN_FLAG}"),
            })
        }
    };

    let port = port
        .parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| LobbyError::CredentialsNotFound {
            reason: format!("invalid app port \"{port}\""),
        })?;

    Ok(ClientCredentials {
        port,
        token: token.to_string(),
    })
}

/// Find the client process by name and read its credentials
pub fn discover_credentials(process_name: &str) -> Result<ClientCredentials, LobbyError> {
    let mut system = System::new();
    system.refresh_processes();

    let process = system
        .processes()
        .values()
        .find(|process| process.name() == process_name)
        .ok_or_else(|| LobbyError::ProcessNotFound {
            process_name: process_name.to_string(),
        })?;

    debug!("Found {} with pid {}", process_name, process.pid());
    parse_credentials(process.cmd())
}

/// Use configured credentials when both are present, otherwise discover them
pub fn resolve_credentials(settings: &ClientSettings) -> Result<ClientCredentials, LobbyError> {
    match (settings.port, &settings.auth_token) {
        (Some(port), Some(token)) => {
            info!("Using configured client credentials on port {}", port);
            Ok(ClientCredentials {
                port,
                token: token.clone(),
            })
        }
        _ => {
            let credentials = discover_credentials(&settings.process_name)?;
            info!(
                "Discovered {} on port {}",
                settings.process_name, credentials.port
            );
            Ok(credentials)
        }
    }
}
