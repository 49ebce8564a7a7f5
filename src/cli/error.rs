use std::fmt;

use crate::connectors::ConnectorError;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CliError: failures surfaced by the userdesk binary
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug)]
pub enum CliError {
    // Config errors
    ConfigLoad(config::ConfigError),
    InvalidArgument { name: String, reason: String },

    // Runtime errors
    Runtime(std::io::Error),
    Connector(ConnectorError),

    // Page errors
    PageUnavailable(String),
    MutationFailed(String),
    MutationRejected(String),

    // Output errors
    Serialize(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigLoad(err) => write!(f, "Failed to load configuration: {err}"),
            Self::InvalidArgument { name, reason } => {
                write!(f, "Invalid value for {name}: {reason}")
            }
            Self::Runtime(err) => write!(f, "Failed to create async runtime: {err}"),
            Self::Connector(err) => write!(f, "{err}"),
            Self::PageUnavailable(msg) => write!(f, "{msg}"),
            Self::MutationFailed(msg) => write!(f, "{msg}"),
            Self::MutationRejected(msg) => write!(f, "Form rejected: {msg}"),
            Self::Serialize(err) => write!(f, "Failed to render JSON: {err}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigLoad(err)
    }
}

impl From<ConnectorError> for CliError {
    fn from(err: ConnectorError) -> Self {
        Self::Connector(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_messages_pass_through_verbatim() {
        let err = CliError::PageUnavailable("Failed to fetch users".to_string());
        assert_eq!(err.to_string(), "Failed to fetch users");
    }

    #[test]
    fn test_invalid_argument_names_the_flag() {
        let err = CliError::InvalidArgument {
            name: "--role".to_string(),
            reason: "unknown role 'owner'".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value for --role: unknown role 'owner'");
    }
}
