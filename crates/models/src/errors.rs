use thiserror::Error;

/// Rejected server list. Raised before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("server list is not set")]
    NotSet,

    #[error("server list has an invalid server (empty string) at position {position}. Most likely due to trailing comma.")]
    EmptyAddress { position: usize },
}
