use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] qlstatus_config::ConfigError),

    #[error("Notify error: {0}")]
    NotifyError(#[from] notify::Error),
}
