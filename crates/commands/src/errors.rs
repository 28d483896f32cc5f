use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] qlstatus_models::ConfigurationError),

    #[error("Delivery failed: {0}")]
    Sink(#[from] qlstatus_report::SinkError),
}
