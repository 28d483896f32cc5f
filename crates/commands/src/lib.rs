mod models;
mod servers;
mod worker;
mod errors;

pub use models::{Caller, Invocation, ServersCommand};
pub use worker::{run_report, spawn_report};
pub use errors::CommandError;
