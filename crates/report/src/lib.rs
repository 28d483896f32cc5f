mod formatter;
mod reporter;
mod sink;
mod errors;

pub use formatter::{format, format_record, header, players_cell, NAME_WIDTH, QUERY_ERROR_LABEL, UNKNOWN_PLAYERS};
pub use reporter::{deliver, Pacing};
pub use sink::{relay, BroadcastSink, Destination, Outbound, Relay, Sink, TellSink};
pub use errors::SinkError;
