use qlstatus_models::{DisplayLine, FetchResult, LineStyle, PlayerStyle, ServerRecord};

// Quake colour codes
const RED: &str = "^1";
const GREEN: &str = "^2";
const YELLOW: &str = "^3";

/// Longest server name shown, in characters
pub const NAME_WIDTH: usize = 36;

/// Shown instead of the name of a server that could not be queried
pub const QUERY_ERROR_LABEL: &str = "Error when trying to query^7";

/// Players cell when the server did not report its capacity
pub const UNKNOWN_PLAYERS: &str = "...";

/// Renders a fetch result as a header plus one line per server, or a single
/// error line when the whole batch failed.
pub fn format(result: &FetchResult) -> Vec<DisplayLine> {
    match result {
        FetchResult::Failed { error } => {
            vec![DisplayLine::new(format!("Error: {}", error), LineStyle::FetchError)]
        }
        FetchResult::Servers(records) => {
            let mut lines = Vec::with_capacity(records.len() + 1);
            lines.push(header());
            lines.extend(records.iter().map(format_record));
            lines
        }
    }
}

pub fn header() -> DisplayLine {
    DisplayLine::new(
        format!("{}{:^21} | {:^37} | {:^22}  | {}", YELLOW, "IP", "Server Name", "Map", "Players"),
        LineStyle::Header,
    )
}

pub fn format_record(record: &ServerRecord) -> DisplayLine {
    let (players, player_style) = players_cell(record);

    let (colour, name, style) = if record.is_error() {
        (RED, QUERY_ERROR_LABEL.to_string(), LineStyle::RecordError)
    } else {
        ("", truncate_name(&record.name), LineStyle::Row(player_style))
    };

    DisplayLine::new(
        format!(
            "{}{:21} | {:37} | {:23} | {}",
            colour,
            record.address.as_str(),
            name,
            record.map,
            players
        ),
        style,
    )
}

/// Classifies and renders `players/max_players`
pub fn players_cell(record: &ServerRecord) -> (String, PlayerStyle) {
    if record.max_players == 0 {
        (format!("{}{}", RED, UNKNOWN_PLAYERS), PlayerStyle::Unknown)
    } else if record.players >= record.max_players {
        (format!("{}{}/{}", YELLOW, record.players, record.max_players), PlayerStyle::Full)
    } else {
        (format!("{}{}/{}", GREEN, record.players, record.max_players), PlayerStyle::HasRoom)
    }
}

fn truncate_name(name: &str) -> String {
    name.chars().take(NAME_WIDTH).collect()
}
