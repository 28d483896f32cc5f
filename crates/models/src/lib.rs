mod errors;

pub use errors::ConfigurationError;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote game server identifier, usually `host:port`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServerAddress(String);

impl ServerAddress {
    /// Parses a comma-separated server list such as `"1.2.3.4:27960, ql.example.com:27961"`.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, ConfigurationError> {
        let entries: Vec<&str> = raw.split(',').collect();
        Self::from_entries(&entries)
    }

    /// Validates an already split list. Entries are trimmed.
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> Result<Vec<Self>, ConfigurationError> {
        let trimmed: Vec<&str> = entries.iter().map(|e| e.as_ref().trim()).collect();

        // A lone blank entry is what an unset list splits into
        if trimmed.is_empty() || (trimmed.len() == 1 && trimmed[0].is_empty()) {
            return Err(ConfigurationError::NotSet);
        }

        trimmed
            .into_iter()
            .enumerate()
            .map(|(position, entry)| {
                if entry.is_empty() {
                    Err(ConfigurationError::EmptyAddress { position })
                } else {
                    Ok(Self(entry.to_string()))
                }
            })
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins addresses into the single query value sent to the status service.
    pub fn join(addresses: &[ServerAddress]) -> String {
        addresses
            .iter()
            .map(ServerAddress::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl AsRef<str> for ServerAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServerAddress {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_entries(&[value])?
            .pop()
            .ok_or(ConfigurationError::NotSet)
    }
}

impl From<ServerAddress> for String {
    fn from(address: ServerAddress) -> Self {
        address.0
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State of one queried server.
///
/// When `error` is set the remaining fields hold defaults and must not be
/// presented as real values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    pub address: ServerAddress,
    pub name: String,
    pub map: String,
    pub players: u32,
    /// 0 when the server did not report its capacity.
    pub max_players: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerRecord {
    pub fn failed(address: ServerAddress, error: impl Into<String>) -> Self {
        Self {
            address,
            name: String::new(),
            map: String::new(),
            players: 0,
            max_players: 0,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Outcome of one batch status query: a batch-level error or one record per
/// requested address, in request order. Never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Failed { error: String },
    Servers(Vec<ServerRecord>),
}

impl FetchResult {
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed { error: error.into() }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            Self::Servers(_) => None,
        }
    }

    /// Empty for a failed batch.
    pub fn records(&self) -> &[ServerRecord] {
        match self {
            Self::Failed { .. } => &[],
            Self::Servers(records) => records,
        }
    }
}

/// Highlight of the players cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStyle {
    /// Capacity unknown, rendered as a soft error.
    Unknown,
    Full,
    HasRoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Header,
    FetchError,
    RecordError,
    Row(PlayerStyle),
}

/// A rendered line ready for transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    text: String,
    style: LineStyle,
}

impl DisplayLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> LineStyle {
        self.style
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_entries() {
        let addresses = ServerAddress::parse_list("108.61.190.53:27960, il.qlrace.com:27961").unwrap();
        let raw: Vec<_> = addresses.iter().map(ServerAddress::as_str).collect();
        assert_eq!(raw, vec!["108.61.190.53:27960", "il.qlrace.com:27961"]);
    }

    #[test]
    fn test_parse_list_unset() {
        assert_eq!(ServerAddress::parse_list(""), Err(ConfigurationError::NotSet));
        assert_eq!(ServerAddress::parse_list("   "), Err(ConfigurationError::NotSet));
        let none: [&str; 0] = [];
        assert_eq!(ServerAddress::from_entries(&none), Err(ConfigurationError::NotSet));
    }

    #[test]
    fn test_parse_list_trailing_comma() {
        assert_eq!(
            ServerAddress::parse_list("a:1,"),
            Err(ConfigurationError::EmptyAddress { position: 1 })
        );
        assert_eq!(
            ServerAddress::from_entries(&["a:1", "", "b:2"]),
            Err(ConfigurationError::EmptyAddress { position: 1 })
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let address: ServerAddress = serde_json::from_str("\" a:1 \"").unwrap();
        assert_eq!(address.as_str(), "a:1");
        assert_eq!(serde_json::to_string(&address).unwrap(), "\"a:1\"");

        assert!(serde_json::from_str::<ServerAddress>("\"\"").is_err());
        assert!(serde_json::from_str::<ServerRecord>(
            r#"{"address":"","name":"","map":"","players":0,"max_players":0}"#
        )
        .is_err());
    }

    #[test]
    fn test_join() {
        let addresses = ServerAddress::from_entries(&["a:1", "b:2"]).unwrap();
        assert_eq!(ServerAddress::join(&addresses), "a:1,b:2");
    }

    #[test]
    fn test_fetch_result_is_one_or_the_other() {
        let failed = FetchResult::failed("timed out");
        assert_eq!(failed.error(), Some("timed out"));
        assert!(failed.records().is_empty());

        let address = ServerAddress::from_entries(&["a:1"]).unwrap().remove(0);
        let ok = FetchResult::Servers(vec![ServerRecord::failed(address, "down")]);
        assert_eq!(ok.error(), None);
        assert_eq!(ok.records().len(), 1);
        assert!(ok.records()[0].is_error());
    }
}
