use super::endpoint::{HttpEndpoint, StatusEndpoint};
use super::errors::FetchError;
use super::models::{ServerEntry, StatusFetcher, StatusResponse};
use qlstatus_models::{ConfigurationError, FetchResult, ServerAddress, ServerRecord};
use std::sync::Arc;
use std::time::Duration;

/// Record error for an address the service said nothing about
pub const NO_RESPONSE: &str = "no response from status service";

impl StatusFetcher {
    pub fn new(endpoint: Arc<dyn StatusEndpoint>) -> Self {
        Self { endpoint }
    }

    /// Fetcher backed by the HTTP status service
    pub fn http(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self::new(Arc::new(HttpEndpoint::new(url, timeout)?)))
    }

    pub fn endpoint(&self) -> String {
        self.endpoint.describe()
    }

    /// Queries the status of every address in one request.
    ///
    /// An empty list or an empty entry is rejected before anything is sent.
    /// Transport and service failures come back as [`FetchResult::Failed`];
    /// otherwise there is exactly one record per address, in input order.
    pub async fn fetch<S: AsRef<str>>(&self, addresses: &[S]) -> Result<FetchResult, ConfigurationError> {
        let addresses = ServerAddress::from_entries(addresses)?;
        let query = ServerAddress::join(&addresses);

        tracing::debug!("Querying {} for {} server(s)", self.endpoint.describe(), addresses.len());

        let result = match self.endpoint.query(&query).await {
            Ok(response) => normalize(&addresses, response),
            Err(e) => {
                tracing::debug!("Status query to {} failed: {}", self.endpoint.describe(), e);
                FetchResult::failed(e.to_string())
            }
        };

        Ok(result)
    }
}

/// Lines the service answer up with the request.
///
/// Entries are matched by their `server` field first; entries that do not echo
/// a requested address fill the remaining slots in order. Slots still empty
/// after that become per-record errors.
pub fn normalize(requested: &[ServerAddress], response: StatusResponse) -> FetchResult {
    if let Some(error) = response.remote_error() {
        tracing::debug!("Status service reported an error: {}", error);
        return FetchResult::failed(FetchError::RemoteError(error).to_string());
    }

    let mut slots: Vec<Option<ServerEntry>> = requested.iter().map(|_| None).collect();
    let mut unmatched = Vec::new();

    for entry in response.servers {
        let slot = (0..requested.len()).find(|&i| {
            slots[i].is_none() && entry.server.as_deref() == Some(requested[i].as_str())
        });
        match slot {
            Some(i) => slots[i] = Some(entry),
            None => unmatched.push(entry),
        }
    }

    let mut leftovers = unmatched.into_iter();
    for slot in slots.iter_mut().filter(|s| s.is_none()) {
        match leftovers.next() {
            Some(entry) => *slot = Some(entry),
            None => break,
        }
    }

    let dropped = leftovers.count();
    if dropped > 0 {
        tracing::debug!("Ignored {} unrequested server(s) in status response", dropped);
    }

    let records = requested
        .iter()
        .zip(slots)
        .map(|(address, slot)| match slot {
            Some(entry) => entry.into_record(address.clone()),
            None => ServerRecord::failed(address.clone(), NO_RESPONSE),
        })
        .collect();

    FetchResult::Servers(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Endpoint with a canned answer that remembers what it was asked
    struct CannedEndpoint {
        answer: Mutex<Option<Result<StatusResponse, FetchError>>>,
        calls: AtomicUsize,
        last_query: Mutex<Option<String>>,
    }

    impl CannedEndpoint {
        fn new(answer: Result<StatusResponse, FetchError>) -> Arc<Self> {
            Arc::new(Self {
                answer: Mutex::new(Some(answer)),
                calls: AtomicUsize::new(0),
                last_query: Mutex::new(None),
            })
        }

        fn json(body: &str) -> Arc<Self> {
            Self::new(Ok(serde_json::from_str(body).unwrap()))
        }
    }

    #[async_trait::async_trait]
    impl StatusEndpoint for CannedEndpoint {
        async fn query(&self, servers: &str) -> Result<StatusResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(servers.to_string());
            self.answer
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(FetchError::HttpError("already answered".to_string())))
        }

        fn describe(&self) -> String {
            "canned".to_string()
        }
    }

    #[tokio::test]
    async fn test_empty_entry_rejected_without_network() {
        let endpoint = CannedEndpoint::json(r#"{"error": null, "servers": []}"#);
        let fetcher = StatusFetcher::new(endpoint.clone());

        let err = fetcher.fetch(&["a:1", ""]).await.unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyAddress { position: 1 });

        let none: [&str; 0] = [];
        assert_eq!(fetcher.fetch(&none).await.unwrap_err(), ConfigurationError::NotSet);

        assert_eq!(endpoint.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_records_follow_request_order() {
        // Service answers in a different order than asked
        let endpoint = CannedEndpoint::json(
            r#"{"error": null, "servers": [
                {"server":"b:2","name":"Beta","map":"q3dm17","players":8,"max_players":8,"error":null},
                {"server":"a:1","name":"Alpha","map":"q3dm6","players":3,"max_players":8,"error":null}
            ]}"#,
        );
        let fetcher = StatusFetcher::new(endpoint.clone());

        let result = fetcher.fetch(&["a:1", "b:2"]).await.unwrap();
        let names: Vec<_> = result.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta"]);

        assert_eq!(endpoint.calls.load(Ordering::SeqCst), 1);
        assert_eq!(endpoint.last_query.lock().unwrap().as_deref(), Some("a:1,b:2"));
    }

    #[tokio::test]
    async fn test_per_server_error_keeps_batch() {
        let endpoint = CannedEndpoint::json(
            r#"{"servers": [
                {"server":"a:1","name":"Alpha","map":"campgrounds","players":0,"max_players":16,"error":null},
                {"server":"b:2","error":"timed out"}
            ]}"#,
        );
        let fetcher = StatusFetcher::new(endpoint);

        let result = fetcher.fetch(&["a:1", "b:2"]).await.unwrap();
        let records = result.records();
        assert_eq!(records.len(), 2);
        assert!(!records[0].is_error());
        assert_eq!(records[1].error.as_deref(), Some("timed out"));
        assert_eq!(records[1].map, "");
        assert_eq!(records[1].max_players, 0);
    }

    #[tokio::test]
    async fn test_missing_server_becomes_record_error() {
        let endpoint = CannedEndpoint::json(
            r#"{"error": null, "servers": [
                {"server":"a:1","name":"Alpha","map":"q3dm6","players":1,"max_players":8}
            ]}"#,
        );
        let fetcher = StatusFetcher::new(endpoint);

        let result = fetcher.fetch(&["a:1", "c:3"]).await.unwrap();
        let records = result.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].address.as_str(), "c:3");
        assert_eq!(records[1].error.as_deref(), Some(NO_RESPONSE));
    }

    #[tokio::test]
    async fn test_unechoed_entries_fill_in_order() {
        // Service resolved the hostname and echoes the IP instead
        let endpoint = CannedEndpoint::json(
            r#"{"error": null, "servers": [
                {"server":"a:1","name":"Alpha","map":"q3dm6","players":1,"max_players":8},
                {"server":"10.0.0.7:27960","name":"Race","map":"pornstarbath","players":2,"max_players":20}
            ]}"#,
        );
        let fetcher = StatusFetcher::new(endpoint);

        let result = fetcher.fetch(&["il.qlrace.com:27960", "a:1"]).await.unwrap();
        let records = result.records();
        assert_eq!(records[0].address.as_str(), "il.qlrace.com:27960");
        assert_eq!(records[0].name, "Race");
        assert_eq!(records[1].name, "Alpha");
    }

    #[tokio::test]
    async fn test_remote_error_fails_batch() {
        let endpoint = CannedEndpoint::json(r#"{"error": "too many servers", "servers": []}"#);
        let fetcher = StatusFetcher::new(endpoint);

        let result = fetcher.fetch(&["a:1"]).await.unwrap();
        assert_eq!(result.error(), Some("status service error: too many servers"));
        assert!(result.records().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_fails_batch() {
        let endpoint = CannedEndpoint::new(Err(FetchError::Timeout));
        let fetcher = StatusFetcher::new(endpoint);

        let result = fetcher.fetch(&["a:1", "b:2"]).await.unwrap();
        assert_eq!(result.error(), Some("status service timed out"));
        assert!(result.records().is_empty());
    }

    #[test]
    fn test_null_fields_default() {
        let response: StatusResponse = serde_json::from_str(
            r#"{"error": false, "servers": [{"server":"a:1","name":null,"players":null,"error":""}]}"#,
        )
        .unwrap();
        let requested = ServerAddress::from_entries(&["a:1"]).unwrap();

        let result = normalize(&requested, response);
        let record = &result.records()[0];
        assert_eq!(record.name, "");
        assert_eq!(record.map, "");
        assert_eq!(record.players, 0);
        assert!(!record.is_error());
    }
}
