use super::errors::FetchError;
use super::models::StatusResponse;
use std::time::Duration;

type Result<T> = std::result::Result<T, FetchError>;

/// Transport to the status-aggregation service
#[async_trait::async_trait]
pub trait StatusEndpoint: Send + Sync {
    /// One request for the whole batch; `servers` is the comma-joined address list
    async fn query(&self, servers: &str) -> Result<StatusResponse>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// `GET {url}?servers=...` over HTTP
pub struct HttpEndpoint {
    url: String,
    client: reqwest::Client,
}

impl HttpEndpoint {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("qlstatus/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl StatusEndpoint for HttpEndpoint {
    async fn query(&self, servers: &str) -> Result<StatusResponse> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("servers", servers)])
            .send()
            .await?
            .error_for_status()?;

        // Read the body first so a bad payload is reported as a decode error
        let body = response.bytes().await?;
        let parsed: StatusResponse = serde_json::from_slice(&body)?;
        Ok(parsed)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers a single request with a canned response and hands back the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}/info", addr), handle)
    }

    #[tokio::test]
    async fn test_query_sends_joined_servers_parameter() {
        let body = r#"{"error": null, "servers": [{"server":"a:1","name":"Alpha","map":"q3dm6","players":3,"max_players":8,"error":null}]}"#;
        let (url, server) = serve_once("200 OK", body).await;

        let endpoint = HttpEndpoint::new(url, Duration::from_secs(5)).unwrap();
        let response = endpoint.query("a:1,b:2").await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /info?servers=a%3A1%2Cb%3A2 "), "request was: {}", request);

        assert!(response.remote_error().is_none());
        assert_eq!(response.servers.len(), 1);
        assert_eq!(response.servers[0].name.as_deref(), Some("Alpha"));
        assert_eq!(response.servers[0].max_players, Some(8));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (url, server) = serve_once("200 OK", "<html>bad gateway</html>").await;

        let endpoint = HttpEndpoint::new(url, Duration::from_secs(5)).unwrap();
        let err = endpoint.query("a:1").await.unwrap_err();
        let _ = server.await;

        assert!(matches!(err, FetchError::DecodeError(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let (url, server) = serve_once("503 Service Unavailable", "{}").await;

        let endpoint = HttpEndpoint::new(url, Duration::from_secs(5)).unwrap();
        let err = endpoint.query("a:1").await.unwrap_err();
        let _ = server.await;

        assert!(matches!(err, FetchError::BadStatus(503)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_hung_service_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/info", listener.local_addr().unwrap());

        // Accept and never answer
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let endpoint = HttpEndpoint::new(url, Duration::from_millis(200)).unwrap();
        let err = endpoint.query("a:1").await.unwrap_err();
        server.abort();

        assert!(matches!(err, FetchError::Timeout), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/info", listener.local_addr().unwrap());
        drop(listener);

        let endpoint = HttpEndpoint::new(url, Duration::from_secs(5)).unwrap();
        let err = endpoint.query("a:1").await.unwrap_err();

        assert!(matches!(err, FetchError::HttpError(_)), "got {:?}", err);
    }
}
