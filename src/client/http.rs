//! HTTP implementation of [`LogSource`] using a blocking reqwest client.

use std::time::{Duration, Instant};

use reqwest::Url;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use super::{ClientError, LogSource};
use crate::api::{ListResponse, LogEntry, QueryRequest, ServerReply, StatMap, StatResponse};

/// Client for a log server exposing `api/stat` and `api/list`.
pub struct HttpLogSource {
    client: Client,
    base: Url,
    stat_url: Url,
    list_url: Url,
}

impl HttpLogSource {
    /// Creates a client for the server at `base_url`.
    ///
    /// The endpoints are resolved relative to the base, so both
    /// `http://host:8082` and `http://host:8082/logs/` work.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base = parse_base_url(base_url)?;
        let join = |path: &str| {
            base.join(path).map_err(|e| ClientError::InvalidUrl {
                url: base_url.to_string(),
                message: e.to_string(),
            })
        };
        let stat_url = join("api/stat")?;
        let list_url = join("api/list")?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base,
            stat_url,
            list_url,
        })
    }

    fn post<T>(&self, url: &Url, query: &QueryRequest) -> Result<T, ClientError>
    where
        T: DeserializeOwned + ServerReply,
    {
        let started = Instant::now();
        let response = self.client.post(url.clone()).json(query).send()?;
        let status = response.status();
        let body = response.bytes()?;
        debug!(
            url = %url,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "query finished"
        );
        trace!(body = %String::from_utf8_lossy(&body), "response body");

        match serde_json::from_slice::<T>(&body) {
            Ok(reply) => {
                if let Some(message) = reply.server_error() {
                    Err(ClientError::Server(message.to_string()))
                } else if !status.is_success() {
                    Err(ClientError::Status(status.as_u16()))
                } else {
                    Ok(reply)
                }
            }
            Err(_) if !status.is_success() => Err(ClientError::Status(status.as_u16())),
            Err(e) => Err(ClientError::Json(e)),
        }
    }
}

impl LogSource for HttpLogSource {
    fn stat(&self, query: &QueryRequest) -> Result<StatMap, ClientError> {
        let reply: StatResponse = self.post(&self.stat_url, query)?;
        Ok(reply.stat.unwrap_or_default())
    }

    fn list(&self, query: &QueryRequest) -> Result<Vec<LogEntry>, ClientError> {
        let reply: ListResponse = self.post(&self.list_url, query)?;
        Ok(reply.entries.unwrap_or_default())
    }

    fn describe(&self) -> String {
        self.base.to_string()
    }
}

/// Parses the base URL, making sure it ends with `/` so joins keep the path.
fn parse_base_url(input: &str) -> Result<Url, ClientError> {
    let trimmed = input.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|e| ClientError::InvalidUrl {
        url: input.to_string(),
        message: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClientError::InvalidUrl {
            url: input.to_string(),
            message: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serves exactly one HTTP response and returns the raw request it received.
    fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if let Some(head_end) = find_head_end(&request) {
                    let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
                    let content_length = head
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}"), handle)
    }

    fn find_head_end(data: &[u8]) -> Option<usize> {
        data.windows(4).position(|w| w == b"\r\n\r\n")
    }

    fn request_body(raw: &str) -> serde_json::Value {
        let body = raw.split("\r\n\r\n").nth(1).unwrap_or("");
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn stat_posts_json_query_and_parses_counts() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"Stat":{"sshd":{"101":3,"102":1},"cron":{"7":2}}}"#,
        );
        let source = HttpLogSource::new(&url, Duration::from_secs(5)).unwrap();

        let query = QueryRequest {
            limit: 500,
            message: Some("fail".to_string()),
            ..Default::default()
        };
        let stat = source.stat(&query).unwrap();
        assert_eq!(stat["sshd"]["101"], 3);
        assert_eq!(stat["cron"]["7"], 2);

        let raw = server.join().unwrap();
        assert!(raw.starts_with("POST /api/stat "));
        let body = request_body(&raw);
        assert_eq!(body["Limit"], 500);
        assert_eq!(body["Message"], "fail");
    }

    #[test]
    fn list_resolves_endpoint_under_base_path() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"Entries":[{"Timestamp":2000,"Application":"a","Process":"1","Message":"new"},
                          {"Timestamp":1000,"Application":"a","Process":"1","Message":"old"}]}"#,
        );
        let source = HttpLogSource::new(&format!("{url}/logs"), Duration::from_secs(5)).unwrap();

        let entries = source
            .list(&QueryRequest {
                limit: 50,
                offset: Some(0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "new");

        let raw = server.join().unwrap();
        assert!(raw.starts_with("POST /logs/api/list "));
        assert_eq!(request_body(&raw)["Offset"], 0);
    }

    #[test]
    fn server_error_field_is_reported() {
        let (url, server) = serve_once("400 Bad Request", r#"{"Error":"invalid limit"}"#);
        let source = HttpLogSource::new(&url, Duration::from_secs(5)).unwrap();

        let err = source.stat(&QueryRequest::default()).unwrap_err();
        assert!(matches!(err, ClientError::Server(ref m) if m == "invalid limit"));
        server.join().unwrap();
    }

    #[test]
    fn non_json_failure_reports_status() {
        let (url, server) = serve_once("500 Internal Server Error", "boom");
        let source = HttpLogSource::new(&url, Duration::from_secs(5)).unwrap();

        let err = source.list(&QueryRequest::default()).unwrap_err();
        assert!(matches!(err, ClientError::Status(500)));
        server.join().unwrap();
    }

    #[test]
    fn empty_reply_yields_empty_results() {
        let (url, server) = serve_once("200 OK", "{}");
        let source = HttpLogSource::new(&url, Duration::from_secs(5)).unwrap();
        assert!(source.list(&QueryRequest::default()).unwrap().is_empty());
        server.join().unwrap();
    }

    #[test]
    fn rejects_invalid_base_urls() {
        assert!(matches!(
            HttpLogSource::new("not a url", Duration::from_secs(1)),
            Err(ClientError::InvalidUrl { .. })
        ));
        assert!(matches!(
            HttpLogSource::new("ftp://logs.example", Duration::from_secs(1)),
            Err(ClientError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn describe_shows_normalized_base() {
        let source = HttpLogSource::new("http://localhost:8082", Duration::from_secs(1)).unwrap();
        assert_eq!(source.describe(), "http://localhost:8082/");
    }
}
