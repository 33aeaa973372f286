use std::time::Duration;

use super::contract::MoveOracle;
use crate::error::OracleError;

/// Asks a solver service over HTTP: `GET {url}?arg1={history}&arg2={depth}`,
/// answered with the column as plain text.
pub struct HttpOracle {
    agent: ureq::Agent,
    url: String,
}

impl HttpOracle {
    /// `timeout` bounds the whole request. `None` waits as long as the
    /// service takes.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        HttpOracle {
            agent: builder.build(),
            url: url.into(),
        }
    }
}

impl MoveOracle for HttpOracle {
    fn suggest(&self, history: &str, depth: u32) -> Result<String, OracleError> {
        let response = self
            .agent
            .get(&self.url)
            .query("arg1", history)
            .query("arg2", &depth.to_string())
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => OracleError::Status(code),
                ureq::Error::Transport(transport) => {
                    OracleError::Unavailable(transport.to_string())
                }
            })?;

        response
            .into_string()
            .map_err(|e| OracleError::Unavailable(format!("reading response body: {e}")))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one canned response and report the request line that came in.
    fn serve_once(status: &str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/run", listener.local_addr().unwrap());
        let status = status.to_string();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header == "\r\n" || header.is_empty() {
                    break;
                }
            }
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            tx.send(request_line).unwrap();
        });

        (url, rx)
    }

    #[test]
    fn test_suggest_sends_history_and_depth() {
        let (url, requests) = serve_once("200 OK", " 4\n");
        let oracle = HttpOracle::new(url, Some(Duration::from_secs(5)));

        let answer = oracle.suggest("3344", 10).unwrap();

        assert_eq!(answer, " 4\n");
        let request_line = requests.recv().unwrap();
        assert!(
            request_line.starts_with("GET /run?arg1=3344&arg2=10 "),
            "unexpected request line {request_line:?}"
        );
    }

    #[test]
    fn test_error_status_is_reported() {
        let (url, _requests) = serve_once("500 Internal Server Error", "boom");
        let oracle = HttpOracle::new(url, Some(Duration::from_secs(5)));

        assert_eq!(oracle.suggest("", 10), Err(OracleError::Status(500)));
    }

    #[test]
    fn test_unreachable_service_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/run", listener.local_addr().unwrap());
        drop(listener);

        let oracle = HttpOracle::new(url, Some(Duration::from_secs(5)));
        assert!(matches!(
            oracle.suggest("0", 10),
            Err(OracleError::Unavailable(_))
        ));
    }
}
