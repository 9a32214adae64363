use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use core_types::RequestId;
use thiserror::Error;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "docnav/0.1";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http status {0}")]
    Status(u16),
    #[error("transport: {0}")]
    Transport(String),
    #[error("body read: {0}")]
    Body(String),
    #[error("cancelled")]
    Cancelled,
}

#[derive(Debug)]
pub struct FragmentResult {
    pub request_id: RequestId,
    pub requested_url: String,
    pub body: String,
    pub content_type: Option<String>,
    pub duration_ms: u128,
}

pub type FetchCallback =
    Arc<dyn Fn(RequestId, Result<FragmentResult, FetchError>) + Send + Sync>;

/// Fetch one HTML fragment on a spawned thread and hand the outcome to
/// `cb`. A request whose `cancel` flag is set by the time the response
/// arrives reports `FetchError::Cancelled` instead of a body, so a
/// superseded navigation never delivers stale content.
pub fn fetch_fragment(
    request_id: RequestId,
    url: String,
    cancel: Arc<AtomicBool>,
    cb: FetchCallback,
) {
    thread::spawn(move || {
        let start = std::time::Instant::now();
        let requested_url = url.clone();

        let outcome = (|| -> Result<FragmentResult, FetchError> {
            let response = ureq::get(&url)
                .timeout(FETCH_TIMEOUT)
                .set("User-Agent", USER_AGENT)
                .call()
                .map_err(|e| match e {
                    ureq::Error::Status(code, _) => FetchError::Status(code),
                    ureq::Error::Transport(t) => FetchError::Transport(t.to_string()),
                })?;

            let content_type = Some(response.content_type().to_string());
            let body = response
                .into_string()
                .map_err(|e| FetchError::Body(e.to_string()))?;

            if cancel.load(Ordering::Acquire) {
                return Err(FetchError::Cancelled);
            }

            Ok(FragmentResult {
                request_id,
                requested_url: requested_url.clone(),
                body,
                content_type,
                duration_ms: start.elapsed().as_millis(),
            })
        })();

        if let Err(err) = &outcome {
            log::warn!("fragment fetch failed for {requested_url}: {err}");
        }
        cb(request_id, outcome);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::Mutex;
    use std::sync::mpsc::channel;

    const OK_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\n\
        Content-Type: text/html\r\n\
        Content-Length: 12\r\n\
        Connection: close\r\n\r\n\
        <p>hello</p>";

    const NOT_FOUND_RESPONSE: &[u8] = b"HTTP/1.1 404 Not Found\r\n\
        Content-Length: 0\r\n\
        Connection: close\r\n\r\n";

    fn serve_once(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(response);
            }
        });
        format!("http://{addr}/guide?ajax=true")
    }

    fn fetch(url: String, cancel: Arc<AtomicBool>) -> Result<FragmentResult, FetchError> {
        let (tx, rx) = channel();
        let tx = Mutex::new(tx);
        fetch_fragment(
            7,
            url,
            cancel,
            Arc::new(move |_, outcome| {
                if let Ok(tx) = tx.lock() {
                    let _ = tx.send(outcome);
                }
            }),
        );
        rx.recv_timeout(Duration::from_secs(30)).unwrap()
    }

    #[test]
    fn delivers_the_fragment_body() {
        let url = serve_once(OK_RESPONSE);
        let result = fetch(url, Arc::new(AtomicBool::new(false))).unwrap();
        assert_eq!(result.body, "<p>hello</p>");
        assert_eq!(result.request_id, 7);
        assert_eq!(result.content_type.as_deref(), Some("text/html"));
    }

    #[test]
    fn maps_http_errors_to_status() {
        let url = serve_once(NOT_FOUND_RESPONSE);
        match fetch(url, Arc::new(AtomicBool::new(false))) {
            Err(FetchError::Status(404)) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn maps_connection_failures_to_transport() {
        // Bind to learn a free port, then close it again.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        match fetch(format!("http://{addr}/guide"), Arc::new(AtomicBool::new(false))) {
            Err(FetchError::Transport(_)) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn a_cancelled_request_never_delivers_a_body() {
        let url = serve_once(OK_RESPONSE);
        match fetch(url, Arc::new(AtomicBool::new(true))) {
            Err(FetchError::Cancelled) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}

