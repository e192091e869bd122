//! Minimal HTTP/1.1 server for integration tests.
//!
//! Routes by request path:
//! - `/slow...` sleeps for the configured delay, then serves the image
//! - `/missing...` answers 404
//! - `/html...` answers 200 with an HTML page
//! - `/empty...` answers 200 with no body
//! - anything else serves the image
//!
//! Every request is counted so tests can assert how often the network was hit.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct ImageServer {
    base: String,
    hits: Arc<AtomicUsize>,
}

impl ImageServer {
    /// URL for `path` on this server (`path` without leading slash).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Small PNG used as the served image.
pub fn png_body() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 3, image::Rgb([180, 60, 20]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).expect("encode png");
    buf.into_inner()
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(slow_delay: Duration) -> ImageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let body = Arc::new(png_body());
    let counter = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let counter = Arc::clone(&counter);
            thread::spawn(move || handle(stream, &body, &counter, slow_delay));
        }
    });
    ImageServer {
        base: format!("http://127.0.0.1:{}/", port),
        hits,
    }
}

fn handle(mut stream: TcpStream, body: &[u8], hits: &AtomicUsize, slow_delay: Duration) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    hits.fetch_add(1, Ordering::SeqCst);

    if path.starts_with("/slow") {
        thread::sleep(slow_delay);
    }

    let (status, content_type, payload): (&str, &str, &[u8]) = if path.starts_with("/missing") {
        ("404 Not Found", "text/plain", b"not found")
    } else if path.starts_with("/html") {
        ("200 OK", "text/html", b"<html><body>hello</body></html>")
    } else if path.starts_with("/empty") {
        ("200 OK", "image/jpeg", b"")
    } else {
        ("200 OK", "image/png", body)
    };

    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        payload.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(payload);
}
