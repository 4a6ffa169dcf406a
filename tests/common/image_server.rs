//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves canned responses keyed by request path and records the
//! `User-Agent` header of every request it sees.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: &'static str,
    pub content_type: Option<&'static str>,
    /// `None` sends the real body length; `Some` overrides the header value.
    pub declared_length: Option<u64>,
    /// Omit `Content-Length` and close the connection after the body.
    pub close_delimited: bool,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status: "200 OK",
            content_type: Some(content_type),
            declared_length: None,
            close_delimited: false,
            body: body.to_vec(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: "404 Not Found",
            content_type: Some("text/plain"),
            declared_length: None,
            close_delimited: false,
            body: b"not found".to_vec(),
        }
    }
}

pub struct ImageServer {
    pub base_url: String,
    user_agents: Arc<Mutex<Vec<String>>>,
}

impl ImageServer {
    pub fn user_agents(&self) -> Vec<String> {
        self.user_agents.lock().unwrap().clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(routes: Vec<(&'static str, Route)>) -> ImageServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<&'static str, Route>> = Arc::new(routes.into_iter().collect());
    let user_agents = Arc::new(Mutex::new(Vec::new()));

    let seen = Arc::clone(&user_agents);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &routes, &seen));
        }
    });

    ImageServer {
        base_url: format!("http://127.0.0.1:{}", port),
        user_agents,
    }
}

/// Starts a server that accepts connections but never answers.
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, routes: &HashMap<&'static str, Route>, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };

    let mut path = "";
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if path.is_empty() {
            path = line.split_whitespace().nth(1).unwrap_or("");
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("user-agent") {
                seen.lock().unwrap().push(value.trim().to_string());
            }
        }
    }

    let route = routes.get(path).cloned().unwrap_or_else(Route::not_found);

    let mut head = format!("HTTP/1.1 {}\r\n", route.status);
    if let Some(content_type) = route.content_type {
        head.push_str(&format!("Content-Type: {}\r\n", content_type));
    }
    if route.close_delimited {
        head.push_str("Connection: close\r\n");
    } else {
        let length = route.declared_length.unwrap_or(route.body.len() as u64);
        head.push_str(&format!("Content-Length: {}\r\n", length));
    }
    head.push_str("\r\n");

    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();
}
