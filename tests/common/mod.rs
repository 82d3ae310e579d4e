#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tiny_http::{Header, Response, Server, StatusCode};

/// A request as seen by the stub service.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// Scripted answer for one path.
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn json(path: &'static str, body: serde_json::Value) -> Self {
        Self {
            path,
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn raw(path: &'static str, status: u16, body: &str) -> Self {
        Self {
            path,
            status,
            body: body.to_string(),
        }
    }
}

pub struct StubService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    _handle: thread::JoinHandle<()>,
}

impl StubService {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.url.split('?').next() == Some(path))
            .collect()
    }
}

/// Serve `routes` on an ephemeral port until idle for two seconds.
pub fn spawn_stub_service(routes: Vec<Route>) -> StubService {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let base_url = format!("http://{}", server.server_addr());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);

    let handle = thread::spawn(move || loop {
        let mut req = match server.recv_timeout(Duration::from_secs(2)) {
            Ok(Some(req)) => req,
            Ok(None) => break,
            Err(_) => break,
        };

        let mut body = String::new();
        let _ = req.as_reader().read_to_string(&mut body);
        let content_type = req
            .headers()
            .iter()
            .find(|h| h.field.equiv("Content-Type"))
            .map(|h| h.value.as_str().to_string());
        let url = req.url().to_string();
        recorded.lock().expect("requests lock").push(Recorded {
            method: req.method().as_str().to_string(),
            url: url.clone(),
            content_type,
            body,
        });

        let path = url.split('?').next().unwrap_or_default();
        let response = match routes.iter().find(|r| r.path == path) {
            Some(route) => Response::from_string(route.body.clone())
                .with_status_code(StatusCode(route.status))
                .with_header(
                    Header::from_bytes("Content-Type", "application/json").expect("header"),
                ),
            None => Response::from_string("not found").with_status_code(StatusCode(404)),
        };
        let _ = req.respond(response);
    });

    StubService {
        base_url,
        requests,
        _handle: handle,
    }
}
