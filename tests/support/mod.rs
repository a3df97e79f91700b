//! In-process HTTP server standing in for the remote data hosts.
//!
//! Each upstream origin is mirrored under `/<host>` on the mock, so
//! `https://api.github.com/repos/x` is served from `/api.github.com/repos/x`.
//! The server runs on its own tokio runtime in a background thread.

#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::path::Path;
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use wags_tails::http::HttpClient;
use wags_tails::DataStore;

#[derive(Clone)]
struct Route {
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
}

#[derive(Default)]
struct State {
    routes: HashMap<String, Route>,
    hits: Vec<String>,
    headers: Vec<Vec<String>>,
}

type SharedState = Arc<Mutex<State>>;

pub struct MockServer {
    base_url: String,
    state: SharedState,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl MockServer {
    pub fn start() -> Self {
        let state = SharedState::default();
        let (addr_tx, addr_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("build mock server runtime");

        let shared = Arc::clone(&state);
        let handle = thread::spawn(move || {
            runtime.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind mock server listener");
                let addr = listener.local_addr().expect("read mock server address");
                let std_listener = listener.into_std().expect("convert mock listener");
                std_listener
                    .set_nonblocking(true)
                    .expect("set mock listener non-blocking");

                let make_service = make_service_fn(move |_| {
                    let state = Arc::clone(&shared);
                    async move {
                        Ok::<_, Infallible>(service_fn(move |req| {
                            serve_request(Arc::clone(&state), req)
                        }))
                    }
                });

                let server = Server::from_tcp(std_listener)
                    .expect("build mock HTTP server")
                    .serve(make_service);
                let graceful = server.with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                });

                addr_tx.send(addr).expect("report mock server address");
                if let Err(err) = graceful.await {
                    eprintln!("mock server stopped: {err}");
                }
            });
        });

        let addr = addr_rx.recv().expect("mock server failed to start");

        Self {
            base_url: format!("http://{}", addr),
            state,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Serve `body` for an upstream URL such as `https://github.com/a/b`.
    ///
    /// A route registered without a query string also answers requests to the
    /// same path with any query.
    pub fn route(&self, upstream: &str, content_type: &'static str, body: impl Into<Vec<u8>>) {
        self.route_status(upstream, 200, content_type, body);
    }

    pub fn route_json(&self, upstream: &str, body: &str) {
        self.route(upstream, "application/json", body.as_bytes().to_vec());
    }

    pub fn route_status(
        &self,
        upstream: &str,
        status: u16,
        content_type: &'static str,
        body: impl Into<Vec<u8>>,
    ) {
        let route = Route {
            status: StatusCode::from_u16(status).expect("valid status code"),
            content_type,
            body: body.into(),
        };
        self.state
            .lock()
            .unwrap()
            .routes
            .insert(mock_path(upstream), route);
    }

    /// Number of requests received so far, including unrouted ones.
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().hits.len()
    }

    /// Path and query of every request, oldest first.
    pub fn hits(&self) -> Vec<String> {
        self.state.lock().unwrap().hits.clone()
    }

    /// Header lines of the most recent request, lowercased.
    pub fn last_headers(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .headers
            .last()
            .cloned()
            .unwrap_or_default()
    }

    /// HTTP client that sends each listed origin to this server.
    pub fn client(&self, origins: &[&str]) -> HttpClient {
        origins.iter().fold(HttpClient::new().unwrap(), |client, origin| {
            client.with_mirror(*origin, format!("{}{}", self.base_url, mock_path(origin)))
        })
    }

    /// Store for `source` under `data_dir` wired to this server.
    pub fn store(&self, source: &str, data_dir: &Path, origins: &[&str]) -> DataStore {
        DataStore::open(source, Some(data_dir), true)
            .unwrap()
            .with_http(self.client(origins))
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// `https://host/path?q` -> `/host/path?q`
fn mock_path(upstream: &str) -> String {
    let rest = upstream
        .strip_prefix("https://")
        .or_else(|| upstream.strip_prefix("http://"))
        .unwrap_or(upstream);
    format!("/{}", rest)
}

async fn serve_request(state: SharedState, req: Request<Body>) -> Result<Response<Body>, Infallible> {
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let headers: Vec<String> = req
        .headers()
        .iter()
        .map(|(name, value)| {
            format!("{}: {}", name.as_str(), String::from_utf8_lossy(value.as_bytes())).to_lowercase()
        })
        .collect();

    let route = {
        let mut state = state.lock().unwrap();
        state.hits.push(target.clone());
        state.headers.push(headers);
        state
            .routes
            .get(&target)
            .or_else(|| state.routes.get(req.uri().path()))
            .cloned()
    };

    let route = route.unwrap_or_else(|| Route {
        status: StatusCode::NOT_FOUND,
        content_type: "text/plain",
        body: format!("no route for {}", target).into_bytes(),
    });

    let mut response = Response::new(Body::from(route.body));
    *response.status_mut() = route.status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(route.content_type));
    Ok(response)
}
