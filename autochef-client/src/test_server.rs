//! In-process stand-in for the transformation service

use axum::http::{HeaderMap, StatusCode, header};
use axum::{Json, Router, routing::post};
use serde_json::Value as JsonValue;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use crate::API_KEY_HEADER;

/// Canned response for one POST path
pub struct Route {
    path: &'static str,
    status: StatusCode,
    body: String,
}

pub fn json_route(path: &'static str, status: StatusCode, body: JsonValue) -> Route {
    Route {
        path,
        status,
        body: body.to_string(),
    }
}

pub fn text_route(path: &'static str, status: StatusCode, body: &str) -> Route {
    Route {
        path,
        status,
        body: body.to_string(),
    }
}

/// Request body and API key header of every request received
type Recorded = Arc<Mutex<Vec<(JsonValue, Option<String>)>>>;

pub struct TestServer {
    addr: SocketAddr,
    recorded: Recorded,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(route: Route) -> Self {
        let recorded: Recorded = Arc::default();
        let Route { path, status, body } = route;

        let sink = Arc::clone(&recorded);
        let router = Router::new().route(
            path,
            post(move |headers: HeaderMap, Json(payload): Json<JsonValue>| {
                let sink = Arc::clone(&sink);
                let body = body.clone();
                async move {
                    let api_key = headers
                        .get(API_KEY_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    sink.lock().unwrap().push((payload, api_key));
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            addr,
            recorded,
            _handle: handle,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn request_count(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<JsonValue> {
        self.recorded.lock().unwrap().last().map(|(body, _)| body.clone())
    }

    pub fn last_api_key(&self) -> Option<String> {
        self.recorded
            .lock()
            .unwrap()
            .last()
            .and_then(|(_, key)| key.clone())
    }
}
