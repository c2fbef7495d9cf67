//! In-process mock of the approval backend.
//!
//! Every request is recorded; the reply comes from a closure supplied by the
//! test. The server runs on its own Tokio runtime thread so the blocking
//! client under test can be driven from a plain `#[test]`.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use axum::Router;
use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tokio::sync::oneshot;

/// One request as the backend saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(status: u16, value: serde_json::Value) -> Self {
        Reply {
            status,
            content_type: "application/json",
            body: value.to_string().into_bytes(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Reply {
            status,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn pdf(bytes: &[u8]) -> Self {
        Reply {
            status: 200,
            content_type: "application/pdf",
            body: bytes.to_vec(),
        }
    }

    pub fn bytes(bytes: &[u8]) -> Self {
        Reply {
            status: 200,
            content_type: "application/octet-stream",
            body: bytes.to_vec(),
        }
    }

    pub fn png(bytes: Vec<u8>) -> Self {
        Reply {
            status: 200,
            content_type: "image/png",
            body: bytes,
        }
    }

    pub fn empty() -> Self {
        Reply::text(200, "")
    }
}

type Responder = dyn Fn(&Recorded) -> Reply + Send + Sync;

struct Shared {
    log: Mutex<Vec<Recorded>>,
    responder: Box<Responder>,
}

pub struct MockServer {
    addr: SocketAddr,
    shared: Arc<Shared>,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl MockServer {
    pub fn start<F>(responder: F) -> Self
    where
        F: Fn(&Recorded) -> Reply + Send + Sync + 'static,
    {
        let shared = Arc::new(Shared {
            log: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        });
        let handler_state = shared.clone();
        let app = Router::new().fallback(move |req: Request| {
            let state = handler_state.clone();
            async move { handle(state, req).await }
        });

        let (addr_tx, addr_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let thread = std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                addr_tx.send(listener.local_addr().unwrap()).unwrap();
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = shutdown_rx.await;
                    })
                    .await
                    .unwrap();
            });
        });
        let addr = addr_rx.recv().unwrap();

        MockServer {
            addr,
            shared,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.log.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

async fn handle(state: Arc<Shared>, req: Request) -> impl IntoResponse {
    let (parts, body) = req.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let header_str = |name: header::HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        authorization: header_str(header::AUTHORIZATION),
        accept: header_str(header::ACCEPT),
        content_type: header_str(header::CONTENT_TYPE),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    };
    let reply = (state.responder)(&recorded);
    state.log.lock().unwrap().push(recorded);

    (
        StatusCode::from_u16(reply.status).unwrap(),
        [(header::CONTENT_TYPE, reply.content_type)],
        reply.body,
    )
}

/// Minimal PNG: signature plus an IHDR chunk header
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 0, 0, 0, 0]);
    bytes
}

pub fn inbox_json() -> serde_json::Value {
    serde_json::json!([
        {
            "approvalRequestId": 7,
            "requestId": "REQ-0007",
            "flowId": 42,
            "title": "Laptop purchase",
            "requestedById": "u-3",
            "status": "Pending",
            "createdAt": "2025-06-01T08:15:00Z",
            "currentStep": 1,
            "totalSteps": 2
        },
        {
            "approvalRequestId": 8,
            "flowId": 43,
            "title": "Leave",
            "requestedById": "u-4",
            "status": "Pending",
            "createdAt": "2025-06-02T10:00:00",
            "currentStep": 2,
            "totalSteps": 2
        }
    ])
}

pub fn detail_json() -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "requestNumber": "REQ-0007",
        "title": "Laptop purchase",
        "description": "Replacement for a broken machine",
        "approvalType": { "name": "Purchase" },
        "currentStatus": "InProgress",
        "createdAt": "2025-06-01T08:15:00Z",
        "requestedByUser": { "fullName": "Dana Putri", "role": "Staff" },
        "approvalFlows": [
            { "id": 42, "status": "Pending", "orderIndex": 2,
              "approverName": "Budi", "positionTitle": "Director" },
            { "id": 41, "status": "Approved", "orderIndex": 1,
              "approverName": "Sari", "positionTitle": "Manager",
              "remark": "ok", "approvedAt": "2025-06-01T09:00:00Z" }
        ]
    })
}

pub fn requests_json() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 7,
            "title": "Laptop purchase",
            "approvalType": { "name": "Purchase" },
            "currentStatus": "Completed",
            "createdAt": "2025-06-01T08:15:00Z"
        },
        {
            "id": 9,
            "title": "Leave",
            "approvalTypeName": "Leave",
            "currentStatus": "InProgress",
            "createdAt": "2025-06-03T10:00:00"
        }
    ])
}

pub const LETTER_PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n%%EOF\n";

/// Backend with letters: metadata for request 7 (approved) and 8 (not yet)
pub fn letter_backend(r: &Recorded) -> Reply {
    match r.path.as_str() {
        "/letters/metadata/7" => Reply::json(
            200,
            serde_json::json!({
                "title": "Laptop purchase",
                "pdfUrl": "/letters/7/download",
                "approved": true
            }),
        ),
        "/letters/metadata/8" => Reply::json(
            200,
            serde_json::json!({"title": "Leave", "approved": false}),
        ),
        "/letters/7/download" => Reply::pdf(LETTER_PDF),
        _ => Reply::text(404, ""),
    }
}
