//! HTTP front: a blocking tiny_http accept thread feeding an async loop.
//!
//! Each request runs on its own task, so a slow upstream call or a slow
//! client never holds up the others. Body reads and responses happen on
//! the blocking pool.

use std::io::Read;
use std::sync::Arc;
use std::thread;

use tiny_http::{Header, Request, Response, Server};
use tokio::sync::mpsc;
use tokio::task;

use crate::backend::CompletionBackend;
use crate::service::{Reply, Service};

/// Serve until the listener shuts down.
pub async fn serve<B>(server: Server, service: Service<B>)
where
    B: CompletionBackend + Send + Sync + 'static,
{
    let service = Arc::new(service);
    let (tx, mut rx) = mpsc::channel::<Request>(16);
    thread::spawn(move || {
        while let Ok(request) = server.recv() {
            if tx.blocking_send(request).is_err() {
                break;
            }
        }
    });

    while let Some(request) = rx.recv().await {
        let service = Arc::clone(&service);
        tokio::spawn(async move { handle_request(request, &service).await });
    }
}

async fn handle_request<B: CompletionBackend>(request: Request, service: &Service<B>) {
    let read = task::spawn_blocking(move || {
        let mut request = request;
        let mut body = String::new();
        if let Err(e) = request.as_reader().read_to_string(&mut body) {
            log::warn!("failed to read request body: {e}");
        }
        (request, body)
    })
    .await;
    let (request, body) = match read {
        Ok(read) => read,
        Err(e) => {
            log::error!("request reader task failed: {e}");
            return;
        }
    };

    let method = request.method().as_str().to_string();
    let url = request.url().to_string();
    let reply = service.handle(&method, &url, &body).await;

    if let Err(e) = task::spawn_blocking(move || respond(request, reply)).await {
        log::error!("response task failed: {e}");
    }
}

fn respond(request: Request, reply: Reply) {
    let json = match serde_json::to_string(&reply.body) {
        Ok(json) => json,
        Err(e) => {
            log::error!("failed to encode response: {e}");
            return;
        }
    };
    let mut response = Response::from_string(json).with_status_code(reply.status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response = response.with_header(header);
    }
    if let Err(e) = request.respond(response) {
        log::warn!("failed to send response: {e}");
    }
}
