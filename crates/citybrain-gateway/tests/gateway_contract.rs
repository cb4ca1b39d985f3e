// SPDX-License-Identifier: Apache-2.0

use citybrain_gateway::{build_router, AppState, GatewayConfig};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tempfile::{tempdir, TempDir};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: String,
    url: String,
    body: String,
    headers: Vec<(String, String)>,
}

struct FakeBackend {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn spawn_backend(delay: Option<Duration>) -> FakeBackend {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind fake backend");
    let addr = server.server_addr().to_ip().expect("backend ip addr");
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let thread_hits = Arc::clone(&hits);
    let thread_requests = Arc::clone(&requests);
    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            if let Some(delay) = delay {
                thread::sleep(delay);
            }
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let headers = request
                .headers()
                .iter()
                .map(|h| (h.field.as_str().to_string(), h.value.to_string()))
                .collect();
            thread_hits.fetch_add(1, Ordering::SeqCst);
            thread_requests
                .lock()
                .expect("requests lock")
                .push(RecordedRequest {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    body,
                    headers,
                });
            let response = tiny_http::Response::from_string(r#"{"ok":true}"#).with_header(
                tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .expect("header"),
            );
            let _ = request.respond(response);
        }
    });
    FakeBackend {
        addr,
        hits,
        requests,
    }
}

fn spa_fixture() -> (TempDir, PathBuf) {
    let dir = tempdir().expect("tempdir");
    let dist = dir.path().join("dist");
    fs::create_dir(&dist).expect("mkdir dist");
    fs::write(
        dist.join("index.html"),
        "<!doctype html><div id=\"app\">city brain</div>",
    )
    .expect("write index");
    fs::write(dist.join("app.css"), "body{margin:0}").expect("write css");
    (dir, dist)
}

fn gateway_config(backend: SocketAddr, asset_roots: Vec<PathBuf>) -> GatewayConfig {
    GatewayConfig {
        backend_origin: format!("http://{backend}"),
        asset_roots,
        upstream_timeout: Duration::from_secs(5),
        ..GatewayConfig::default()
    }
}

async fn spawn_gateway(config: GatewayConfig) -> SocketAddr {
    let state = AppState::new(config).expect("gateway state");
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve app");
    });
    addr
}

async fn http_request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    extra_headers: &str,
    body: &str,
) -> String {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect gateway");
    let request = format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n{extra_headers}Connection: close\r\n\r\n{body}",
        body.len()
    );
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    response
}

#[tokio::test]
async fn doubled_and_single_prefix_reach_backend_identically() {
    let backend = spawn_backend(None);
    let (_guard, dist) = spa_fixture();
    let gateway = spawn_gateway(gateway_config(backend.addr, vec![dist])).await;

    let doubled = http_request(
        gateway,
        "GET",
        "/api/api/v1/dashboard/snapshot?district=laoshan",
        "",
        "",
    )
    .await;
    let single = http_request(
        gateway,
        "GET",
        "/api/v1/dashboard/snapshot?district=laoshan",
        "",
        "",
    )
    .await;

    assert!(doubled.starts_with("HTTP/1.1 200"), "got: {doubled}");
    assert!(single.starts_with("HTTP/1.1 200"), "got: {single}");
    assert_eq!(backend.hits.load(Ordering::SeqCst), 2);

    let requests = backend.requests.lock().expect("requests lock");
    for recorded in requests.iter() {
        assert_eq!(recorded.url, "/api/v1/dashboard/snapshot?district=laoshan");
        assert_eq!(recorded.method, "GET");
    }
}

#[tokio::test]
async fn method_body_and_bearer_token_survive_forwarding() {
    let backend = spawn_backend(None);
    let (_guard, dist) = spa_fixture();
    let gateway = spawn_gateway(gateway_config(backend.addr, vec![dist])).await;

    let payload = r#"{"title":"新建停车场规划","priority":"medium","owner":"李四"}"#;
    let response = http_request(
        gateway,
        "POST",
        "/api/api/v1/operations/tickets",
        "Authorization: Bearer user-1\r\n",
        payload,
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.contains(r#"{"ok":true}"#));

    let requests = backend.requests.lock().expect("requests lock");
    let recorded = requests.first().expect("one backend request");
    assert_eq!(recorded.method, "POST");
    assert_eq!(recorded.url, "/api/v1/operations/tickets");
    assert_eq!(recorded.body, payload);
    assert!(recorded
        .headers
        .iter()
        .any(|(name, value)| name.eq_ignore_ascii_case("authorization")
            && value == "Bearer user-1"));
}

#[tokio::test]
async fn non_api_requests_never_reach_backend() {
    let backend = spawn_backend(None);
    let (_guard, dist) = spa_fixture();
    let gateway = spawn_gateway(gateway_config(backend.addr, vec![dist])).await;

    let dashboard = http_request(gateway, "GET", "/dashboard", "", "").await;
    let deep_link = http_request(gateway, "GET", "/foo/bar", "", "").await;

    assert!(dashboard.starts_with("HTTP/1.1 200"), "got: {dashboard}");
    assert!(dashboard.contains("city brain"));
    assert!(deep_link.starts_with("HTTP/1.1 200"), "got: {deep_link}");
    assert!(deep_link.contains("city brain"));
    assert_eq!(backend.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn static_assets_win_over_the_fallback_document() {
    let backend = spawn_backend(None);
    let (_guard, dist) = spa_fixture();
    let gateway = spawn_gateway(gateway_config(backend.addr, vec![dist])).await;

    let response = http_request(gateway, "GET", "/app.css", "", "").await;
    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.contains("text/css"));
    assert!(response.contains("body{margin:0}"));
}

#[tokio::test]
async fn later_asset_roots_are_probed_in_order() {
    let backend = spawn_backend(None);
    let (_guard, dist) = spa_fixture();
    let public_guard = tempdir().expect("tempdir");
    let public = public_guard.path().join("public");
    fs::create_dir(&public).expect("mkdir public");
    fs::write(public.join("logo.svg"), "<svg></svg>").expect("write svg");

    let gateway = spawn_gateway(gateway_config(backend.addr, vec![dist, public])).await;

    let response = http_request(gateway, "GET", "/logo.svg", "", "").await;
    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");
    assert!(response.contains("image/svg+xml"));
    assert_eq!(backend.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_fallback_document_is_a_500_with_diagnostic() {
    let backend = spawn_backend(None);
    let empty = tempdir().expect("tempdir");
    let gateway =
        spawn_gateway(gateway_config(backend.addr, vec![empty.path().to_path_buf()])).await;

    let response = http_request(gateway, "GET", "/missing", "", "").await;
    assert!(response.starts_with("HTTP/1.1 500"), "got: {response}");
    assert!(response.contains("index.html"));
}

#[tokio::test]
async fn slow_backend_maps_to_gateway_timeout() {
    let backend = spawn_backend(Some(Duration::from_secs(2)));
    let (_guard, dist) = spa_fixture();
    let config = GatewayConfig {
        upstream_timeout: Duration::from_millis(200),
        ..gateway_config(backend.addr, vec![dist])
    };
    let gateway = spawn_gateway(config).await;

    let response = http_request(gateway, "GET", "/api/v1/zoning/layers", "", "").await;
    assert!(response.starts_with("HTTP/1.1 504"), "got: {response}");
    assert!(response.contains("timed out"));
}

#[tokio::test]
async fn unreachable_backend_maps_to_bad_gateway() {
    let free_port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("probe port");
        listener.local_addr().expect("probe addr")
    };
    let (_guard, dist) = spa_fixture();
    let gateway = spawn_gateway(gateway_config(free_port, vec![dist])).await;

    let response = http_request(gateway, "GET", "/api/v1/zoning/layers", "", "").await;
    assert!(response.starts_with("HTTP/1.1 502"), "got: {response}");
    assert!(response.contains("detail"));
}
