//! Contract Test: End-to-end update pass
//!
//! Runs `update_dns_ip_with` against two loopback servers: one playing the
//! IP echo service and one playing the Cloudflare API.
//!
//! Constraints verified:
//! - A changed IP is written once and the new record is returned
//! - An unchanged IP returns `None` after a single read
//! - `api_base` routes every provider call to the configured endpoint
//! - Dry-run reads the record but never sends a PATCH

use ddns_core::config::IpSourceConfig;
use ddns_core::{ResponseFormat, UpdaterConfig};
use ddns_update::{UpdateOptions, update_dns_ip_with};

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
const RECORD_NAME: &str = "home.example.com";

type Requests = Arc<Mutex<Vec<String>>>;

fn record_json(content: &str) -> String {
    format!(
        r#"{{"id":"rec-1","zone_id":"{}","name":"{}","type":"A","content":"{}","proxied":false,"ttl":300}}"#,
        ZONE_ID, RECORD_NAME, content
    )
}

fn envelope(result: &str) -> (u16, String) {
    (
        200,
        format!(r#"{{"success":true,"errors":[],"messages":[],"result":{}}}"#, result),
    )
}

fn echo(ip: &str) -> (u16, String) {
    (200, format!("{}\n", ip))
}

/// Read one HTTP/1.1 request (head plus Content-Length body), keep the request line
async fn read_request_line(socket: &mut tokio::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break data.len();
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..head_end]).to_string();
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while data.len() < head_end + content_length {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }

    head.lines().next().unwrap_or_default().to_string()
}

/// Serve the given responses in order, one connection each, recording request lines
async fn serve(responses: Vec<(u16, String)>) -> (String, Requests) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests: Requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();

            let line = read_request_line(&mut socket).await;
            recorded.lock().unwrap().push(line);

            let response = format!(
                "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}", addr), requests)
}

fn options(echo_root: &str, api_root: &str, dry_run: bool) -> UpdateOptions {
    UpdateOptions {
        ip_source: IpSourceConfig {
            url: format!("{}/ip", echo_root),
            format: ResponseFormat::Text,
            ..IpSourceConfig::default()
        },
        api_base: format!("{}/client/v4", api_root),
        dry_run,
    }
}

fn config() -> UpdaterConfig {
    UpdaterConfig::new("test-token", ZONE_ID, RECORD_NAME)
}

#[tokio::test]
async fn changed_ip_is_written_then_left_alone() {
    let (echo_root, echo_requests) = serve(vec![echo("203.0.113.9"), echo("203.0.113.9")]).await;
    let (api_root, api_requests) = serve(vec![
        envelope(&format!("[{}]", record_json("203.0.113.5"))),
        envelope(&record_json("203.0.113.9")),
        envelope(&format!("[{}]", record_json("203.0.113.9"))),
    ])
    .await;
    let options = options(&echo_root, &api_root, false);

    let updated = update_dns_ip_with(&config(), &options)
        .await
        .unwrap()
        .expect("record was updated");

    assert_eq!(updated.id, "rec-1");
    assert_eq!(updated.content, "203.0.113.9");
    assert_eq!(updated.ttl, 300);
    assert_eq!(updated.proxied, Some(false));

    let second = update_dns_ip_with(&config(), &options).await.unwrap();
    assert_eq!(second, None);

    assert_eq!(echo_requests.lock().unwrap().len(), 2);

    let api_requests = api_requests.lock().unwrap();
    assert_eq!(api_requests.len(), 3);
    assert!(api_requests[0].starts_with(&format!(
        "GET /client/v4/zones/{}/dns_records?",
        ZONE_ID
    )));
    assert!(api_requests[1].starts_with(&format!(
        "PATCH /client/v4/zones/{}/dns_records/rec-1",
        ZONE_ID
    )));
    assert!(api_requests[2].starts_with("GET "));
}

#[tokio::test]
async fn dry_run_never_patches() {
    let (echo_root, _echo_requests) = serve(vec![echo("203.0.113.9")]).await;
    let (api_root, api_requests) = serve(vec![
        envelope(&format!("[{}]", record_json("203.0.113.5"))),
        envelope(&record_json("203.0.113.5")),
    ])
    .await;

    let result = update_dns_ip_with(&config(), &options(&echo_root, &api_root, true))
        .await
        .unwrap()
        .expect("dry run reports the intended record");

    assert_eq!(result.content, "203.0.113.9");

    let api_requests = api_requests.lock().unwrap();
    assert_eq!(api_requests.len(), 2);
    assert!(
        api_requests.iter().all(|line| line.starts_with("GET ")),
        "{api_requests:?}"
    );
}
