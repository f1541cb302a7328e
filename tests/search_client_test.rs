//! 検索クライアントの結合テスト
//!
//! ローカルのスタブHTTPサーバに対して multipart 送信と応答処理を検証

use product_matcher_common::{ApiConfig, ImageUpload, ProductId, SearchClient, SearchError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use visual_product_matcher::error::MatcherError;
use visual_product_matcher::scanner;
use visual_product_matcher::search::search_images;

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

const TWO_MATCHES: &str = r#"[
    {"product": {"id": 12, "name": "Red Apparel Item", "category": "Apparel", "price": 37.0, "image_url": "product_12.jpg"}, "score": 0.91},
    {"product": {"id": 4, "name": "Blue Apparel Item", "price": null, "image_url": "product_4.png"}, "score": 0.77}
]"#;

/// `count` 回だけ接続を受け付け、同じ応答を返す。受信したリクエストを返す。
async fn serve(count: usize, status: &'static str, body: &'static str) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for _ in 0..count {
            let (mut socket, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut socket).await);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
        requests
    });

    (format!("http://{addr}"), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if request_complete(&buf) {
            break;
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn request_complete(buf: &[u8]) -> bool {
    let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let body = &buf[header_end + 4..];

    if headers.contains("transfer-encoding: chunked") {
        return body.ends_with(b"0\r\n\r\n");
    }
    let length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body.len() >= length
}

fn client_for(base: &str) -> SearchClient {
    SearchClient::new(ApiConfig::new(base).unwrap())
}

#[tokio::test]
async fn search_posts_multipart_image_and_keeps_order() {
    let (base, server) = serve(1, "200 OK", TWO_MATCHES).await;
    let client = client_for(&base);

    let matches = client
        .search(ImageUpload::new("shirt.png", PNG_MAGIC.to_vec()))
        .await
        .expect("search failed");

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].product.id, ProductId::Int(12));
    assert_eq!(matches[1].product.id, ProductId::Int(4));
    assert_eq!(matches[1].product.price, None);

    let requests = server.await.unwrap();
    let request = requests[0].to_lowercase();
    assert!(request.starts_with("post /api/search http/1.1"));
    assert!(request.contains("content-type: multipart/form-data"));
    assert!(request.contains("name=\"image\""));
    assert!(request.contains("filename=\"shirt.png\""));
    assert!(request.contains("content-type: image/png"));
}

#[tokio::test]
async fn search_non_success_status_is_error() {
    let (base, _server) = serve(1, "500 Internal Server Error", r#"{"detail":"boom"}"#).await;
    let result = client_for(&base)
        .search(ImageUpload::new("shirt.png", PNG_MAGIC.to_vec()))
        .await;

    assert_eq!(result, Err(SearchError::Status(500)));
}

#[tokio::test]
async fn search_malformed_body_is_decode_error() {
    let (base, _server) = serve(1, "200 OK", r#"{"unexpected": true}"#).await;
    let result = client_for(&base)
        .search(ImageUpload::new("shirt.png", PNG_MAGIC.to_vec()))
        .await;

    assert!(matches!(result, Err(SearchError::Decode(_))));
}

#[tokio::test]
async fn status_reads_backend_message() {
    let (base, server) = serve(1, "200 OK", r#"{"status": "Visual Product Matcher API is running"}"#).await;
    let status = client_for(&base).status().await.expect("status failed");

    assert_eq!(status.status, "Visual Product Matcher API is running");
    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("GET / HTTP/1.1"));
}

#[tokio::test]
async fn search_images_runs_each_file_and_skips_non_images() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.png"), PNG_MAGIC).unwrap();
    std::fs::write(dir.path().join("b.png"), b"not really a png").unwrap();
    std::fs::write(dir.path().join("c.png"), PNG_MAGIC).unwrap();

    // b.png はリクエスト前に弾かれるので接続は2回
    let (base, server) = serve(2, "200 OK", TWO_MATCHES).await;
    let client = client_for(&base);
    let images = scanner::scan_folder(dir.path()).unwrap();

    let outcomes = search_images(&client, &images).await;

    let queries: Vec<&str> = outcomes.iter().map(|o| o.query.as_str()).collect();
    assert_eq!(queries, vec!["a.png", "b.png", "c.png"]);
    assert_eq!(outcomes[0].result.as_ref().unwrap().len(), 2);
    assert!(matches!(outcomes[1].result, Err(MatcherError::NotAnImage(_))));
    assert_eq!(outcomes[2].result.as_ref().unwrap().len(), 2);

    assert_eq!(server.await.unwrap().len(), 2);
}
