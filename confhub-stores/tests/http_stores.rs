use std::sync::{Arc, Mutex};

use confhub_stores::{
    ConsulConfig, ConsulStore, NacosConfig, NacosStore, StoreBackend, StoreError,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Minimal HTTP/1.1 responder: answers each request with the route whose path
/// prefix matches, or 404.
struct StubServer {
    port: u16,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    async fn start(routes: Vec<(&'static str, u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let routes = routes.clone();
                let seen = Arc::clone(&seen);
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0_u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        let Ok(read) = socket.read(&mut chunk).await else {
                            return;
                        };
                        if read == 0 {
                            return;
                        }
                        buf.extend_from_slice(&chunk[..read]);
                    }

                    let head = String::from_utf8_lossy(&buf).to_string();
                    let target = head.split_whitespace().nth(1).unwrap_or("").to_owned();
                    seen.lock().unwrap().push(head);

                    let (status, body) = routes
                        .iter()
                        .find(|(prefix, _, _)| target.starts_with(prefix))
                        .map_or((404, ""), |(_, status, body)| (*status, *body));
                    let response = format!(
                        "HTTP/1.1 {status} Stub\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { port, requests }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[tokio::test]
async fn consul_reads_raw_value_with_token() {
    let server = StubServer::start(vec![
        ("/v1/kv/dev/app.yaml?raw", 200, "name: svc\n"),
        ("/v1/kv/broken", 500, "boom"),
    ])
    .await;
    let store = ConsulStore::new(
        ConsulConfig::new("127.0.0.1")
            .with_port(server.port)
            .with_token("acl-token"),
    )
    .unwrap();

    assert_eq!(store.load_file("dev/app.yaml").await.unwrap(), "name: svc\n");

    let requests = server.requests();
    assert!(requests[0].starts_with("GET /v1/kv/dev/app.yaml?raw HTTP/1.1"));
    assert!(requests[0].to_ascii_lowercase().contains("x-consul-token: acl-token"));

    let err = store.load_file("missing.yaml").await.expect_err("absent key");
    assert!(err.is_not_found());

    let err = store.load_file("broken").await.expect_err("server error");
    assert!(matches!(err, StoreError::Response { .. }));
}

#[tokio::test]
async fn nacos_reads_config_and_normalizes_absence() {
    let server = StubServer::start(vec![
        ("/nacos/v1/cs/configs?dataId=app.yaml", 200, "port: 8080\n"),
        ("/nacos/v1/cs/configs?dataId=empty.yaml", 200, ""),
        ("/nacos/v1/cs/configs?dataId=denied.yaml", 403, "no permission"),
    ])
    .await;
    let config = NacosConfig::new("http://127.0.0.1")
        .unwrap()
        .with_port(server.port)
        .with_namespace("dev");
    let store = NacosStore::new(config).unwrap();

    assert_eq!(store.load_file("app.yaml").await.unwrap(), "port: 8080\n");
    assert!(server.requests()[0].contains("group=default&tenant=dev"));

    assert!(store.load_file("empty.yaml").await.unwrap_err().is_not_found());
    assert!(store.load_file("other.yaml").await.unwrap_err().is_not_found());
    assert!(matches!(
        store.load_file("denied.yaml").await.unwrap_err(),
        StoreError::Response { .. }
    ));
}

#[tokio::test]
async fn unreachable_store_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let store = ConsulStore::new(ConsulConfig::new("127.0.0.1").with_port(port)).unwrap();
    let err = store.load_file("app.yaml").await.expect_err("nothing listening");
    assert!(matches!(err, StoreError::Transport { .. }));
}
