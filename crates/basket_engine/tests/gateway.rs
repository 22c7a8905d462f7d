use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use basket_engine::{FailureKind, GatewaySettings, ItemPrice, PriceGateway, ReqwestGateway};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> ReqwestGateway {
    let settings = GatewaySettings {
        base_url: server.uri(),
        ..GatewaySettings::default()
    };
    ReqwestGateway::new(settings).expect("gateway")
}

#[tokio::test]
async fn search_sends_term_and_decodes_prices() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item-prices/"))
        .and(query_param("term", "apples"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"name":"Apples","kroger_price":2.5},{"name":"Milk","kroger_price":null}]"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let items = gateway_for(&server).search("apples").await.expect("search ok");

    assert_eq!(
        items,
        vec![
            ItemPrice {
                name: "Apples".to_string(),
                your_price: None,
                kroger_price: Some(2.5),
            },
            ItemPrice {
                name: "Milk".to_string(),
                your_price: None,
                kroger_price: None,
            },
        ]
    );
}

#[tokio::test]
async fn search_url_encodes_term() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item-prices/"))
        .and(query_param("term", "whole milk & eggs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let items = gateway_for(&server)
        .search("whole milk & eggs")
        .await
        .expect("search ok");
    assert!(items.is_empty());
}

#[test]
fn search_url_places_term_in_query_string() {
    let settings = GatewaySettings::default();
    let url = settings.search_url("green apples").expect("url");
    assert_eq!(
        url.as_str(),
        "http://localhost:8000/item-prices/?term=green+apples"
    );
}

#[test]
fn invalid_base_url_is_reported() {
    let settings = GatewaySettings {
        base_url: "not a url".to_string(),
        ..GatewaySettings::default()
    };
    let err = settings.compare_url().unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn comparison_reads_both_prices() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item-prices/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[{"name":"Eggs","your_price":3.49,"kroger_price":2.99}]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let rows = gateway_for(&server).comparison().await.expect("comparison ok");
    assert_eq!(
        rows,
        vec![ItemPrice {
            name: "Eggs".to_string(),
            your_price: Some(3.49),
            kroger_price: Some(2.99),
        }]
    );
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item-prices/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = gateway_for(&server).search("apples").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn malformed_json_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item-prices/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"detail":"oops"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = gateway_for(&server).search("apples").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item-prices/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .insert_header("Content-Length", "11")
                .set_body_string("[         ]"),
        )
        .mount(&server)
        .await;

    let settings = GatewaySettings {
        base_url: server.uri(),
        max_bytes: 8,
        ..GatewaySettings::default()
    };
    let gateway = ReqwestGateway::new(settings).expect("gateway");

    let err = gateway.search("apples").await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 8,
            actual: Some(11)
        }
    );
}

/// Serves one request with a chunked body, so no `Content-Length` is sent.
fn serve_chunked_once(chunks: &'static [&'static str]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    thread::spawn(move || {
        let Ok((mut socket, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let mut response = String::from(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nTransfer-Encoding: chunked\r\n\r\n",
        );
        for chunk in chunks {
            response.push_str(&format!("{:x}\r\n{}\r\n", chunk.len(), chunk));
        }
        response.push_str("0\r\n\r\n");
        let _ = socket.write_all(response.as_bytes());
        let _ = socket.flush();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn streamed_body_over_limit_is_rejected() {
    let settings = GatewaySettings {
        base_url: serve_chunked_once(&["[{\"a\":", "1},{}]"]),
        max_bytes: 8,
        ..GatewaySettings::default()
    };
    let gateway = ReqwestGateway::new(settings).expect("gateway");

    // Where the cap trips depends on how the chunks are read off the socket.
    let err = gateway.search("apples").await.unwrap_err();
    assert!(
        matches!(
            err.kind,
            FailureKind::TooLarge {
                max_bytes: 8,
                actual: Some(actual)
            } if actual > 8
        ),
        "unexpected failure {:?}",
        err.kind
    );
}

#[tokio::test]
async fn streamed_body_within_limit_is_decoded() {
    let settings = GatewaySettings {
        base_url: serve_chunked_once(&["[{\"name\":\"Rice\",", "\"kroger_price\":1.25}]"]),
        ..GatewaySettings::default()
    };
    let gateway = ReqwestGateway::new(settings).expect("gateway");

    let items = gateway.search("rice").await.expect("search ok");
    assert_eq!(
        items,
        vec![ItemPrice {
            name: "Rice".to_string(),
            your_price: None,
            kroger_price: Some(1.25),
        }]
    );
}

#[tokio::test]
async fn optional_request_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/item-prices/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw("[]", "application/json"),
        )
        .mount(&server)
        .await;

    let settings = GatewaySettings {
        base_url: server.uri(),
        request_timeout: Some(Duration::from_millis(50)),
        ..GatewaySettings::default()
    };
    let gateway = ReqwestGateway::new(settings).expect("gateway");

    let err = gateway.search("apples").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    // Reserve a free port, then release it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("free port")
        .port();
    let settings = GatewaySettings {
        base_url: format!("http://127.0.0.1:{port}"),
        ..GatewaySettings::default()
    };
    let gateway = ReqwestGateway::new(settings).expect("gateway");

    let err = gateway.search("apples").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}
