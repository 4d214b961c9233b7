use crate::*;

use std::time::Duration;

use async_trait::async_trait;
use menu_catalog::{BaseLiquor, DrinkDraft, DrinkId, MappingError, MixingMethod};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// An in-memory stand-in for the menu backend, following its REST contract.
#[derive(Default)]
struct MemoryBackend {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    records: Vec<Value>,
    next_id: u64,
    log: Vec<(Method, String)>,
}

impl MemoryBackend {
    fn seeded(records: Vec<Value>) -> Self {
        Self {
            state: Mutex::new(State {
                records,
                ..State::default()
            }),
        }
    }

    fn push(&self, record: Value) {
        self.state.lock().records.push(record);
    }

    fn request_count(&self) -> usize {
        self.state.lock().log.len()
    }

    fn last_path(&self) -> Option<String> {
        self.state.lock().log.last().map(|(_, path)| path.clone())
    }
}

fn find(records: &[Value], segment: &str) -> Option<usize> {
    let id = urlencoding::decode(segment).ok()?;
    records.iter().position(|r| r["_id"] == *id)
}

fn ok(body: Value) -> ApiResponse {
    ApiResponse::new(200, Some(body))
}

fn not_found(detail: &str) -> ApiResponse {
    ApiResponse::new(404, Some(json!({ "detail": detail })))
}

#[async_trait]
impl Transport for MemoryBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut state = self.state.lock();
        state.log.push((request.method, request.path.clone()));

        let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();
        let response = match (request.method, segments.as_slice()) {
            (Method::Get, ["menu"]) => ok(Value::Array(state.records.clone())),
            (Method::Post, ["menu"]) => {
                state.next_id += 1;
                let id = format!("d{}", state.next_id);
                let mut record = request.body.unwrap_or(Value::Null);
                record["_id"] = json!(id);
                state.records.push(record);
                ok(json!({ "message": "Created", "id": id }))
            }
            (Method::Get, ["menu", id]) => match find(&state.records, id) {
                Some(i) => ok(state.records[i].clone()),
                None => not_found("Drink not found"),
            },
            (Method::Put, ["menu", id]) => match find(&state.records, id) {
                Some(i) => {
                    let mut record = request.body.unwrap_or(Value::Null);
                    record["_id"] = state.records[i]["_id"].clone();
                    state.records[i] = record;
                    ok(json!({ "message": "Updated" }))
                }
                None => not_found("Not found"),
            },
            (Method::Delete, ["menu", id]) => match find(&state.records, id) {
                Some(i) => {
                    state.records.remove(i);
                    ok(json!({ "message": "Deleted" }))
                }
                None => not_found("Not found"),
            },
            _ => ApiResponse::new(405, Some(json!({ "detail": "Method Not Allowed" }))),
        };
        Ok(response)
    }
}

/// Answers every request with the same result.
struct Canned(Result<ApiResponse, TransportError>);

#[async_trait]
impl Transport for Canned {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.0.clone()
    }
}

fn seed() -> Vec<Value> {
    vec![
        json!({
            "_id": "m1",
            "name": "Margarita",
            "korean_name": "마가리타",
            "abv": "13%",
            "base": "Tequila",
            "ingredients": ["Tequila", "Lime Juice", "Triple Sec"],
            "description": "A classic cocktail made with tequila, lime juice, and triple sec."
        }),
        json!({
            "_id": "n1",
            "name": "Negroni",
            "korean_name": "네그로니",
            "abv": 24,
            "base": "Gin",
            "glass": "Old-Fashioned",
            "ingredients": [{"item": "Gin", "amount": "1 oz"}],
            "ice": "Large Cube",
            "shake_or_stir": "Stir",
            "instructions": ["Stir", "Strain"],
            "tags": ["bitter"],
            "image_url": "",
            "available": true
        }),
    ]
}

fn id(raw: &str) -> DrinkId {
    DrinkId::new(raw).unwrap()
}

fn mojito() -> DrinkDraft {
    DrinkDraft::new("모히토", 12.0, BaseLiquor::Rum)
        .with_name("Mojito")
        .with_ingredient("White Rum", "2 oz")
        .with_ingredient("Lime Juice", "1 oz")
        .with_tag("fresh")
}

fn client(backend: MemoryBackend) -> CatalogClient<MemoryBackend> {
    CatalogClient::new(backend)
}

#[tokio::test]
async fn list_maps_backend_records() {
    let c = client(MemoryBackend::seeded(seed()));
    let drinks = c.list().await.unwrap();

    assert_eq!(drinks.len(), 2);
    assert_eq!(drinks[0].id, id("m1"));
    assert_eq!(drinks[0].abv, 13.0);
    assert_eq!(drinks[0].base_liquor, BaseLiquor::Tequila);
    assert_eq!(drinks[0].ingredients[2].item, "Triple Sec");
    assert_eq!(drinks[1].mixing_method, MixingMethod::Stir);
    assert_eq!(drinks[1].localized_name, "네그로니");
}

#[tokio::test]
async fn get_returns_record_or_not_found() {
    let c = client(MemoryBackend::seeded(seed()));
    assert_eq!(c.get(&id("n1")).await.unwrap().name, "Negroni");

    let err = c.get(&id("zzz")).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { ref id } if id.as_str() == "zzz"));
}

#[tokio::test]
async fn delete_of_unknown_id_is_not_found() {
    let c = client(MemoryBackend::seeded(seed()));
    let err = c.delete(&id("ghost")).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn deleted_drink_is_gone_from_list() {
    let c = client(MemoryBackend::seeded(seed()));
    c.delete(&id("m1")).await.unwrap();

    let ids: Vec<_> = c
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec![id("n1")]);
    assert!(c.delete(&id("m1")).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn create_stamps_acknowledged_id() {
    let c = client(MemoryBackend::default());
    let created = c.create(&mojito()).await.unwrap();
    assert_eq!(created.id, id("d1"));
    assert_eq!(created.name, "Mojito");

    let fetched = c.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_sends_backend_field_names() {
    let c = client(MemoryBackend::default());
    c.create(&mojito()).await.unwrap();

    let stored = c.transport().state.lock().records[0].clone();
    assert_eq!(stored["korean_name"], "모히토");
    assert_eq!(stored["base"], "Rum");
    assert_eq!(stored["abv"], json!(12));
    assert!(stored.get("baseLiquor").is_none());
    assert!(stored.get("localizedName").is_none());
}

#[tokio::test]
async fn create_accepts_full_record_response() {
    let record = json!({"id": "r9", "name": "Paloma", "abv": 10, "base": "Tequila"});
    let c = CatalogClient::new(Canned(Ok(ApiResponse::new(201, Some(record)))));
    let created = c.create(&mojito()).await.unwrap();
    assert_eq!(created.id, id("r9"));
    assert_eq!(created.name, "Paloma");
}

#[tokio::test]
async fn create_without_id_is_a_mapping_error() {
    let c = CatalogClient::new(Canned(Ok(ok(json!({"message": "Created"})))));
    let err = c.create(&mojito()).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Mapping(MappingError::MissingField { field: "id" })
    ));
}

#[tokio::test]
async fn update_replaces_record() {
    let c = client(MemoryBackend::seeded(seed()));
    let mut draft = c.get(&id("n1")).await.unwrap().to_draft();
    draft.abv = 26.0;
    draft.tags.push("stirred".into());

    let updated = c.update(&id("n1"), &draft).await.unwrap();
    assert_eq!(updated.abv, 26.0);
    assert_eq!(c.get(&id("n1")).await.unwrap(), updated);

    let err = c.update(&id("nope"), &draft).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn ids_are_sent_as_a_single_path_segment() {
    let c = client(MemoryBackend::seeded(vec![
        json!({"_id": "other", "abv": 5, "base": "Rum"}),
        json!({"_id": "a/b?c#d", "name": "Odd", "abv": 5, "base": "Gin"}),
    ]));

    assert_eq!(c.get(&id("a/b?c#d")).await.unwrap().name, "Odd");
    assert_eq!(c.transport().last_path().as_deref(), Some("menu/a%2Fb%3Fc%23d"));

    assert!(c.delete(&id("other#fragment")).await.unwrap_err().is_not_found());
    assert_eq!(c.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn out_of_range_drafts_are_not_sent() {
    let c = client(MemoryBackend::seeded(seed()));
    let mut draft = mojito();
    draft.abv = f64::NAN;
    let err = c.create(&draft).await.unwrap_err();
    assert!(matches!(err, CatalogError::Mapping(ref e) if e.field() == Some("abv")));

    draft.abv = 140.0;
    let err = c.update(&id("n1"), &draft).await.unwrap_err();
    assert!(matches!(err, CatalogError::Mapping(_)));
    assert_eq!(c.transport().request_count(), 0);
}

#[tokio::test]
async fn status_errors_carry_backend_detail() {
    let c = CatalogClient::new(Canned(Ok(ApiResponse::new(
        500,
        Some(json!({"detail": "Database connection not available"})),
    ))));
    match c.list().await.unwrap_err() {
        CatalogError::Transport(e) => {
            assert_eq!(e.status(), Some(500));
            assert_eq!(e.detail(), Some("Database connection not available"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn list_404_is_a_transport_error() {
    let c = CatalogClient::new(Canned(Ok(ApiResponse::new(404, None))));
    let err = c.list().await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Transport(TransportError::Status {
            status: 404,
            detail: None
        })
    ));
}

#[tokio::test]
async fn structured_detail_is_stringified() {
    let response = ApiResponse::new(
        422,
        Some(json!({"detail": [{"loc": ["body", "abv"], "msg": "field required"}]})),
    );
    let c = CatalogClient::new(Canned(Ok(response)));
    let err = c.create(&mojito()).await.unwrap_err();
    let CatalogError::Transport(e) = err else {
        panic!("expected transport error");
    };
    assert!(e.detail().unwrap().contains("field required"));
    assert!(e.to_string().starts_with("backend returned status 422"));
}

#[tokio::test]
async fn network_errors_pass_through() {
    let failure = TransportError::Network {
        url: "http://localhost:8000/menu".into(),
        message: "connection refused".into(),
    };
    let c = CatalogClient::new(Canned(Err(failure.clone())));
    match c.get(&id("m1")).await.unwrap_err() {
        CatalogError::Transport(e) => assert_eq!(e, failure),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_records_are_surfaced() {
    let c = CatalogClient::new(Canned(Ok(ok(json!([{"id": "1", "base": "Gin"}])))));
    let err = c.list().await.unwrap_err();
    match err {
        CatalogError::Mapping(e) => assert_eq!(e.field(), Some("abv")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn page_falls_back_to_builtin_menu() {
    let down = || {
        CatalogClient::new(Canned(Err(TransportError::Network {
            url: "http://localhost:8000/menu".into(),
            message: "connection refused".into(),
        })))
    };

    let page = MenuPage::load(&down(), FallbackPolicy::BuiltIn).await.unwrap();
    assert!(page.is_fallback());
    assert_eq!(page.catalog().len(), 8);
    match page.source() {
        CatalogSource::Fallback { reason } => {
            assert!(matches!(reason, CatalogError::Transport(_)));
        }
        CatalogSource::Live => panic!("expected fallback"),
    }

    let err = MenuPage::load(&down(), FallbackPolicy::Strict).await.unwrap_err();
    assert!(matches!(err, CatalogError::Transport(_)));
}

#[tokio::test]
async fn page_reads_through_to_backend_on_miss() {
    let c = client(MemoryBackend::seeded(seed()));
    let mut page = MenuPage::load(&c, FallbackPolicy::Strict).await.unwrap();
    assert!(!page.is_fallback());
    let labels: Vec<_> = page.catalog().labels().collect();
    assert_eq!(labels, vec!["Gin", "Tequila"]);

    let before = c.transport().request_count();
    assert_eq!(page.drink_or_fetch(&c, &id("m1")).await.unwrap().name, "Margarita");
    assert_eq!(c.transport().request_count(), before);

    c.transport().push(json!({"_id": "w1", "name": "Whiskey Sour", "abv": 20, "base": "Whiskey"}));
    assert_eq!(page.drink_or_fetch(&c, &id("w1")).await.unwrap().name, "Whiskey Sour");
    assert_eq!(c.transport().request_count(), before + 1);
    let labels: Vec<_> = page.catalog().labels().collect();
    assert_eq!(labels, vec!["Gin", "Whiskey", "Tequila"]);

    assert!(page.drink_or_fetch(&c, &id("missing")).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn page_writes_go_through_the_client() {
    let c = client(MemoryBackend::seeded(seed()));
    let mut page = MenuPage::load(&c, FallbackPolicy::Strict).await.unwrap();

    let new_id = page.create(&c, &mojito()).await.unwrap();
    assert_eq!(page.catalog().drinks_in("Rum").count(), 1);

    let mut draft = mojito().with_name("Virgin Mojito");
    draft.base_liquor = BaseLiquor::NonAlcohol;
    draft.abv = 0.0;
    page.update(&c, &new_id, &draft).await.unwrap();
    assert_eq!(page.catalog().drinks_in("Rum").count(), 0);
    assert_eq!(
        page.catalog().drink(&new_id).unwrap().name,
        "Virgin Mojito"
    );

    page.delete(&c, &new_id).await.unwrap();
    assert!(page.catalog().drink(&new_id).is_none());
    assert_eq!(c.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn page_delete_evicts_stale_entries() {
    let c = client(MemoryBackend::seeded(seed()));
    let mut page = MenuPage::load(&c, FallbackPolicy::Strict).await.unwrap();

    // Someone else deleted it in the meantime.
    c.delete(&id("n1")).await.unwrap();
    let err = page.delete(&c, &id("n1")).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(page.catalog().drink(&id("n1")).is_none());
}

#[tokio::test]
async fn page_reload_keeps_cache_on_failure() {
    let live = client(MemoryBackend::seeded(seed()));
    let mut page = MenuPage::load(&live, FallbackPolicy::Strict).await.unwrap();

    let down = CatalogClient::new(Canned(Ok(ApiResponse::new(503, None))));
    assert!(page.reload(&down).await.is_err());
    assert_eq!(page.catalog().len(), 2);

    live.transport().push(json!({"_id": "v1", "abv": 10, "base": "Vodka"}));
    page.reload(&live).await.unwrap();
    assert_eq!(page.catalog().len(), 3);
}

#[test]
fn config_reads_first_non_empty_variable() {
    let config = ClientConfig::from_lookup(|key| match key {
        "MENU_API_URL" => Some("  ".into()),
        "API_URL" => Some("https://bar.example/api/".into()),
        "BACKEND_URL" => Some("http://ignored".into()),
        "MENU_API_TIMEOUT_SECS" => Some("15".into()),
        _ => None,
    });
    assert_eq!(config.base_url, "https://bar.example/api/");
    assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    assert_eq!(config.join("/menu/abc"), "https://bar.example/api/menu/abc");
}

#[test]
fn config_defaults_without_environment() {
    let config = ClientConfig::from_lookup(|key| match key {
        "MENU_API_TIMEOUT_SECS" => Some("soon".into()),
        _ => None,
    });
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout, None);
}

#[test]
fn join_url_uses_exactly_one_slash() {
    assert_eq!(join_url("http://localhost:8000", "menu"), "http://localhost:8000/menu");
    assert_eq!(join_url("http://localhost:8000/", "/menu"), "http://localhost:8000/menu");
    assert_eq!(join_url("/api", "menu/7"), "/api/menu/7");
}

#[test]
fn response_detail_handles_plain_text_and_objects() {
    assert_eq!(
        ApiResponse::new(502, Some(json!("Bad Gateway"))).detail(),
        Some("Bad Gateway".to_string())
    );
    assert_eq!(ApiResponse::new(500, Some(json!({"error": "x"}))).detail(), None);
    assert_eq!(ApiResponse::new(500, None).detail(), None);
    assert!(ApiResponse::new(204, None).is_success());
}

#[test]
fn http_transport_builds_from_config() {
    let config = ClientConfig::new("http://localhost:8000").with_timeout(Duration::from_secs(5));
    let transport = HttpTransport::new(config.clone()).unwrap();
    assert_eq!(transport.config(), &config);
}

/// Serves one HTTP exchange on a local port. The handle yields the request line received.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut chunk = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&chunk[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&head)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });
    (base_url, handle)
}

fn http_client(base_url: &str) -> CatalogClient {
    CatalogClient::from_config(ClientConfig::new(base_url)).unwrap()
}

#[tokio::test]
async fn http_delete_encodes_the_id() {
    let (base_url, server) = serve_once("200 OK", r#"{"message": "Deleted"}"#).await;
    http_client(&base_url)
        .delete(&id("other#fragment"))
        .await
        .unwrap();
    assert_eq!(
        server.await.unwrap(),
        "DELETE /menu/other%23fragment HTTP/1.1"
    );
}

#[tokio::test]
async fn http_get_maps_record_and_404() {
    let record = r#"{"_id": "n1", "name": "Negroni", "abv": 24, "base": "Gin"}"#;
    let (base_url, server) = serve_once("200 OK", record).await;
    let drink = http_client(&base_url).get(&id("n1")).await.unwrap();
    assert_eq!(drink.name, "Negroni");
    assert_eq!(server.await.unwrap(), "GET /menu/n1 HTTP/1.1");

    let (base_url, _server) = serve_once("404 Not Found", r#"{"detail": "Drink not found"}"#).await;
    let err = http_client(&base_url).get(&id("gone")).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn http_blank_body_is_absent() {
    let (base_url, _server) = serve_once("200 OK", "  \n").await;
    let transport = HttpTransport::new(ClientConfig::new(base_url)).unwrap();
    let response = transport.send(ApiRequest::delete("menu/x")).await.unwrap();
    assert_eq!(response, ApiResponse::new(200, None));
}

#[tokio::test]
async fn http_plain_text_error_becomes_detail() {
    let (base_url, _server) = serve_once("502 Bad Gateway", "upstream unavailable").await;
    match http_client(&base_url).list().await.unwrap_err() {
        CatalogError::Transport(e) => {
            assert_eq!(e.status(), Some(502));
            assert_eq!(e.detail(), Some("upstream unavailable"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn http_invalid_json_on_success_is_a_body_error() {
    let (base_url, _server) = serve_once("200 OK", "{not json").await;
    let err = http_client(&base_url).list().await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Transport(TransportError::Body(_))
    ));
}

#[tokio::test]
async fn http_connection_refused_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    match http_client(&base_url).list().await.unwrap_err() {
        CatalogError::Transport(TransportError::Network { url, .. }) => {
            assert_eq!(url, format!("{base_url}/menu"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
