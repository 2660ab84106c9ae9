use es_client::{get_path, Config, EsClient, ReqwestTransport};

/// Client for a local cluster, optionally authenticated through ES_USERNAME / ES_PASSWORD
fn local_client() -> EsClient<ReqwestTransport> {
    let mut client = EsClient::connect(&Config::default()).expect("failed to build client");
    if let (Ok(username), Ok(password)) = (std::env::var("ES_USERNAME"), std::env::var("ES_PASSWORD")) {
        client.set_basic_auth(username, password);
    }
    client
}

#[test]
#[ignore] // Run with: cargo test --test integration_tests -- --ignored
fn test_document_lifecycle() {
    let mut client = local_client();

    let response = client
        .index("es-client-test", r#"{"title":"Dune","year":1965}"#, "refresh=true")
        .expect("failed to index");
    assert_eq!(response.status_code, 201, "index failed: {}", response.body);

    let id = response
        .get_string("_id")
        .expect("expected _id in index response");

    let response = client
        .get("es-client-test", &id, "")
        .expect("failed to get");
    assert!(response.is_success());
    assert_eq!(response.get_string("_source/title"), Some("Dune".to_string()));

    let response = client
        .update("es-client-test", &id, r#"{"doc":{"year":1966}}"#, "refresh=true")
        .expect("failed to update");
    assert!(response.is_success(), "update failed: {}", response.body);

    let response = client
        .search(
            "es-client-test",
            r#"{"query":{"term":{"year":1966}}}"#,
            "",
        )
        .expect("failed to search");
    assert!(response.is_success());
    let hits = response.value().expect("search response is not JSON");
    let found = get_path(&hits, "hits/hits")
        .and_then(|v| v.as_array())
        .expect("expected hits array")
        .iter()
        .any(|hit| get_path(hit, "_id").and_then(|v| v.as_str()) == Some(id.as_str()));
    assert!(found, "indexed document missing from search: {}", response.body);

    let response = client
        .del("es-client-test", &id, "refresh=true")
        .expect("failed to delete");
    assert!(response.is_success());

    let response = client
        .get("es-client-test", &id, "")
        .expect("failed to get");
    assert!(response.is_not_found());

    println!("Document lifecycle test passed for id {}", id);
}

#[test]
#[ignore]
fn test_missing_index() {
    let mut client = local_client();

    let response = client
        .get("es-client-test-does-not-exist", "1", "")
        .expect("request failed");

    assert_eq!(response.status_code, 404);
    assert!(response.get("error").is_some(), "expected error object: {}", response.body);
}
