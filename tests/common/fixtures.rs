//! Payload fixtures and a mock catalog server

use rickmorty_feed::{
    ApiConfig, Config, FeedDependencies, FeedStateMachine, RetryConfig, RickMortyClient,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One character as the API serves it
pub fn character_json(id: u32, status: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Character {id}"),
        "status": status,
        "species": "Human",
        "type": "",
        "gender": "Female",
        "origin": { "name": "Earth (C-137)", "url": "" },
        "location": { "name": "Citadel of Ricks", "url": "" },
        "image": format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        "episode": [],
        "url": format!("https://rickandmortyapi.com/api/character/{id}"),
        "created": "2017-11-04T18:50:21.651Z"
    })
}

/// Page payload with `ids`; `has_next` controls the `next` link
pub fn page_json(ids: &[u32], status: &str, has_next: bool) -> Value {
    let next = has_next.then(|| "https://rickandmortyapi.com/api/character?page=next");
    json!({
        "info": { "count": 826, "pages": 42, "next": next, "prev": null },
        "results": ids.iter().map(|id| character_json(*id, status)).collect::<Vec<_>>()
    })
}

/// Serve `body` for `GET /api/character` with the given page and status
///
/// Page 1 of the unfiltered listing is requested with `page=1` by the feed, so both
/// params are matched exactly; `status: None` requires the param to be absent.
pub async fn mount_page(server: &MockServer, page: u32, status: Option<&str>, body: Value) {
    let mock = Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("page", page.to_string()));
    let mock = match status {
        Some(status) => mock.and(query_param("status", status)),
        None => mock.and(query_param_is_missing("status")),
    };
    mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve a bare status code for the given page, unfiltered
pub async fn mount_status(server: &MockServer, page: u32, code: u16) {
    Mock::given(method("GET"))
        .and(path("/api/character"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(code))
        .mount(server)
        .await;
}

/// Configuration pointing at `server`, with retries disabled
pub fn config_for(server: &MockServer) -> Config {
    Config {
        api: ApiConfig {
            base_url: format!("{}/api", server.uri()),
            timeout: Duration::from_secs(5),
            ..ApiConfig::default()
        },
        retry: RetryConfig::disabled(),
        ..Config::default()
    }
}

/// Feed wired to the real HTTP client
pub fn feed_for(config: &Config) -> FeedStateMachine {
    let client = RickMortyClient::from_config(config).expect("valid config");
    FeedStateMachine::new(FeedDependencies::new(Arc::new(client)), &config.feed)
}
