//! Shared helpers for route tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use catalog::{
    CatalogConfig, CatalogError, CatalogSession, DetailRef, EvolutionLink, IdentityRef,
    MockCreatureSource, SpeciesDescriptor,
};
use shared::{Creature, PokemonType};
use webserver::WebServer;

pub const NAMES: [(u32, &str); 4] = [
    (1, "bulbasaur"),
    (2, "ivysaur"),
    (3, "venusaur"),
    (4, "charmander"),
];

pub fn creature(id: u32) -> Creature {
    let name = NAMES
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, name)| *name)
        .unwrap_or("unknown");
    let types: &[PokemonType] = if id == 4 {
        &[PokemonType::Fire]
    } else {
        &[PokemonType::Grass, PokemonType::Poison]
    };
    Creature::new(id, name)
        .with_types(types)
        .with_stats([40 + id, 50 + id, 50, 60, 60, 45])
        .with_sprite(format!("https://img.example/{id}.png"))
}

/// Mock source over four creatures; only the bulbasaur line has a chain
pub fn mock_source(listing_up: bool) -> MockCreatureSource {
    let mut source = MockCreatureSource::new();
    source.expect_list_identities().returning(move || {
        if !listing_up {
            return Err(CatalogError::source_unavailable("connection refused"));
        }
        Ok(NAMES
            .iter()
            .map(|(id, name)| IdentityRef {
                id: *id,
                name: name.to_string(),
                detail: DetailRef::new(format!("https://pokeapi.example/api/v2/pokemon/{id}/")),
            })
            .collect())
    });
    source
        .expect_fetch_detail()
        .returning(|detail| Ok(creature(detail.trailing_id().unwrap_or_default())));
    source
        .expect_fetch_creature()
        .returning(|id| Ok(creature(id)));
    source.expect_fetch_species().returning(|id| {
        if id <= 3 {
            Ok(SpeciesDescriptor {
                id,
                name: format!("species-{id}"),
                evolution_chain: DetailRef::new("https://pokeapi.example/api/v2/evolution-chain/1/"),
            })
        } else {
            Err(CatalogError::evolution_unavailable(id, "HTTP error! status: 404"))
        }
    });
    source.expect_fetch_evolution_graph().returning(|_| {
        Ok(EvolutionLink::new(1, "bulbasaur").evolves_to(vec![EvolutionLink::new(2, "ivysaur")
            .evolves_to(vec![EvolutionLink::new(3, "venusaur")])]))
    });
    source
}

pub fn server(source: MockCreatureSource) -> WebServer<MockCreatureSource> {
    let config = CatalogConfig::default().with_debounce(Duration::from_millis(20));
    let session = Arc::new(CatalogSession::new(source, config));
    WebServer::new("127.0.0.1:0".parse().unwrap(), session)
}

/// A server whose session has already loaded the mock catalog
pub async fn loaded_server() -> WebServer<MockCreatureSource> {
    let server = server(mock_source(true));
    server.session().load().await.unwrap();
    server
}

pub async fn send(
    server: &WebServer<MockCreatureSource>,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = server.build_router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
