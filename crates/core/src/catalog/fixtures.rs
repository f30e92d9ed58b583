//! In-memory catalog for tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::client::{CatalogClient, CatalogTransport};
use super::error::{CatalogError, CatalogResult};

#[derive(Clone)]
enum Route {
    Json(Value),
    Status(u16),
    Garbage,
}

#[derive(Default)]
struct Inner {
    routes: Mutex<HashMap<String, Route>>,
    delays: Mutex<HashMap<String, Duration>>,
    hits: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

/// Routes keyed by absolute URL; unknown URLs answer 404
#[derive(Clone, Default)]
pub struct FixtureCatalog {
    inner: Arc<Inner>,
}

impl FixtureCatalog {
    pub const BASE: &'static str = "https://catalog.test/api/v2";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self) -> CatalogClient {
        CatalogClient::with_transport(Self::BASE, Arc::new(self.clone()))
    }

    pub fn url(path: &str) -> String {
        format!("{}/{}", Self::BASE, path.trim_start_matches('/'))
    }

    fn route(&self, path: &str, route: Route) {
        self.inner
            .routes
            .lock()
            .unwrap()
            .insert(Self::url(path), route);
    }

    pub fn serve(&self, path: &str, body: Value) {
        self.route(path, Route::Json(body));
    }

    pub fn fail(&self, path: &str, status: u16) {
        self.route(path, Route::Status(status));
    }

    /// 200 with a body that is not JSON
    pub fn garbage(&self, path: &str) {
        self.route(path, Route::Garbage);
    }

    pub fn delay(&self, path: &str, delay: Duration) {
        self.inner
            .delays
            .lock()
            .unwrap()
            .insert(Self::url(path), delay);
    }

    pub fn hits(&self) -> Vec<String> {
        self.inner.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self, path: &str) -> usize {
        let url = Self::url(path);
        self.hits().iter().filter(|hit| **hit == url).count()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.inner.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Register `pokemon/{id}` and `pokemon/{name}` plus a species record
    ///
    /// The species points at `evolution-chain/{chain}` when `chain` is set.
    pub fn add_pokemon(&self, id: u32, name: &str, types: &[&str], chain: Option<u32>) {
        let record = pokemon_json(id, name, types);
        self.serve(&format!("pokemon/{}", id), record.clone());
        self.serve(&format!("pokemon/{}", name), record);
        let evolution_chain = chain.map(|c| json!({ "url": Self::url(&format!("evolution-chain/{}", c)) }));
        self.serve(
            &format!("pokemon-species/{}", id),
            json!({ "id": id, "name": name, "evolution_chain": evolution_chain }),
        );
    }

    pub fn add_chain(&self, id: u32, chain: Value) {
        self.serve(&format!("evolution-chain/{}", id), json!({ "id": id, "chain": chain }));
    }
}

#[async_trait]
impl CatalogTransport for FixtureCatalog {
    async fn get_json(&self, url: &str) -> CatalogResult<Value> {
        self.inner.hits.lock().unwrap().push(url.to_string());
        let now = self.inner.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.inner.delays.lock().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        let route = self.inner.routes.lock().unwrap().get(url).cloned();
        self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);

        match route {
            Some(Route::Json(body)) => Ok(body),
            Some(Route::Status(status)) => Err(CatalogError::from_status(url, status)),
            Some(Route::Garbage) => Err(CatalogError::malformed(url, "expected value at line 1")),
            None => Err(CatalogError::from_status(url, 404)),
        }
    }
}

/// Minimal but complete `/pokemon/{key}` body
pub fn pokemon_json(id: u32, name: &str, types: &[&str]) -> Value {
    let types: Vec<Value> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({ "slot": i + 1, "type": { "name": t, "url": "" } }))
        .collect();
    let stats: Vec<Value> = [
        "hp",
        "attack",
        "defense",
        "special-attack",
        "special-defense",
        "speed",
    ]
    .iter()
    .enumerate()
    .map(|(i, s)| json!({ "base_stat": 40 + i as u32, "effort": 0, "stat": { "name": s, "url": "" } }))
    .collect();
    json!({
        "id": id,
        "name": name,
        "height": 10,
        "weight": 100,
        "types": types,
        "sprites": {
            "front_default": format!("https://img.test/{}.png", id),
            "front_shiny": format!("https://img.test/shiny/{}.png", id),
            "other": {
                "official-artwork": {
                    "front_default": format!("https://img.test/art/{}.png", id),
                    "front_shiny": null
                }
            }
        },
        "stats": stats,
        "abilities": [{ "ability": { "name": format!("{}-ability", name), "url": "" }, "is_hidden": false }],
        "species": { "name": name, "url": FixtureCatalog::url(&format!("pokemon-species/{}", id)) }
    })
}

/// Evolution tree node for `add_chain`
pub fn link(species: &str, evolves_to: Vec<Value>) -> Value {
    json!({ "species": { "name": species, "url": "" }, "evolves_to": evolves_to })
}
