//! # Pokemon API
//!
//! Endpoints for listing, detail, type filtering and search.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use pokedex_core::domain::{EntityDetail, EntityKey, EntitySummary, Page, TypeTag};
use pokedex_core::resolve::DEFAULT_PAGE_SIZE;
use serde::Deserialize;

use super::{ApiError, SharedState};

/// Largest page a client may ask for
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub offset: u32,
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub fn pokemon_routes() -> Router<SharedState> {
    Router::new()
        .route("/pokemon", get(list_pokemon))
        .route("/pokemon/:key", get(get_pokemon))
        .route("/types", get(list_types))
        .route("/types/:category", get(pokemon_by_type))
        .route("/search", get(search_pokemon))
}

/// One page of summaries
async fn list_pokemon(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page>, ApiError> {
    let page = state.resolver.fetch_page(query.offset, query.limit()).await?;
    Ok(Json(page))
}

/// Full detail by id or name
async fn get_pokemon(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<Json<EntityDetail>, ApiError> {
    let key = EntityKey::parse(&key)
        .ok_or_else(|| ApiError::BadRequest("key must not be blank".to_string()))?;
    let detail = state.resolver.fetch_detail(&key).await?;
    Ok(Json(detail))
}

/// The known type vocabulary
async fn list_types() -> Json<Vec<TypeTag>> {
    Json(TypeTag::ALL.to_vec())
}

/// Up to `category_cap` members of a type
async fn pokemon_by_type(
    State(state): State<SharedState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<EntitySummary>>, ApiError> {
    let items = state.resolver.fetch_by_category(&category).await?;
    Ok(Json(items))
}

/// `null` when nothing matches
async fn search_pokemon(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Option<EntityDetail>>, ApiError> {
    let found = state.resolver.fetch_by_key(&query.q).await?;
    Ok(Json(found))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_limit_defaults_and_clamps() {
        let query = PageQuery {
            offset: 0,
            limit: None,
        };
        assert_eq!(query.limit(), DEFAULT_PAGE_SIZE);

        let query = PageQuery {
            offset: 40,
            limit: Some(5_000),
        };
        assert_eq!(query.limit(), MAX_PAGE_SIZE);

        let query = PageQuery {
            offset: 0,
            limit: Some(0),
        };
        assert_eq!(query.limit(), 1);
    }
}
