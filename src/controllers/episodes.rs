use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::datasource::repository::episode::{self, EpisodeQueryOptions, EpisodeSort};
use crate::errors::Error;
use crate::models::{Episode, SEASON};
use crate::state::DBPool;

#[derive(Debug, Deserialize)]
pub(crate) struct EpisodeQuery {
    search: Option<String>,
    #[serde(default)]
    sort: EpisodeSort,
}

pub(crate) async fn get_collection(
    State(pool): State<DBPool>,
    params: Result<Query<EpisodeQuery>, QueryRejection>,
) -> Result<Json<Vec<Episode>>, Error> {
    let Query(params) = params?;
    let options = EpisodeQueryOptions {
        search: params.search,
        sort: params.sort,
    };
    let episodes = episode::get_with_links(&pool, SEASON, options).await?;
    Ok(Json(episodes))
}

pub(crate) async fn export(State(pool): State<DBPool>) -> Result<impl IntoResponse, Error> {
    let episodes = episode::get_with_links(&pool, SEASON, EpisodeQueryOptions::default()).await?;
    let body = serde_json::to_string_pretty(&episodes)?;
    let disposition = format!("attachment; filename=\"season-{SEASON}-episodes.json\"");
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
