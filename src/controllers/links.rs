use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::datasource::repository::{episode, link};
use crate::errors::Error;
use crate::models::{CreatedLink, NewLink, NewLinkRequest};
use crate::state::DBPool;

#[derive(Debug, Serialize)]
pub(crate) struct CreatedLinkResponse {
    message: &'static str,
    link: CreatedLink,
}

/// Non-numeric ids can never name an episode; they end up as a 404.
fn parse_episode_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

pub(crate) async fn create(
    Path(id): Path<String>,
    State(pool): State<DBPool>,
    payload: Result<Json<NewLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedLinkResponse>), Error> {
    let Json(request) = payload?;
    let new_link = NewLink::try_from(request)?;
    let episode_id = parse_episode_id(&id).ok_or(Error::EpisodeNotFound)?;

    // The check and the insert are separate statements; the foreign key on
    // episode_links backs up a concurrent delete in between.
    if !episode::exists(&pool, episode_id).await? {
        return Err(Error::EpisodeNotFound);
    }
    let created = link::insert(&pool, episode_id, &new_link)
        .await?
        .ok_or(Error::EpisodeNotFound)?;

    info!(episode_id, link_id = created.id, "link added");
    Ok((
        StatusCode::CREATED,
        Json(CreatedLinkResponse {
            message: "Link added successfully",
            link: created,
        }),
    ))
}
