use axum::extract::State;
use axum::Json;

use crate::datasource::repository::stats;
use crate::errors::Error;
use crate::models::{Stats, SEASON};
use crate::state::DBPool;

pub(crate) async fn get(State(pool): State<DBPool>) -> Result<Json<Stats>, Error> {
    let stats = stats::get(&pool, SEASON).await?;
    Ok(Json(stats))
}
