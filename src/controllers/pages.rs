use axum::extract::State;
use axum::response::Html;

use crate::datasource::repository::episode::{self, EpisodeQueryOptions};
use crate::datasource::repository::stats;
use crate::errors::Error;
use crate::models::SEASON;
use crate::state::DBPool;
use crate::view;

pub(crate) async fn index(State(pool): State<DBPool>) -> Result<Html<String>, Error> {
    let (episodes, stats) = tokio::try_join!(
        episode::get_with_links(&pool, SEASON, EpisodeQueryOptions::default()),
        stats::get(&pool, SEASON),
    )?;
    Ok(Html(view::render_page(&episodes, &stats)))
}
