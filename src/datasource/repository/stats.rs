use anyhow::Result;
use sqlx::{Executor, Postgres};
use tracing::instrument;

use crate::models::Stats;

#[derive(Debug, sqlx::FromRow)]
struct StatsEntity {
    total_episodes: i64,
    total_links: i64,
    episodes_with_links: i64,
}

impl From<StatsEntity> for Stats {
    fn from(value: StatsEntity) -> Self {
        Self {
            total_episodes: value.total_episodes,
            total_links: value.total_links,
            episodes_with_links: value.episodes_with_links,
        }
    }
}

#[instrument(skip(executor))]
pub async fn get<'e, E>(executor: E, season: i32) -> Result<Stats>
where
    E: Executor<'e, Database = Postgres>,
{
    let entity = sqlx::query_as::<_, StatsEntity>(include_str!("../../../queries/query_stats.sql"))
        .bind(season)
        .fetch_one(executor)
        .await?;
    Ok(entity.into())
}
