use anyhow::Result;
use sqlx::{Executor, Postgres};
use tracing::instrument;

use crate::models::{CreatedLink, NewLink};

pub mod models {
    use chrono::{DateTime, Utc};

    use crate::models::CreatedLink;

    #[derive(Debug, sqlx::FromRow)]
    pub struct LinkEntity {
        pub id: i32,
        pub episode_id: i32,
        pub url: String,
        pub quality: String,
        pub source: String,
        pub created_at: DateTime<Utc>,
    }

    impl From<LinkEntity> for CreatedLink {
        fn from(value: LinkEntity) -> Self {
            Self {
                id: value.id,
                episode_id: value.episode_id,
                url: value.url,
                quality: value.quality,
                source: value.source,
                created_at: value.created_at,
            }
        }
    }
}

/// Inserts a link for `episode_id`.
///
/// Returns `None` when the episode no longer exists at insert time, which the
/// store reports as a foreign key violation.
#[instrument(skip(executor, link), fields(url = %link.url))]
pub async fn insert<'e, E>(
    executor: E,
    episode_id: i32,
    link: &NewLink,
) -> Result<Option<CreatedLink>>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query_as::<_, models::LinkEntity>(include_str!(
        "../../../queries/insert_episode_link.sql"
    ))
    .bind(episode_id)
    .bind(&link.url)
    .bind(&link.quality)
    .bind(&link.source)
    .fetch_one(executor)
    .await;

    match result {
        Ok(entity) => Ok(Some(entity.into())),
        Err(sqlx::Error::Database(err)) if err.is_foreign_key_violation() => Ok(None),
        Err(err) => Err(err.into()),
    }
}
