use anyhow::Result;
use futures::TryStreamExt;
use serde::Deserialize;
use sqlx::{Executor, Postgres, QueryBuilder};
use tracing::instrument;

use crate::models as domain_models;

pub mod models {
    use chrono::NaiveDate;
    use serde::Deserialize;
    use sqlx::types::Json;

    use crate::models as domain_models;

    #[derive(Debug, Deserialize)]
    pub struct LinkEntity {
        pub url: String,
        pub quality: String,
        pub source: String,
    }

    #[derive(Debug, sqlx::FromRow)]
    pub struct EpisodeEntity {
        pub id: i32,
        pub title: String,
        pub description: String,
        pub season: i32,
        pub episode: i32,
        pub air_date: NaiveDate,
        pub links: Json<Vec<LinkEntity>>,
    }

    impl From<LinkEntity> for domain_models::Link {
        fn from(value: LinkEntity) -> Self {
            Self {
                url: value.url,
                quality: value.quality,
                source: value.source,
            }
        }
    }

    impl From<EpisodeEntity> for domain_models::Episode {
        fn from(value: EpisodeEntity) -> Self {
            Self {
                id: value.id,
                title: value.title,
                description: value.description,
                season: value.season,
                episode: value.episode,
                air_date: value.air_date,
                links: value.links.0.into_iter().map(Into::into).collect(),
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeSort {
    #[default]
    Episode,
    Title,
    Date,
    Links,
}

impl EpisodeSort {
    fn order_by(self) -> &'static str {
        match self {
            Self::Episode => " ORDER BY e.episode",
            Self::Title => " ORDER BY e.title, e.episode",
            Self::Date => " ORDER BY e.air_date, e.episode",
            Self::Links => " ORDER BY COUNT(el.id) DESC, e.episode",
        }
    }
}

#[derive(Debug, Default)]
pub struct EpisodeQueryOptions {
    pub search: Option<String>,
    pub sort: EpisodeSort,
}

/// Escapes `LIKE` metacharacters and wraps the term for a substring match.
/// NUL bytes are dropped since Postgres text cannot hold them.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars().filter(|&c| c != '\0') {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn build_query(season: i32, options: &EpisodeQueryOptions) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT e.id, e.title, e.description, e.season, e.episode, e.air_date, \
         COALESCE(\
            json_agg(\
                json_build_object('url', el.url, 'quality', el.quality, 'source', el.source) \
                ORDER BY el.created_at, el.id\
            ) FILTER (WHERE el.id IS NOT NULL), \
            '[]'\
         ) AS links \
         FROM episodes e \
         LEFT JOIN episode_links el ON e.id = el.episode_id \
         WHERE e.season = ",
    );
    qb.push_bind(season);
    if let Some(search) = options.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = like_pattern(search);
        qb.push(" AND (e.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR e.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    qb.push(" GROUP BY e.id");
    qb.push(options.sort.order_by());
    qb
}

/// Lists every episode of `season` with its links nested in submission order.
#[instrument(skip(executor))]
pub async fn get_with_links<'e, E>(
    executor: E,
    season: i32,
    options: EpisodeQueryOptions,
) -> Result<Vec<domain_models::Episode>>
where
    E: Executor<'e, Database = Postgres>,
{
    let mut qb = build_query(season, &options);
    let episodes: Vec<domain_models::Episode> = qb
        .build_query_as::<models::EpisodeEntity>()
        .fetch(executor)
        .map_ok(domain_models::Episode::from)
        .try_collect()
        .await?;
    Ok(episodes)
}

pub async fn exists<'e, E>(executor: E, id: i32) -> Result<bool>
where
    E: Executor<'e, Database = Postgres>,
{
    let row: Option<(i32,)> = sqlx::query_as(include_str!("../../../queries/query_episode_exists.sql"))
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row.is_some())
}
