use anyhow::Result;
use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use tracing::info;

use crate::models::SEASON;
use crate::state::DBPool;

#[derive(Debug, Clone, Copy)]
pub struct SeedEpisode {
    pub title: &'static str,
    pub description: &'static str,
    pub episode: i32,
    pub air_date: NaiveDate,
}

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid seed air date"),
    }
}

pub const SEED_EPISODES: [SeedEpisode; 10] = [
    SeedEpisode {
        title: "Summer of All Fears",
        description: "To punish Morty and Summer, Rick puts them in a simulation.",
        episode: 1,
        air_date: date(2025, 5, 25),
    },
    SeedEpisode {
        title: "Valkyrick",
        description: "Space Beth calls her dad for a ride, broh.",
        episode: 2,
        air_date: date(2025, 6, 1),
    },
    SeedEpisode {
        title: "The Rick, The Mort & The Ugly",
        description: "Some guys wanna rebuild the citadel, broh. Seems like a bad idea, broh. Yeehaw stuff, broh.",
        episode: 3,
        air_date: date(2025, 6, 8),
    },
    SeedEpisode {
        title: "The Last Temptation of Jerry",
        description: "Broh is risen. The Smiths learn the true meaning of Easter. Kind of. Broh.",
        episode: 4,
        air_date: date(2025, 6, 15),
    },
    SeedEpisode {
        title: "Cryo Mort a Rickver",
        description: "Rick and Morty wanna rob a ship in cryosleep, but people are light sleepers.",
        episode: 5,
        air_date: date(2025, 6, 22),
    },
    SeedEpisode {
        title: "The Curicksous Case of Bethjamin Button",
        description: "The brohs goes to a theme park Rick loves. Beth and Space Beth stay behind and regress or something.",
        episode: 6,
        air_date: date(2025, 6, 29),
    },
    SeedEpisode {
        title: "Ricker Than Fiction",
        description: "Rick and Morty write the next installment of their favorite movie franchise.",
        episode: 7,
        air_date: date(2025, 7, 6),
    },
    SeedEpisode {
        title: "Nomortland",
        description: "Jerry makes a friend just as jobless as he is.",
        episode: 8,
        air_date: date(2025, 7, 13),
    },
    SeedEpisode {
        title: "Morty Daddy",
        description: "Summer and Rick dine out. Morty reconnects with someone from his past.",
        episode: 9,
        air_date: date(2025, 7, 20),
    },
    SeedEpisode {
        title: "Hot Rick",
        description: "Sometimes we try weird stuff to let go of the past.",
        episode: 10,
        air_date: date(2025, 7, 27),
    },
];

async fn count_episodes<'e, E>(executor: E) -> Result<i64>
where
    E: Executor<'e, Database = Postgres>,
{
    let (count,): (i64,) = sqlx::query_as(include_str!("../../../queries/count_episodes.sql"))
        .fetch_one(executor)
        .await?;
    Ok(count)
}

async fn insert_episode<'e, E>(executor: E, seed: &SeedEpisode) -> Result<()>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(include_str!("../../../queries/insert_episode.sql"))
        .bind(seed.title)
        .bind(seed.description)
        .bind(SEASON)
        .bind(seed.episode)
        .bind(seed.air_date)
        .execute(executor)
        .await?;
    Ok(())
}

/// Inserts the fixed episode list when the catalog is empty.
///
/// Returns whether anything was inserted.
pub async fn seed_if_empty(pool: &DBPool) -> Result<bool> {
    let mut transaction = pool.begin().await?;
    if count_episodes(&mut *transaction).await? > 0 {
        info!("episodes already exist, skipping default data insertion");
        return Ok(false);
    }
    for seed in &SEED_EPISODES {
        insert_episode(&mut *transaction, seed).await?;
    }
    transaction.commit().await?;
    info!("inserted {} default episodes", SEED_EPISODES.len());
    Ok(true)
}
