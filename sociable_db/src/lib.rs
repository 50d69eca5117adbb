use sociable_core::error::SocError;

use anyhow::Context;
use entrait::entrait_export as entrait;
use sqlx::error::DatabaseError;
use sqlx::PgPool;

pub mod account_db;
pub mod follow_db;
pub mod post_db;
pub mod profile_db;

#[derive(Clone)]
pub struct Db {
    pub pg_pool: PgPool,
}

impl Db {
    pub async fn init(url: &str) -> anyhow::Result<Self> {
        let pg_pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(50)
            .connect(url)
            .await
            .context("could not connect to database_url")?;

        sqlx::migrate!("../migrations").run(&pg_pool).await?;

        Ok(Db { pg_pool })
    }
}

#[entrait(pub GetPgPool)]
fn get_pg_pool(db: &Db) -> &PgPool {
    &db.pg_pool
}

trait DbResultExt<T> {
    fn on_constraint(
        self,
        name: &str,
        f: impl FnOnce(Box<dyn DatabaseError>) -> SocError,
    ) -> Result<T, SocError>;
}

impl<T, E> DbResultExt<T> for Result<T, E>
where
    E: Into<SocError>,
{
    fn on_constraint(
        self,
        name: &str,
        map_err: impl FnOnce(Box<dyn DatabaseError>) -> SocError,
    ) -> Result<T, SocError> {
        self.map_err(|e| match e.into() {
            SocError::Sqlx(sqlx::Error::Database(dbe)) if dbe.constraint() == Some(name) => {
                map_err(dbe)
            }
            e => e,
        })
    }
}
