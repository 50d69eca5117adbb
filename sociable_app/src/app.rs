use crate::config::Config;
use sociable_db::{Db, GetPgPool};

use entrait::entrait_export as entrait;
use sqlx::PgPool;
use std::sync::Arc;
use time::OffsetDateTime;

#[derive(Clone)]
pub struct App {
    pub config: Arc<Config>,
    pub db: Db,
}

impl GetPgPool for App {
    fn get_pg_pool(&self) -> &PgPool {
        self.db.get_pg_pool()
    }
}

#[entrait(pub GetJwtSigningKey)]
fn get_jwt_signing_key(app: &App) -> &hmac::Hmac<sha2::Sha384> {
    &app.config.jwt_signing_key.0
}

#[entrait(pub GetCurrentTime)]
fn get_current_time(_: &App) -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
