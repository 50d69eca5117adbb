use crate::GetPgPool;
use sociable_core::error::SocResult;
use sociable_core::AccountId;

use entrait::entrait_export as entrait;
use uuid::Uuid;

#[derive(Clone, Debug, Eq, PartialEq, sqlx::FromRow)]
pub struct Profile {
    pub account_id: Uuid,
    pub display_name: String,
    pub image: Option<String>,
}

/// Field values for a profile update. `image: None` keeps the stored
/// reference; clearing an image goes through the media collaborator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileChanges {
    pub display_name: String,
    pub image: Option<String>,
}

/// The one place a profile row is born. Called by account registration
/// right after the account row is inserted.
#[entrait(pub InsertProfile)]
async fn insert_profile(deps: &impl GetPgPool, AccountId(account_id): AccountId) -> SocResult<Profile> {
    let profile: Profile = sqlx::query_as(
        r#"INSERT INTO app.profile (account_id) VALUES ($1) RETURNING account_id, display_name, image"#,
    )
    .bind(account_id)
    .fetch_one(deps.get_pg_pool())
    .await?;

    Ok(profile)
}

#[entrait(pub FindProfileByAccountId)]
async fn find_profile_by_account_id(
    deps: &impl GetPgPool,
    AccountId(account_id): AccountId,
) -> SocResult<Option<Profile>> {
    let profile: Option<Profile> = sqlx::query_as(
        r#"SELECT account_id, display_name, image FROM app.profile WHERE account_id = $1"#,
    )
    .bind(account_id)
    .fetch_optional(deps.get_pg_pool())
    .await?;

    Ok(profile)
}

#[entrait(pub UpdateProfile)]
async fn update_profile(
    deps: &impl GetPgPool,
    AccountId(account_id): AccountId,
    changes: ProfileChanges,
) -> SocResult<Profile> {
    let profile: Profile = sqlx::query_as(
        r#"
        UPDATE app.profile SET
            display_name = $1,
            image = COALESCE($2, image)
        WHERE account_id = $3
        RETURNING account_id, display_name, image
        "#,
    )
    .bind(changes.display_name)
    .bind(changes.image)
    .bind(account_id)
    .fetch_one(deps.get_pg_pool())
    .await?;

    Ok(profile)
}
