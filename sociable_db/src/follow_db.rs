use crate::GetPgPool;
use sociable_core::error::SocResult;
use sociable_core::AccountId;

use entrait::entrait_export as entrait;

/// Idempotent: a pre-existing edge is absorbed by the pair constraint, so
/// concurrent duplicate follows converge on one row.
#[entrait(pub InsertFollow)]
async fn insert_follow(
    deps: &impl GetPgPool,
    AccountId(follower): AccountId,
    AccountId(followed): AccountId,
) -> SocResult<()> {
    sqlx::query(
        r#"
        INSERT INTO app.follow (follower_account_id, followed_account_id)
        VALUES ($1, $2)
        ON CONFLICT ON CONSTRAINT follow_pair_key DO NOTHING
        "#,
    )
    .bind(follower)
    .bind(followed)
    .execute(deps.get_pg_pool())
    .await?;

    Ok(())
}

/// Idempotent: deleting an absent edge affects zero rows and is not an error.
#[entrait(pub DeleteFollow)]
async fn delete_follow(
    deps: &impl GetPgPool,
    AccountId(follower): AccountId,
    AccountId(followed): AccountId,
) -> SocResult<()> {
    sqlx::query(
        r#"DELETE FROM app.follow WHERE follower_account_id = $1 AND followed_account_id = $2"#,
    )
    .bind(follower)
    .bind(followed)
    .execute(deps.get_pg_pool())
    .await?;

    Ok(())
}

#[entrait(pub FollowExists)]
async fn follow_exists(
    deps: &impl GetPgPool,
    AccountId(follower): AccountId,
    AccountId(followed): AccountId,
) -> SocResult<bool> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM app.follow WHERE follower_account_id = $1 AND followed_account_id = $2
        )
        "#,
    )
    .bind(follower)
    .bind(followed)
    .fetch_one(deps.get_pg_pool())
    .await?;

    Ok(exists)
}

#[entrait(pub CountFollowers)]
async fn count_followers(deps: &impl GetPgPool, AccountId(followed): AccountId) -> SocResult<i64> {
    let count: i64 =
        sqlx::query_scalar(r#"SELECT count(*) FROM app.follow WHERE followed_account_id = $1"#)
            .bind(followed)
            .fetch_one(deps.get_pg_pool())
            .await?;

    Ok(count)
}
