use crate::GetPgPool;
use sociable_core::error::SocResult;
use sociable_core::AccountId;

use entrait::entrait_export as entrait;

/// Post rows are written by the feed component; profile pages only need the
/// per-author total.
#[entrait(pub CountPostsByAuthor)]
async fn count_posts_by_author(
    deps: &impl GetPgPool,
    AccountId(author): AccountId,
) -> SocResult<i64> {
    let count: i64 =
        sqlx::query_scalar(r#"SELECT count(*) FROM app.post WHERE author_account_id = $1"#)
            .bind(author)
            .fetch_one(deps.get_pg_pool())
            .await?;

    Ok(count)
}
