use crate::DbResultExt;
use crate::GetPgPool;
use sociable_core::error::{SocError, SocResult};
use sociable_core::{AccountId, PasswordHash};

use entrait::entrait_export as entrait;
use uuid::Uuid;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Field values for a full account update. The username and name fields are
/// written as given; a `None` password hash leaves the stored hash alone.
#[derive(Clone, Debug)]
pub struct AccountChanges {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: Option<PasswordHash>,
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    password_hash: String,
}

impl AccountRow {
    fn split(self) -> (Account, PasswordHash) {
        (
            Account {
                id: self.account_id,
                username: self.username,
                email: self.email,
                first_name: self.first_name,
                last_name: self.last_name,
            },
            PasswordHash(self.password_hash),
        )
    }
}

#[entrait(pub InsertAccount)]
async fn insert_account(
    deps: &impl GetPgPool,
    username: &str,
    email: &str,
    password_hash: PasswordHash,
) -> SocResult<Account> {
    let id: Uuid = sqlx::query_scalar(
        r#"INSERT INTO app.account (username, email, password_hash) VALUES ($1, $2, $3) RETURNING account_id"#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash.0)
    .fetch_one(deps.get_pg_pool())
    .await
    .on_constraint("account_username_key", |_| SocError::UsernameTaken)
    .on_constraint("account_email_key", |_| SocError::EmailTaken)?;

    Ok(Account {
        id,
        username: username.to_string(),
        email: email.to_string(),
        first_name: "".to_string(),
        last_name: "".to_string(),
    })
}

#[entrait(pub FindAccountByUsername)]
async fn find_account_by_username(
    deps: &impl GetPgPool,
    username: &str,
) -> SocResult<Option<(Account, PasswordHash)>> {
    let row: Option<AccountRow> = sqlx::query_as(
        r#"SELECT account_id, username, email, first_name, last_name, password_hash FROM app.account WHERE username = $1"#,
    )
    .bind(username)
    .fetch_optional(deps.get_pg_pool())
    .await?;

    Ok(row.map(AccountRow::split))
}

#[entrait(pub FindAccountById)]
async fn find_account_by_id(
    deps: &impl GetPgPool,
    AccountId(account_id): AccountId,
) -> SocResult<Option<(Account, PasswordHash)>> {
    let row: Option<AccountRow> = sqlx::query_as(
        r#"SELECT account_id, username, email, first_name, last_name, password_hash FROM app.account WHERE account_id = $1"#,
    )
    .bind(account_id)
    .fetch_optional(deps.get_pg_pool())
    .await?;

    Ok(row.map(AccountRow::split))
}

#[entrait(pub UpdateAccount)]
async fn update_account(
    deps: &impl GetPgPool,
    AccountId(account_id): AccountId,
    changes: AccountChanges,
) -> SocResult<Account> {
    let row: AccountRow = sqlx::query_as(
        r#"
        UPDATE app.account SET
            username = $1,
            first_name = $2,
            last_name = $3,
            password_hash = COALESCE($4, password_hash)
        WHERE account_id = $5
        RETURNING account_id, username, email, first_name, last_name, password_hash
        "#,
    )
    .bind(changes.username)
    .bind(changes.first_name)
    .bind(changes.last_name)
    .bind(changes.password_hash.map(|hash| hash.0))
    .bind(account_id)
    .fetch_one(deps.get_pg_pool())
    .await
    .on_constraint("account_username_key", |_| SocError::UsernameTaken)?;

    Ok(row.split().0)
}
