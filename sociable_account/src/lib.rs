pub mod password;

use sociable_core::auth::Authenticated;
use sociable_core::error::{SocError, SocResult};
use sociable_core::AccountId;
use sociable_db::{account_db, profile_db};

use entrait::entrait_export as entrait;

#[derive(serde::Serialize, serde::Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration is the single place an account comes into existence, and
/// therefore the single call site of the profile factory: the profile row
/// exists by the time this function returns.
#[entrait(pub RegisterAccount)]
async fn register_account(
    deps: &(impl password::HashPassword + account_db::InsertAccount + profile_db::InsertProfile),
    new_account: NewAccount,
) -> SocResult<account_db::Account> {
    let password_hash = deps.hash_password(new_account.password).await?;

    let account = deps
        .insert_account(&new_account.username, &new_account.email, password_hash)
        .await?;

    deps.insert_profile(AccountId(account.id)).await?;

    Ok(account)
}

#[entrait(pub Login)]
async fn login(
    deps: &(impl account_db::FindAccountByUsername + password::VerifyPassword),
    credentials: Credentials,
) -> SocResult<account_db::Account> {
    let (account, password_hash) = deps
        .find_account_by_username(&credentials.username)
        .await?
        .ok_or(SocError::UsernameDoesNotExist)?;

    deps.verify_password(credentials.password, password_hash)
        .await?;

    Ok(account)
}

#[entrait(pub FetchCurrentAccount)]
async fn fetch_current_account(
    deps: &impl account_db::FindAccountById,
    Authenticated(account_id): Authenticated<AccountId>,
) -> SocResult<account_db::Account> {
    let (account, _) = deps
        .find_account_by_id(account_id)
        .await?
        .ok_or(SocError::AccountNotFound)?;

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociable_core::PasswordHash;

    use assert_matches::*;
    use unimock::*;

    fn test_account_id() -> uuid::Uuid {
        uuid::Uuid::parse_str("4cb9404a-9a9f-4c46-871a-3f8b8dcf9d24").unwrap()
    }

    fn test_account() -> account_db::Account {
        account_db::Account {
            id: test_account_id(),
            username: "newbie".to_string(),
            email: "newbie@mail.com".to_string(),
            first_name: "".to_string(),
            last_name: "".to_string(),
        }
    }

    fn test_profile() -> profile_db::Profile {
        profile_db::Profile {
            account_id: test_account_id(),
            display_name: "".to_string(),
            image: None,
        }
    }

    fn mock_hash_password() -> unimock::Clause {
        password::hash_password::Fn
            .next_call(matching!(_))
            .answers(|_| Ok(PasswordHash("h4sh".to_string())))
            .once()
            .in_order()
    }

    #[tokio::test]
    async fn register_should_insert_account_then_profile() {
        let new_account = NewAccount {
            username: "newbie".to_string(),
            email: "newbie@mail.com".to_string(),
            password: "password".to_string(),
        };
        let deps = mock([
            mock_hash_password(),
            account_db::insert_account::Fn
                .next_call(matching! {
                    ("newbie", "newbie@mail.com", PasswordHash(hash)) if hash == "h4sh"
                })
                .answers(|_| Ok(test_account()))
                .once()
                .in_order(),
            profile_db::insert_profile::Fn
                .next_call(matching! {
                    (AccountId(id)) if id == &test_account_id()
                })
                .answers(|_| Ok(test_profile()))
                .once()
                .in_order(),
        ]);

        let account = register_account(&deps, new_account).await.unwrap();

        assert_eq!("newbie", account.username);
    }

    #[tokio::test]
    async fn login_should_verify_password_against_stored_hash() {
        let credentials = Credentials {
            username: "newbie".to_string(),
            password: "password".to_string(),
        };
        let deps = mock([
            account_db::find_account_by_username::Fn
                .next_call(matching!("newbie"))
                .answers(|_| Ok(Some((test_account(), PasswordHash("h4sh".to_string())))))
                .once()
                .in_order(),
            password::verify_password::Fn
                .next_call(matching! {
                    (_, PasswordHash(hash)) if hash == "h4sh"
                })
                .answers(|_| Ok(()))
                .once()
                .in_order(),
        ]);

        let account = login(&deps, credentials).await.unwrap();

        assert_eq!(test_account_id(), account.id);
    }

    #[tokio::test]
    async fn login_with_unknown_username_should_fail() {
        let credentials = Credentials {
            username: "nobody".to_string(),
            password: "password".to_string(),
        };
        let deps = mock(Some(
            account_db::find_account_by_username::Fn
                .next_call(matching!("nobody"))
                .answers(|_| Ok(None))
                .once()
                .in_order(),
        ));

        assert_matches!(
            login(&deps, credentials).await,
            Err(SocError::UsernameDoesNotExist)
        );
    }

    #[tokio::test]
    async fn login_with_wrong_password_should_fail() {
        let credentials = Credentials {
            username: "newbie".to_string(),
            password: "letmein".to_string(),
        };
        let deps = mock([
            account_db::find_account_by_username::Fn
                .next_call(matching!("newbie"))
                .answers(|_| Ok(Some((test_account(), PasswordHash("h4sh".to_string())))))
                .once()
                .in_order(),
            password::verify_password::Fn
                .next_call(matching!(_))
                .answers(|_| Err(SocError::BadCredentials))
                .once()
                .in_order(),
        ]);

        assert_matches!(login(&deps, credentials).await, Err(SocError::BadCredentials));
    }

    #[tokio::test]
    async fn fetch_current_account_should_fail_when_account_is_gone() {
        let deps = mock(Some(
            account_db::find_account_by_id::Fn
                .next_call(matching!(_))
                .answers(|_| Ok(None))
                .once()
                .in_order(),
        ));

        assert_matches!(
            fetch_current_account(&deps, Authenticated(AccountId(test_account_id()))).await,
            Err(SocError::AccountNotFound)
        );
    }
}
