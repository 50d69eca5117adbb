use crate::auth::{Authenticate, SignAccountId, Token};
use sociable_core::error::SocResult;
use sociable_core::AccountId;
use sociable_db::account_db;

use axum::extract::Extension;
use axum::routing::{get, post};
use axum::Json;

#[derive(serde::Serialize, serde::Deserialize, Debug)]
struct AccountBody<T> {
    account: T,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
struct SignedAccount {
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    token: String,
}

pub struct AccountRoutes<D>(std::marker::PhantomData<D>);

impl<D> AccountRoutes<D>
where
    D: sociable_account::RegisterAccount
        + sociable_account::Login
        + sociable_account::FetchCurrentAccount
        + Authenticate
        + SignAccountId
        + Sized
        + Clone
        + Send
        + Sync
        + 'static,
{
    pub fn router() -> axum::Router {
        axum::Router::new()
            .route("/accounts", post(Self::register))
            .route("/accounts/login", post(Self::login))
            .route("/account", get(Self::current_account))
    }

    async fn register(
        Extension(app): Extension<D>,
        Json(body): Json<AccountBody<sociable_account::NewAccount>>,
    ) -> SocResult<Json<AccountBody<SignedAccount>>> {
        let account = app.register_account(body.account).await?;
        Ok(Json(AccountBody {
            account: Self::signed(&app, account),
        }))
    }

    async fn login(
        Extension(app): Extension<D>,
        Json(body): Json<AccountBody<sociable_account::Credentials>>,
    ) -> SocResult<Json<AccountBody<SignedAccount>>> {
        let account = app.login(body.account).await?;
        Ok(Json(AccountBody {
            account: Self::signed(&app, account),
        }))
    }

    async fn current_account(
        Extension(app): Extension<D>,
        token: Token,
    ) -> SocResult<Json<AccountBody<SignedAccount>>> {
        let account_id = app.authenticate(token)?;
        let account = app.fetch_current_account(account_id).await?;
        Ok(Json(AccountBody {
            account: Self::signed(&app, account),
        }))
    }

    fn signed(app: &D, account: account_db::Account) -> SignedAccount {
        SignedAccount {
            token: app.sign_account_id(AccountId(account.id)),
            username: account.username,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
        }
    }
}
