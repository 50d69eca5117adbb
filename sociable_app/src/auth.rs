use crate::app::{GetCurrentTime, GetJwtSigningKey};
use sociable_core::auth::Authenticated;
use sociable_core::error::{SocError, SocResult};
use sociable_core::AccountId;

use axum::http::HeaderValue;
use axum::TypedHeader;
use entrait::entrait_export as entrait;
use headers::authorization::Credentials;
use headers::Authorization;
use jwt::SignWithKey;
use jwt::VerifyWithKey;
use uuid::Uuid;

const DEFAULT_SESSION_LENGTH: time::Duration = time::Duration::weeks(1);

#[derive(serde::Serialize, serde::Deserialize)]
struct SessionClaims {
    account_id: Uuid,
    /// Standard JWT `exp` claim.
    exp: i64,
}

#[entrait(pub SignAccountId)]
fn sign_account_id(
    deps: &(impl GetJwtSigningKey + GetCurrentTime),
    account_id: AccountId,
) -> String {
    SessionClaims {
        account_id: account_id.0,
        exp: (deps.get_current_time() + DEFAULT_SESSION_LENGTH).unix_timestamp(),
    }
    .sign_with_key(deps.get_jwt_signing_key())
    .expect("HMAC signing should be infallible")
}

#[entrait(pub Authenticate)]
fn authenticate(
    deps: &(impl GetJwtSigningKey + GetCurrentTime),
    token: Token,
) -> SocResult<Authenticated<AccountId>> {
    let token = token.token();

    let jwt = jwt::Token::<jwt::Header, SessionClaims, _>::parse_unverified(token)
        .map_err(|_| SocError::Unauthorized)?;

    let hmac = deps.get_jwt_signing_key();

    let jwt = jwt
        .verify_with_key(hmac)
        .map_err(|_| SocError::Unauthorized)?;
    let (_header, claims) = jwt.into();

    if claims.exp < deps.get_current_time().unix_timestamp() {
        return Err(SocError::Unauthorized);
    }

    Ok(Authenticated(AccountId(claims.account_id)))
}

///
/// Data for the `Token` authorization scheme.
///
#[derive(Debug)]
pub struct Token(String);

impl Token {
    pub fn token(&self) -> &str {
        &self.0.as_str()["Token ".len()..]
    }
}

impl Credentials for Token {
    const SCHEME: &'static str = "Token";

    fn decode(value: &HeaderValue) -> Option<Self> {
        let auth_header = value.to_str().ok()?;

        Some(Token(auth_header.to_string()))
    }

    fn encode(&self) -> HeaderValue {
        HeaderValue::from_str(&self.0).unwrap()
    }
}

#[async_trait::async_trait]
impl<B: Send> axum::extract::FromRequest<B> for Token {
    type Rejection = SocError;

    async fn from_request(
        req: &mut axum::extract::RequestParts<B>,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(token)) =
            TypedHeader::<Authorization<Token>>::from_request(req)
                .await
                .map_err(|_| SocError::Unauthorized)?;

        Ok(token)
    }
}
