use crate::auth::{Authenticate, Token};
use sociable_core::auth::MaybeAuthenticated;
use sociable_core::error::SocResult;
use sociable_profile::edit::{EditOutcome, EditPage};
use sociable_profile::follow::{FollowAck, FollowCommand};
use sociable_profile::form::EditSubmission;
use sociable_profile::ProfilePage;

use axum::extract::{Extension, Path};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;

pub struct ProfileRoutes<D>(std::marker::PhantomData<D>);

impl<D> ProfileRoutes<D>
where
    D: sociable_profile::FetchProfilePage
        + sociable_profile::edit::FetchEditPage
        + sociable_profile::edit::SubmitEdit
        + sociable_profile::follow::ToggleFollow
        + Authenticate
        + Sized
        + Clone
        + Send
        + Sync
        + 'static,
{
    pub fn router() -> axum::Router {
        axum::Router::new()
            .route("/profiles/:username", get(Self::profile_detail))
            .route(
                "/profiles/:username/edit",
                get(Self::edit_page).post(Self::submit_edit),
            )
            .route("/profiles/:username/follow", post(Self::toggle_follow))
    }

    async fn profile_detail(
        Extension(app): Extension<D>,
        token: Option<Token>,
        Path(username): Path<String>,
    ) -> SocResult<Json<ProfilePage>> {
        let viewer: MaybeAuthenticated<_> = token
            .map(|token| app.authenticate(token))
            .transpose()?
            .into();

        Ok(Json(app.fetch_profile_page(viewer, &username).await?))
    }

    async fn edit_page(
        Extension(app): Extension<D>,
        token: Token,
        Path(username): Path<String>,
    ) -> SocResult<Json<EditPage>> {
        let editor = app.authenticate(token)?;

        Ok(Json(app.fetch_edit_page(editor, &username).await?))
    }

    async fn submit_edit(
        Extension(app): Extension<D>,
        token: Token,
        Path(username): Path<String>,
        Json(submission): Json<EditSubmission>,
    ) -> SocResult<Response> {
        let editor = app.authenticate(token)?;

        match app.submit_edit(editor, &username, submission).await? {
            EditOutcome::Saved { username } => profile_redirect(&username),
            EditOutcome::Rejected(page) => {
                Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(page)).into_response())
            }
        }
    }

    async fn toggle_follow(
        Extension(app): Extension<D>,
        token: Token,
        // The payload's username resolves the target; the path segment is
        // only route shape.
        Path(_username): Path<String>,
        Json(command): Json<FollowCommand>,
    ) -> SocResult<Json<FollowAck>> {
        let follower = app.authenticate(token)?;

        Ok(Json(app.toggle_follow(follower, command).await?))
    }
}

/// Plain 302 back to the detail page, keyed by the saved username.
fn profile_redirect(username: &str) -> SocResult<Response> {
    let location = HeaderValue::try_from(format!("/api/profiles/{username}"))
        .map_err(|e| anyhow::anyhow!("invalid redirect target: {e}"))?;

    Ok((StatusCode::FOUND, [(LOCATION, location)], ()).into_response())
}
