//! Follow/unfollow toggling.
//!
//! Both directions are idempotent: following twice leaves one edge,
//! unfollowing twice leaves none, and neither repeat is an error. The
//! storage layer's pair constraint absorbs concurrent duplicates.

use sociable_core::auth::Authenticated;
use sociable_core::error::{SocError, SocResult};
use sociable_core::AccountId;
use sociable_db::{account_db, follow_db};

use entrait::entrait_export as entrait;

/// Payload of a toggle request. Both fields are required; the body's
/// username resolves the target (the path parameter is route shape only).
#[derive(serde::Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct FollowCommand {
    pub action: Option<String>,
    pub username: Option<String>,
}

/// The `wording` is the label for the *next* action the client should
/// offer: "Unfollow" right after a follow, "Follow" otherwise.
#[derive(serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct FollowAck {
    pub success: bool,
    pub wording: &'static str,
}

#[entrait(pub ToggleFollow)]
async fn toggle_follow(
    deps: &(impl account_db::FindAccountByUsername + follow_db::InsertFollow + follow_db::DeleteFollow),
    Authenticated(follower): Authenticated<AccountId>,
    command: FollowCommand,
) -> SocResult<FollowAck> {
    let (action, username) = match (command.action, command.username) {
        (Some(action), Some(username)) => (action, username),
        _ => return Err(SocError::MissingData),
    };

    let (target, _) = deps
        .find_account_by_username(&username)
        .await?
        .ok_or(SocError::MissingData)?;

    // Any action other than "follow" asks for the edge to be gone.
    if action == "follow" {
        deps.insert_follow(follower, AccountId(target.id)).await?;
        Ok(FollowAck {
            success: true,
            wording: "Unfollow",
        })
    } else {
        deps.delete_follow(follower, AccountId(target.id)).await?;
        Ok(FollowAck {
            success: true,
            wording: "Follow",
        })
    }
}
