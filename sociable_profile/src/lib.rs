pub mod edit;
pub mod follow;
pub mod form;

use sociable_core::auth::MaybeAuthenticated;
use sociable_core::error::{SocError, SocResult};
use sociable_core::AccountId;
use sociable_db::{account_db, follow_db, post_db, profile_db};

use entrait::entrait_export as entrait;

/// Read model for the profile detail page.
#[derive(serde::Serialize, Clone, Debug)]
pub struct ProfilePage {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub image: Option<String>,
    pub total_posts: i64,
    pub total_followers: i64,
    /// Whether the signed-in viewer follows this account. Omitted entirely
    /// for anonymous viewers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub you_follow: Option<bool>,
}

#[entrait(pub FetchProfilePage)]
async fn fetch_profile_page(
    deps: &(impl account_db::FindAccountByUsername
          + profile_db::FindProfileByAccountId
          + post_db::CountPostsByAuthor
          + follow_db::CountFollowers
          + follow_db::FollowExists),
    MaybeAuthenticated(viewer): MaybeAuthenticated<AccountId>,
    username: &str,
) -> SocResult<ProfilePage> {
    let (account, _) = deps
        .find_account_by_username(username)
        .await?
        .ok_or(SocError::AccountNotFound)?;
    let target = AccountId(account.id);

    let profile = deps
        .find_profile_by_account_id(target.clone())
        .await?
        .ok_or(SocError::ProfileNotFound)?;

    let total_posts = deps.count_posts_by_author(target.clone()).await?;
    let total_followers = deps.count_followers(target.clone()).await?;

    let you_follow = match viewer {
        Some(viewer) => Some(deps.follow_exists(viewer, target).await?),
        None => None,
    };

    Ok(ProfilePage {
        username: account.username,
        first_name: account.first_name,
        last_name: account.last_name,
        display_name: profile.display_name,
        image: profile.image,
        total_posts,
        total_followers,
        you_follow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociable_core::auth::Authenticated;
    use sociable_core::PasswordHash;

    use assert_matches::*;
    use unimock::*;

    fn viewer_id() -> uuid::Uuid {
        uuid::Uuid::parse_str("0d2c39cd-6e4f-40c1-8f0e-1f1e6de7f981").unwrap()
    }

    fn target_id() -> uuid::Uuid {
        uuid::Uuid::parse_str("9b1f8e5a-2a77-4a5f-8d49-52e6f0c26b01").unwrap()
    }

    fn target_account() -> account_db::Account {
        account_db::Account {
            id: target_id(),
            username: "grace".to_string(),
            email: "grace@mail.com".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
        }
    }

    fn target_profile() -> profile_db::Profile {
        profile_db::Profile {
            account_id: target_id(),
            display_name: "Amazing Grace".to_string(),
            image: Some("media/grace.png".to_string()),
        }
    }

    fn mock_page_sources() -> unimock::Clause {
        [
            account_db::find_account_by_username::Fn
                .next_call(matching!("grace"))
                .answers(|_| Ok(Some((target_account(), PasswordHash("h4sh".to_string())))))
                .once()
                .in_order(),
            profile_db::find_profile_by_account_id::Fn
                .next_call(matching! {
                    (AccountId(id)) if id == &target_id()
                })
                .answers(|_| Ok(Some(target_profile())))
                .once()
                .in_order(),
            post_db::count_posts_by_author::Fn
                .next_call(matching! {
                    (AccountId(id)) if id == &target_id()
                })
                .answers(|_| Ok(7))
                .once()
                .in_order(),
            follow_db::count_followers::Fn
                .next_call(matching! {
                    (AccountId(id)) if id == &target_id()
                })
                .answers(|_| Ok(3))
                .once()
                .in_order(),
        ]
        .into()
    }

    #[tokio::test]
    async fn anonymous_page_has_counts_but_no_follow_flag() {
        // No follow_exists clause: an anonymous view must never check it.
        let deps = mock(Some(mock_page_sources()));

        let page = fetch_profile_page(&deps, MaybeAuthenticated(None), "grace")
            .await
            .unwrap();

        assert_eq!("grace", page.username);
        assert_eq!("Amazing Grace", page.display_name);
        assert_eq!(7, page.total_posts);
        assert_eq!(3, page.total_followers);
        assert_eq!(None, page.you_follow);
    }

    #[tokio::test]
    async fn signed_in_page_carries_the_follow_flag() {
        let deps = mock([
            mock_page_sources(),
            follow_db::follow_exists::Fn
                .next_call(matching! {
                    (AccountId(follower), AccountId(followed))
                        if follower == &viewer_id() && followed == &target_id()
                })
                .answers(|_| Ok(true))
                .once()
                .in_order(),
        ]);

        let page = fetch_profile_page(
            &deps,
            Authenticated(AccountId(viewer_id())).into(),
            "grace",
        )
        .await
        .unwrap();

        assert_eq!(Some(true), page.you_follow);
    }

    #[tokio::test]
    async fn unknown_username_is_not_found_for_everyone() {
        let anonymous = mock(Some(
            account_db::find_account_by_username::Fn
                .next_call(matching!("nobody"))
                .answers(|_| Ok(None))
                .once()
                .in_order(),
        ));
        assert_matches!(
            fetch_profile_page(&anonymous, MaybeAuthenticated(None), "nobody").await,
            Err(SocError::AccountNotFound)
        );

        let signed_in = mock(Some(
            account_db::find_account_by_username::Fn
                .next_call(matching!("nobody"))
                .answers(|_| Ok(None))
                .once()
                .in_order(),
        ));
        assert_matches!(
            fetch_profile_page(
                &signed_in,
                Authenticated(AccountId(viewer_id())).into(),
                "nobody",
            )
            .await,
            Err(SocError::AccountNotFound)
        );
    }
}
