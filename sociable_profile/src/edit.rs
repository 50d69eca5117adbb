//! The combined profile + account edit.
//!
//! One page edits two records. The write path is a two-phase commit from the
//! caller's perspective: bind and validate a form per backing record, and
//! only when every form passed, persist both in a fixed order — profile
//! first, account last. A failed validation means no writes at all; the
//! response is the same page with the errors filled in.

use crate::form::{AccountForm, EditSubmission, FieldErrors, ProfileForm};

use sociable_account::password;
use sociable_core::auth::Authenticated;
use sociable_core::error::{SocError, SocResult};
use sociable_core::AccountId;
use sociable_db::{account_db, profile_db};

use entrait::entrait_export as entrait;

#[derive(serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct ProfileView {
    pub display_name: String,
    pub image: Option<String>,
}

#[derive(serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct AccountView {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Current persisted values, addressable per model as `object.profile.*`
/// and `object.account.*`.
#[derive(serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct EditObject {
    pub profile: ProfileView,
    pub account: AccountView,
}

#[derive(serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct ProfileFormState {
    pub fields: ProfileForm,
    pub errors: FieldErrors,
}

#[derive(serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct AccountFormState {
    pub fields: AccountForm,
    pub errors: FieldErrors,
}

/// One form per backing record.
#[derive(serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct EditForm {
    pub profile: ProfileFormState,
    pub account: AccountFormState,
}

/// The view reference shared by both forms: the username the route was
/// resolved with (pre-edit, so a rejected rename still posts back to the
/// right place).
#[derive(serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct EditView {
    pub username: String,
}

#[derive(serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct EditPage {
    pub object: EditObject,
    pub form: EditForm,
    pub view: EditView,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EditOutcome {
    /// Both records persisted; redirect to the detail page of the account's
    /// username as it is after the edit.
    Saved { username: String },
    /// Validation failed somewhere; nothing was written.
    Rejected(EditPage),
}

#[entrait(pub FetchEditPage)]
async fn fetch_edit_page(
    deps: &(impl account_db::FindAccountByUsername + profile_db::FindProfileByAccountId),
    Authenticated(editor): Authenticated<AccountId>,
    username: &str,
) -> SocResult<EditPage> {
    let (profile, account) = load_edit_target(deps, &editor, username).await?;

    Ok(edit_page(
        &profile,
        &account,
        ProfileForm::prefilled(&profile),
        AccountForm::prefilled(&account),
        FieldErrors::default(),
        FieldErrors::default(),
        username,
    ))
}

#[entrait(pub SubmitEdit)]
async fn submit_edit(
    deps: &(impl account_db::FindAccountByUsername
          + profile_db::FindProfileByAccountId
          + profile_db::UpdateProfile
          + account_db::UpdateAccount
          + password::HashPassword),
    Authenticated(editor): Authenticated<AccountId>,
    username: &str,
    submission: EditSubmission,
) -> SocResult<EditOutcome> {
    let (profile, account) = load_edit_target(deps, &editor, username).await?;

    let profile_form = ProfileForm::bind(&submission);
    let account_form = AccountForm::bind(&submission);

    // Phase one: every form validates, or nothing is written.
    let profile_result = profile_form.validate();
    let mut account_result = account_form.validate();

    if let Ok(input) = &account_result {
        // Taken usernames surface as a form error here; the unique
        // constraint remains the backstop for a concurrent claim.
        if input.username != account.username
            && deps
                .find_account_by_username(&input.username)
                .await?
                .is_some()
        {
            let mut errors = FieldErrors::default();
            errors.add("username", "username is taken");
            account_result = Err(errors);
        }
    }

    let (profile_changes, account_input) = match (profile_result, account_result) {
        (Ok(profile_changes), Ok(account_input)) => (profile_changes, account_input),
        (profile_result, account_result) => {
            return Ok(EditOutcome::Rejected(edit_page(
                &profile,
                &account,
                profile_form,
                account_form,
                profile_result.err().unwrap_or_default(),
                account_result.err().unwrap_or_default(),
                username,
            )));
        }
    };

    // Phase two: persist in the fixed order [profile, account].
    deps.update_profile(AccountId(account.id), profile_changes)
        .await?;

    let password_hash = match account_input.password {
        Some(password) => Some(deps.hash_password(password).await?),
        None => None,
    };

    let account = deps
        .update_account(
            AccountId(account.id),
            account_db::AccountChanges {
                username: account_input.username,
                first_name: account_input.first_name,
                last_name: account_input.last_name,
                password_hash,
            },
        )
        .await?;

    Ok(EditOutcome::Saved {
        username: account.username,
    })
}

async fn load_edit_target(
    deps: &(impl account_db::FindAccountByUsername + profile_db::FindProfileByAccountId),
    editor: &AccountId,
    username: &str,
) -> SocResult<(profile_db::Profile, account_db::Account)> {
    let (account, _) = deps
        .find_account_by_username(username)
        .await?
        .ok_or(SocError::AccountNotFound)?;

    // A profile is only ever edited by its owning account.
    if editor != &AccountId(account.id) {
        return Err(SocError::Forbidden);
    }

    let profile = deps
        .find_profile_by_account_id(AccountId(account.id))
        .await?
        .ok_or(SocError::ProfileNotFound)?;

    Ok((profile, account))
}

fn edit_page(
    profile: &profile_db::Profile,
    account: &account_db::Account,
    profile_form: ProfileForm,
    account_form: AccountForm,
    profile_errors: FieldErrors,
    account_errors: FieldErrors,
    username: &str,
) -> EditPage {
    EditPage {
        object: EditObject {
            profile: ProfileView {
                display_name: profile.display_name.clone(),
                image: profile.image.clone(),
            },
            account: AccountView {
                username: account.username.clone(),
                email: account.email.clone(),
                first_name: account.first_name.clone(),
                last_name: account.last_name.clone(),
            },
        },
        form: EditForm {
            profile: ProfileFormState {
                fields: profile_form,
                errors: profile_errors,
            },
            account: AccountFormState {
                fields: account_form,
                errors: account_errors,
            },
        },
        view: EditView {
            username: username.to_string(),
        },
    }
}
