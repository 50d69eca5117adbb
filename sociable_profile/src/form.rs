//! Form binding and validation for the combined profile/account edit.
//!
//! One flat submission carries the union of both models' fields; each model
//! binds its own form from it and validates into a typed change set. Nothing
//! here touches storage.

use sociable_db::{account_db, profile_db};

use std::borrow::Cow;
use std::collections::BTreeMap;

pub const DISPLAY_NAME_MAX_LEN: usize = 100;
pub const IMAGE_MAX_LEN: usize = 255;
pub const USERNAME_MAX_LEN: usize = 150;
pub const NAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Per-field validation messages, keyed by field name.
#[derive(serde::Serialize, Clone, Debug, Default, Eq, PartialEq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Cow<'static, str>, Vec<Cow<'static, str>>>);

impl FieldErrors {
    pub fn add(
        &mut self,
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> &[Cow<'static, str>] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// The incoming edit submission. Every field is optional at the wire level;
/// required-ness is a validation concern so absences surface as form errors
/// instead of deserialization failures.
#[derive(serde::Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct EditSubmission {
    pub display_name: Option<String>,
    pub image: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(serde::Serialize, Clone, Debug, Default, Eq, PartialEq)]
pub struct ProfileForm {
    pub display_name: String,
    pub image: Option<String>,
}

impl ProfileForm {
    pub fn bind(submission: &EditSubmission) -> Self {
        Self {
            display_name: strip(&submission.display_name),
            image: submission.image.clone().filter(|image| !image.is_empty()),
        }
    }

    pub fn prefilled(profile: &profile_db::Profile) -> Self {
        Self {
            display_name: profile.display_name.clone(),
            image: profile.image.clone(),
        }
    }

    pub fn validate(&self) -> Result<profile_db::ProfileChanges, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.display_name.is_empty() {
            errors.add("display_name", "may not be blank");
        } else if self.display_name.chars().count() > DISPLAY_NAME_MAX_LEN {
            errors.add("display_name", "100 characters max");
        }
        if let Some(image) = &self.image {
            if image.chars().count() > IMAGE_MAX_LEN {
                errors.add("image", "255 characters max");
            }
        }

        if errors.is_empty() {
            Ok(profile_db::ProfileChanges {
                display_name: self.display_name.clone(),
                image: self.image.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

#[derive(serde::Serialize, Clone, Debug, Default, Eq, PartialEq)]
pub struct AccountForm {
    pub username: String,
    // Never echoed back to the client, not even on a rejected submission.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

/// An account form that passed validation. The password is still plaintext
/// here; hashing happens in the persist phase.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountInput {
    pub username: String,
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

impl AccountForm {
    pub fn bind(submission: &EditSubmission) -> Self {
        Self {
            username: strip(&submission.username),
            // An empty password field means "leave it unchanged".
            password: submission
                .password
                .clone()
                .filter(|password| !password.is_empty()),
            first_name: strip(&submission.first_name),
            last_name: strip(&submission.last_name),
        }
    }

    pub fn prefilled(account: &account_db::Account) -> Self {
        Self {
            username: account.username.clone(),
            password: None,
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
        }
    }

    pub fn validate(&self) -> Result<AccountInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.username.is_empty() {
            errors.add("username", "may not be blank");
        } else if self.username.chars().count() > USERNAME_MAX_LEN {
            errors.add("username", "150 characters max");
        } else if !self
            .username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@.+-_".contains(c))
        {
            errors.add("username", "letters, digits and @/./+/-/_ only");
        }

        if let Some(password) = &self.password {
            if password.chars().count() < PASSWORD_MIN_LEN {
                errors.add("password", "8 characters min");
            }
        }

        if self.first_name.chars().count() > NAME_MAX_LEN {
            errors.add("first_name", "150 characters max");
        }
        if self.last_name.chars().count() > NAME_MAX_LEN {
            errors.add("last_name", "150 characters max");
        }

        if errors.is_empty() {
            Ok(AccountInput {
                username: self.username.clone(),
                password: self.password.clone(),
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

fn strip(field: &Option<String>) -> String {
    field.as_deref().unwrap_or("").trim().to_string()
}
