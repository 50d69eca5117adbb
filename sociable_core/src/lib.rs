pub mod auth;
pub mod error;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountId(pub uuid::Uuid);

#[derive(Clone, Debug)]
pub struct PasswordHash(pub String);
