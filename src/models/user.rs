use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A user as exposed by the API and by the default store read path.
///
/// This shape never carries the password hash. Code that needs the hash goes through
/// [`UserCredentials`], which only the login lookup and user insertion produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
}

/// A user together with the stored bcrypt hash.
///
/// Deliberately not `Serialize`: strip it with [`UserCredentials::into_user`] before
/// anything leaves the process.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

impl UserCredentials {
    pub fn into_user(self) -> User {
        self.user
    }
}

/// Fields required to insert a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Profile changes. Only names are mutable; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
}

/// Row shape of the `users` table without the password column.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            is_active: row.is_active,
        }
    }
}

/// Row shape for the widened select that includes the password column.
#[derive(Debug, FromRow)]
pub struct UserCredentialsRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
    pub password: String,
}

impl From<UserCredentialsRow> for UserCredentials {
    fn from(row: UserCredentialsRow) -> Self {
        Self {
            user: User {
                id: row.id,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                is_active: row.is_active,
            },
            password_hash: row.password,
        }
    }
}
