//! User model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// User categories (numeric codes are part of the account-creation contract)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum UserCategory {
    Student = 0,
    Lecturer = 1,
    PublicUser = 2,
}

impl UserCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserCategory::Student => "student",
            UserCategory::Lecturer => "lecturer",
            UserCategory::PublicUser => "public_user",
        }
    }
}

impl TryFrom<i64> for UserCategory {
    type Error = AppError;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(UserCategory::Student),
            1 => Ok(UserCategory::Lecturer),
            2 => Ok(UserCategory::PublicUser),
            other => Err(AppError::InvalidCategory(other)),
        }
    }
}

impl From<UserCategory> for i64 {
    fn from(c: UserCategory) -> Self {
        c as i64
    }
}

impl std::fmt::Display for UserCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category-specific data attached to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserProfile {
    Student { school: String },
    Lecturer,
    PublicUser,
}

impl UserProfile {
    pub fn category(&self) -> UserCategory {
        match self {
            UserProfile::Student { .. } => UserCategory::Student,
            UserProfile::Lecturer => UserCategory::Lecturer,
            UserProfile::PublicUser => UserCategory::PublicUser,
        }
    }
}

/// A registered library user. Immutable once created.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    password: String,
    profile: UserProfile,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>, profile: UserProfile) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            profile,
        }
    }

    pub fn student(username: impl Into<String>, password: impl Into<String>, school: impl Into<String>) -> Self {
        Self::new(username, password, UserProfile::Student { school: school.into() })
    }

    pub fn lecturer(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(username, password, UserProfile::Lecturer)
    }

    pub fn public_user(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(username, password, UserProfile::PublicUser)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn category(&self) -> UserCategory {
        self.profile.category()
    }

    /// School of a student, `None` for other categories
    pub fn school(&self) -> Option<&str> {
        match &self.profile {
            UserProfile::Student { school } => Some(school.as_str()),
            _ => None,
        }
    }

    /// Plain equality check against the stored password.
    ///
    /// # Security
    ///
    /// Passwords are kept and compared in clear text. Salted hashing is a known gap.
    pub fn authenticate(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"***")
            .field("profile", &self.profile)
            .finish()
    }
}

/// Public view of a user (never carries the password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserShort {
    pub username: String,
    pub category: UserCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
}

impl From<&User> for UserShort {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            category: user.category(),
            school: user.school().map(str::to_string),
        }
    }
}
