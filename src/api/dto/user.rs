//! DTOs for user endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::validate_dto::RequiredFields;
use crate::domain::entities::{Credentials, Registration, User, UserType};

/// Avatars must be `.jpg` or `.png` images.
static AVATAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|png)$").expect("valid avatar regex"));

/// Request body for `POST /users/register`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 15))]
    pub name: String,

    #[validate(length(min = 6, max = 12))]
    pub password: String,

    #[validate(regex(path = *AVATAR_REGEX, message = "Avatar must be a .jpg or .png image"))]
    pub avatar_url: Option<String>,

    #[serde(rename = "type", default)]
    pub user_type: UserType,
}

impl RequiredFields for CreateUserDto {
    const REQUIRED: &'static [&'static str] = &["email", "name", "password"];
}

impl From<CreateUserDto> for Registration {
    fn from(dto: CreateUserDto) -> Self {
        Registration {
            email: dto.email,
            name: dto.name,
            password: dto.password,
            avatar_url: dto.avatar_url,
            user_type: dto.user_type,
        }
    }
}

/// Request body for `POST /users/login`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginUserDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

impl RequiredFields for LoginUserDto {
    const REQUIRED: &'static [&'static str] = &["email", "password"];
}

impl From<LoginUserDto> for Credentials {
    fn from(dto: LoginUserDto) -> Self {
        Credentials {
            email: dto.email,
            password: dto.password,
        }
    }
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRdo {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl From<User> for UserRdo {
    fn from(user: User) -> Self {
        UserRdo {
            id: user.id,
            email: user.email,
            name: user.name,
            avatar_url: user.avatar_url,
            user_type: user.user_type,
        }
    }
}

/// Response of a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedUserRdo {
    pub token: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl LoggedUserRdo {
    pub fn new(user: User, token: String) -> Self {
        LoggedUserRdo {
            token,
            email: user.email,
            name: user.name,
            avatar_url: user.avatar_url,
            user_type: user.user_type,
        }
    }
}
