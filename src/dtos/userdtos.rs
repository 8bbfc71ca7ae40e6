use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::{User, UserRole};

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    pub role: UserRole,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,
}

/// Payload for the admin user editor. An empty password keeps the stored hash.
#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct AdminUpdateUserDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    pub password: Option<String>,

    pub role: UserRole,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct UserListQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            email: user.email.to_owned(),
            name: user.name.to_owned(),
            role: user.role.to_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponseDto {
    pub token: String,
    pub user: FilterUserDto,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn register_dto_rejects_bad_email() {
        let dto = RegisterUserDto {
            email: "not-an-email".to_string(),
            name: "Alice".to_string(),
            password: "secret1".to_string(),
            role: UserRole::Student,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn register_dto_rejects_short_password() {
        let dto = RegisterUserDto {
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            password: "abc".to_string(),
            role: UserRole::Student,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn register_dto_accepts_valid_payload() {
        let dto = RegisterUserDto {
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            password: "secret1".to_string(),
            role: UserRole::Supervisor,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn auth_response_carries_slim_user_object() {
        let user = User {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            role: UserRole::Admin,
            password_hash: "hash".to_string(),
            profile_pic: None,
            active: true,
            created_at: Utc::now(),
        };

        let body = AuthResponseDto {
            token: "jwt".to_string(),
            user: FilterUserDto::filter_user(&user),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["user"]["role"], "admin");
        assert_eq!(value["user"]["id"], user.id.to_string());
        assert!(value["user"].get("password_hash").is_none());
    }
}
