//! User-related DTOs.

use chrono::{DateTime, Utc};
use rollcall_core::rules::not_blank;
use rollcall_core::{ProfileId, User, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(
        length(max = 30, message = "First name cannot exceed 30 characters"),
        custom(function = "not_blank", message = "First name is required")
    )]
    pub first_name: String,

    #[validate(
        length(max = 30, message = "Last name cannot exceed 30 characters"),
        custom(function = "not_blank", message = "Last name is required")
    )]
    pub last_name: String,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 100, message = "Email cannot exceed 100 characters")
    )]
    pub email: String,

    pub profile_id: ProfileId,
}

/// Request to update a user. Absent fields are left unchanged.
///
/// `is_active: true` reactivates a deactivated user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(
        length(max = 30, message = "First name cannot exceed 30 characters"),
        custom(function = "not_blank", message = "First name cannot be blank")
    )]
    pub first_name: Option<String>,

    #[validate(
        length(max = 30, message = "Last name cannot exceed 30 characters"),
        custom(function = "not_blank", message = "Last name cannot be blank")
    )]
    pub last_name: Option<String>,

    #[validate(
        email(message = "Invalid email address"),
        length(max = 100, message = "Email cannot exceed 100 characters")
    )]
    pub email: Option<String>,

    pub profile_id: Option<ProfileId>,

    pub is_active: Option<bool>,
}

/// User response DTO. Also the cached representation of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
    pub profile_id: Option<ProfileId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email.into(),
            is_active: user.is_active,
            profile_id: user.profile_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_core::{Email, ValidateExt};

    fn create_request() -> CreateUserRequest {
        CreateUserRequest {
            first_name: "New".to_string(),
            last_name: "User".to_string(),
            email: "new@user.com".to_string(),
            profile_id: ProfileId::new(),
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(create_request().validate_request().is_ok());
    }

    #[test]
    fn test_blank_first_name_rejected() {
        let request = CreateUserRequest {
            first_name: "   ".to_string(),
            ..create_request()
        };
        let err = request.validate_request().unwrap_err();
        assert!(err.to_string().contains("first_name"));
    }

    #[test]
    fn test_long_last_name_rejected() {
        let request = CreateUserRequest {
            last_name: "x".repeat(31),
            ..create_request()
        };
        assert!(request.validate_request().is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let request = CreateUserRequest {
            email: "not-an-email".to_string(),
            ..create_request()
        };
        assert!(request.validate_request().is_err());
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateUserRequest::default().validate_request().is_ok());
    }

    #[test]
    fn test_update_blank_name_rejected() {
        let request = UpdateUserRequest {
            last_name: Some(String::new()),
            ..Default::default()
        };
        assert!(request.validate_request().is_err());
    }

    #[test]
    fn test_camel_case_json() {
        let json = r#"{"firstName":"A","lastName":"B","email":"a@b.io","profileId":"67e55044-10b1-426f-9247-bb680e5fe0c8"}"#;
        let request: CreateUserRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.first_name, "A");

        let user = User::builder()
            .first_name("A")
            .last_name("B")
            .email(Email::new_unchecked("a@b.io"))
            .profile_id(request.profile_id)
            .build()
            .unwrap();
        let value = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(value["isActive"], true);
        assert_eq!(value["firstName"], "A");
        assert!(value.get("profileId").is_some());
    }
}
