//! User and Profile Models

use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// User account (password hash never leaves the server)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub email: String,
    pub is_staff: bool,
    #[serde(skip_serializing, default = "default_active")]
    pub is_active: bool,
}

/// Per-user profile, exactly one per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Profile {
    pub id: i64,
    #[serde(rename = "user")]
    pub user_id: i64,
    /// Last save of the owning user (Unix millis)
    pub updated_at: i64,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub is_staff: Option<bool>,
}

/// Update user payload (profile edit form)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_hides_flags() {
        let user = User {
            id: 1,
            username: "anna".into(),
            first_name: "Anna".into(),
            email: "anna@example.com".into(),
            is_staff: true,
            is_active: true,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "anna");
        assert_eq!(json["is_staff"], true);
        assert!(json.get("is_active").is_none());

        let back: User = serde_json::from_value(json).unwrap();
        assert!(back.is_active);
    }
}
