use serde::{Deserialize, Serialize};

// User model that matches the backend session payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

// Token pair returned by the credential-exchange endpoints. Refresh
// responses may omit `refreshToken`; the stored one keeps serving.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_backend_payload() {
        let json = r#"{
            "id": 12,
            "username": "aitali",
            "email": "aitali@tricol.ma",
            "fullName": "A. Ait Ali",
            "roles": ["ADMIN"],
            "permissions": ["produits:write"]
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 12);
        assert_eq!(user.full_name.as_deref(), Some("A. Ait Ali"));
        assert_eq!(user.roles, vec!["ADMIN"]);
    }

    #[test]
    fn test_user_tolerates_missing_role_arrays() {
        let json = r#"{"id": 3, "username": "stock"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.roles.is_empty());
        assert!(user.permissions.is_empty());
        assert!(user.email.is_none());
    }

    #[test]
    fn test_register_data_omits_absent_full_name() {
        let data = RegisterData {
            username: "nadia".to_string(),
            email: "nadia@tricol.ma".to_string(),
            password: "secret".to_string(),
            full_name: None,
        };
        let json = serde_json::to_string(&data).unwrap();
        assert!(!json.contains("fullName"));
    }

    #[test]
    fn test_token_response_without_refresh_token() {
        let json = r#"{"accessToken": "abc"}"#;
        let tokens: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access_token, "abc");
        assert!(tokens.refresh_token.is_none());
    }
}
