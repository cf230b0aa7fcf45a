use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub subscription: Option<Subscription>,
    #[serde(rename = "lastLogin", default)]
    pub last_login: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub plan: String,
    pub status: String,
    #[serde(rename = "postsLimit", default)]
    pub posts_limit: i64,
    #[serde(rename = "accountsLimit", default)]
    pub accounts_limit: i64,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn plan_display(&self) -> &str {
        self.subscription
            .as_ref()
            .map(|s| s.plan.as_str())
            .unwrap_or("free")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user() {
        let json = r#"{
            "_id": "64f1c2",
            "email": "casey@example.com",
            "firstName": "Casey",
            "lastName": "Nguyen",
            "role": "manager",
            "timezone": "America/New_York",
            "subscription": {"plan": "professional", "status": "active", "postsLimit": 200, "accountsLimit": 10}
        }"#;

        let user: User = serde_json::from_str(json).expect("Failed to parse user JSON");
        assert_eq!(user.display_name(), "Casey Nguyen");
        assert_eq!(user.plan_display(), "professional");
        assert!(user.avatar.is_none());
    }
}
