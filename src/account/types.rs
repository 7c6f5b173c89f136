//! Account type definitions

use serde::Serialize;

/// Sequential account identifier, starting at 1
pub type AccountId = u64;

/// A registered user
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,

    // Argon2id PHC string, never serialized
    #[serde(skip)]
    pub password_hash: String,

    pub created_at: i64,
}

/// Account fields ahead of id assignment
#[derive(Clone, Debug)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewAccount {
    /// Attach the id chosen by the repository
    pub fn into_account(self, id: AccountId) -> Account {
        Account {
            id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_not_serialized() {
        let account = NewAccount {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
        }
        .into_account(7);

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "alice@example.com");
        assert!(json.get("password_hash").is_none());
    }
}
