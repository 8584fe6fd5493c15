use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// A registered account as stored in the `users` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// Builds a fresh record; both timestamps are set to now.
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Normalizes an email the way the store keys it: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Alice@Example.COM \n"), "alice@example.com");
        assert_eq!(normalize_email("   "), "");
    }

    #[test]
    fn new_user_serializes_with_camel_case_fields() {
        let user = User::new("a@b.com", "$2b$10$hash");
        assert_eq!(user.created_at, user.updated_at);

        let doc = mongodb::bson::to_document(&user).unwrap();
        assert!(doc.contains_key("_id"));
        assert!(doc.contains_key("passwordHash"));
        assert!(doc.contains_key("createdAt"));
        assert!(doc.contains_key("updatedAt"));
    }
}
