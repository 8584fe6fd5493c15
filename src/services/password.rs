use tokio::task;

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("hashing task failed: {0}")]
    Task(#[from] task::JoinError),
}

/// bcrypt wrapper. Work runs on the blocking pool so request tasks stay responsive.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub const DEFAULT_COST: u32 = 10;

    pub fn new() -> Self {
        Self::with_cost(Self::DEFAULT_COST)
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub async fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        let digest = task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;
        Ok(digest)
    }

    /// Returns false on mismatch and on any library error.
    pub async fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();
        match task::spawn_blocking(move || bcrypt::verify(plaintext, &digest)).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                tracing::warn!("Password verification error: {}", e);
                false
            }
            Err(e) => {
                tracing::warn!("Password verification task failed: {}", e);
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_cost(4)
    }

    #[test]
    fn default_cost_is_ten() {
        assert_eq!(PasswordHasher::default().cost(), 10);
    }

    #[tokio::test]
    async fn hash_is_salted_per_call() {
        let hasher = fast_hasher();
        let first = hasher.hash("secret1").await.unwrap();
        let second = hasher.hash("secret1").await.unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secret1", &first).await);
        assert!(hasher.verify("secret1", &second).await);
    }

    #[tokio::test]
    async fn verify_rejects_wrong_password() {
        let hasher = fast_hasher();
        let digest = hasher.hash("secret1").await.unwrap();
        assert!(!hasher.verify("secret2", &digest).await);
    }

    #[tokio::test]
    async fn verify_returns_false_for_malformed_digest() {
        assert!(!fast_hasher().verify("secret1", "not-a-bcrypt-hash").await);
    }

    #[tokio::test]
    async fn hash_surfaces_invalid_cost() {
        let result = PasswordHasher::with_cost(2).hash("secret1").await;
        assert!(matches!(result, Err(HashError::Bcrypt(_))));
    }
}
