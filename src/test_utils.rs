pub mod test_helpers {
    use crate::models::user::User;
    use crate::repositories::user_repository::{
        RepositoryError, RepositoryResult, UserRepository,
    };
    use crate::services::PasswordHasher;
    use crate::AppState;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Lowest cost bcrypt accepts; keeps tests fast.
    pub const TEST_BCRYPT_COST: u32 = 4;

    /// User store kept in memory, with the same uniqueness rule as the
    /// MongoDB index.
    #[derive(Default)]
    pub struct InMemoryUserRepository {
        users: Mutex<Vec<User>>,
    }

    impl InMemoryUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn len(&self) -> usize {
            self.users.lock().map(|users| users.len()).unwrap_or(0)
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn create_user(&self, email: &str, password_hash: &str) -> RepositoryResult<User> {
            let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
            if users.iter().any(|u| u.email == email) {
                return Err(RepositoryError::AlreadyExists);
            }
            let user = User::new(email, password_hash);
            users.push(user.clone());
            Ok(user)
        }

        async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
            let users = self.users.lock().unwrap_or_else(|e| e.into_inner());
            Ok(users.iter().find(|u| u.email == email).cloned())
        }

        async fn list_users(&self, limit: Option<i64>) -> RepositoryResult<Vec<User>> {
            let users = self.users.lock().unwrap_or_else(|e| e.into_inner());
            let limit = limit.unwrap_or(100).max(0) as usize;
            Ok(users.iter().take(limit).cloned().collect())
        }
    }

    pub fn test_hasher() -> PasswordHasher {
        PasswordHasher::with_cost(TEST_BCRYPT_COST)
    }

    /// App state over a fresh in-memory store. The store is returned so tests
    /// can inspect what was written.
    pub fn create_test_state(
        images_dir: impl Into<std::path::PathBuf>,
    ) -> (AppState, Arc<InMemoryUserRepository>) {
        let repository = Arc::new(InMemoryUserRepository::new());
        let state = AppState::new(repository.clone(), test_hasher(), images_dir);
        (state, repository)
    }

    /// Insert a test user with hashed password
    pub async fn insert_test_user(
        repository: &InMemoryUserRepository,
        email: &str,
        password: &str,
    ) -> anyhow::Result<User> {
        let password_hash = bcrypt::hash(password, TEST_BCRYPT_COST)?;
        Ok(repository.create_user(email, &password_hash).await?)
    }
}
