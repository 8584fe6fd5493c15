pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::{path::PathBuf, sync::Arc};

use repositories::UserRepository;
use services::{AuthService, DemoTokenIssuer, GalleryService, PasswordHasher, UserService};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub gallery_service: Arc<GalleryService>,
}

impl AppState {
    /// Wires the services around one user store, issuing demo tokens.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        hasher: PasswordHasher,
        images_dir: impl Into<PathBuf>,
    ) -> Self {
        AppState {
            user_service: Arc::new(UserService::new(user_repository.clone(), hasher)),
            auth_service: Arc::new(AuthService::new(
                user_repository,
                hasher,
                Arc::new(DemoTokenIssuer),
            )),
            gallery_service: Arc::new(GalleryService::new(images_dir)),
        }
    }
}
