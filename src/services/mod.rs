pub mod auth_service;
pub mod gallery_service;
pub mod password;
pub mod token;
pub mod user_service;

pub use auth_service::{AuthService, AuthServiceError, LoginOutcome, LoginRequest};
pub use gallery_service::GalleryService;
pub use password::{HashError, PasswordHasher};
pub use token::{DemoTokenIssuer, TokenIssuer};
pub use user_service::{CreateUserRequest, UserService, UserServiceError};
