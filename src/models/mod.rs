pub mod credentials;
pub mod responses;
pub mod user;

pub use credentials::CredentialsPayload;
pub use responses::{ErrorResponse, HealthResponse, ImagesResponse, LoginResponse, OkResponse};
pub use user::{normalize_email, User};
