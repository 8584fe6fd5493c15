//! Client-side session handling for talking to a galleria server.

pub mod error;
pub mod navigator;
pub mod session;
pub mod storage;

pub use error::ClientError;
pub use navigator::{LogNavigator, Navigator, RecordingNavigator};
pub use session::{AuthSession, SessionUser, LANDING_PAGE, TOKEN_KEY, USER_KEY};
pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
