use galleria::{
    services::{
        auth_service::{AuthService, AuthServiceError, LoginRequest},
        user_service::{CreateUserRequest, UserService},
        DemoTokenIssuer,
    },
    test_utils::test_helpers::{self, InMemoryUserRepository},
};
use std::sync::Arc;

fn services() -> (UserService, AuthService) {
    let repository = Arc::new(InMemoryUserRepository::new());
    let user_service = UserService::new(repository.clone(), test_helpers::test_hasher());
    let auth_service = AuthService::new(
        repository,
        test_helpers::test_hasher(),
        Arc::new(DemoTokenIssuer),
    );
    (user_service, auth_service)
}

#[tokio::test]
async fn test_authenticate_success() {
    let (user_service, auth_service) = services();

    let create_request = CreateUserRequest {
        email: "auth@example.com".to_string(),
        password: "correctpassword".to_string(),
    };

    let created_user = user_service.create_user(create_request).await.unwrap();

    let login_request = LoginRequest {
        email: "auth@example.com".to_string(),
        password: "correctpassword".to_string(),
    };

    let authenticated_user = auth_service.authenticate(login_request).await.unwrap();
    assert_eq!(authenticated_user.id, created_user.id);
    assert_eq!(authenticated_user.email, "auth@example.com");
}

#[tokio::test]
async fn test_authenticate_wrong_password() {
    let (user_service, auth_service) = services();

    let create_request = CreateUserRequest {
        email: "wrongpass@example.com".to_string(),
        password: "correctpassword".to_string(),
    };

    user_service.create_user(create_request).await.unwrap();

    let login_request = LoginRequest {
        email: "wrongpass@example.com".to_string(),
        password: "wrongpassword".to_string(),
    };

    let result = auth_service.authenticate(login_request).await;
    assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn test_authenticate_nonexistent_user() {
    let (_, auth_service) = services();

    let login_request = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "anypassword".to_string(),
    };

    let result = auth_service.authenticate(login_request).await;
    assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn test_login_tokens_differ_between_logins() {
    let (user_service, auth_service) = services();

    let created_user = user_service
        .create_user(CreateUserRequest {
            email: "tokens@example.com".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();

    let first = auth_service
        .login(LoginRequest {
            email: "tokens@example.com".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = auth_service
        .login(LoginRequest {
            email: "tokens@example.com".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();

    assert_ne!(first.token, second.token);
    for outcome in [first, second] {
        let (user_id, _) = DemoTokenIssuer::decode(&outcome.token).unwrap();
        assert_eq!(user_id, created_user.id.to_hex());
    }
}
