//! Login Use Case
//!
//! Authenticates a user and issues a session.

use std::sync::Arc;

use kernel::Deadline;

use crate::application::config::AuthConfig;
use crate::application::session_issuer::{IssuedSession, SessionIssuer};
use crate::domain::repository::{IdentityRepository, SessionRepository};
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub user_name: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: IdentityRepository + SessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: IdentityRepository + SessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        input: LoginInput,
        deadline: Deadline,
    ) -> AuthResult<IssuedSession> {
        // Malformed input cannot match any stored identity
        let user_name =
            UserName::new(&input.user_name).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let identity = deadline
            .run(self.repo.find_by_user_name(&user_name))
            .await??;

        // Unknown users cost one dummy verification so timing does not
        // reveal which user names exist.
        deadline.check()?;
        let pepper = self.config.password_pepper.clone();
        let stored_hash = identity.map(|i| i.password_hash);
        let verifying = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => hash.verify(&raw_password, pepper.as_deref()),
            None => UserPassword::verify_dummy(&raw_password, pepper.as_deref()),
        });
        let password_valid = deadline.run(verifying).await??;

        if !password_valid {
            tracing::warn!(target: "audit", user_name = %user_name, "Login failed");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = SessionIssuer::new(self.repo.clone(), self.config.clone())
            .issue(user_name, deadline)
            .await?;

        tracing::info!(
            target: "audit",
            user_name = %issued.session.user_name,
            "User logged in"
        );

        Ok(issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::infra::memory::InMemoryAuthRepository;
    use std::time::Duration;

    fn deadline() -> Deadline {
        Deadline::after(Duration::from_secs(10))
    }

    async fn setup(config: AuthConfig) -> LoginUseCase<InMemoryAuthRepository> {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = Arc::new(config);
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(
                RegisterInput {
                    user_name: "alice".to_string(),
                    password: "S3cret!".to_string(),
                },
                deadline(),
            )
            .await
            .unwrap();
        LoginUseCase::new(repo, config)
    }

    fn input(user_name: &str, password: &str) -> LoginInput {
        LoginInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let use_case = setup(AuthConfig::with_random_secret()).await;
        let issued = use_case
            .execute(input("alice", "S3cret!"), deadline())
            .await
            .unwrap();
        assert_eq!(issued.session.user_name.as_str(), "alice");
        assert!(!issued.token.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_identical() {
        let use_case = setup(AuthConfig::with_random_secret()).await;

        let wrong = use_case
            .execute(input("alice", "wrong"), deadline())
            .await
            .unwrap_err();
        let unknown = use_case
            .execute(input("mallory", "S3cret!"), deadline())
            .await
            .unwrap_err();

        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
        assert_eq!(wrong.status_code(), unknown.status_code());
    }

    #[tokio::test]
    async fn test_empty_fields_are_invalid_credentials() {
        let use_case = setup(AuthConfig::with_random_secret()).await;
        for (user_name, password) in [("", "S3cret!"), ("alice", "")] {
            let err = use_case
                .execute(input(user_name, password), deadline())
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
    }

    #[tokio::test]
    async fn test_elapsed_deadline_rejected() {
        let use_case = setup(AuthConfig::with_random_secret()).await;
        let elapsed = Deadline::at(tokio::time::Instant::now() - Duration::from_millis(1));

        let err = use_case
            .execute(input("alice", "S3cret!"), elapsed)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_pepper_must_match() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::with_random_secret()
        };
        let use_case = setup(config).await;
        assert!(
            use_case
                .execute(input("alice", "S3cret!"), deadline())
                .await
                .is_ok()
        );

        let unpeppered = LoginUseCase::new(use_case.repo.clone(), Arc::new(AuthConfig::default()));
        let err = unpeppered
            .execute(input("alice", "S3cret!"), deadline())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
