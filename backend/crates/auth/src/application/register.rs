//! Register Use Case
//!
//! Validates credentials, hashes the password and stores the identity.
//! Registering an existing user name overwrites it (last write wins).

use std::sync::Arc;

use kernel::Deadline;
use platform::password::PasswordPolicyError;

use crate::application::config::AuthConfig;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::IdentityRepository;
use crate::domain::value_object::{
    user_name::{UserName, UserNameError},
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

const MISSING_FIELDS: &str = "username and password are required";

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: IdentityRepository,
{
    identity_repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: IdentityRepository,
{
    pub fn new(identity_repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            identity_repo,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput, deadline: Deadline) -> AuthResult<UserName> {
        let user_name = UserName::new(&input.user_name).map_err(|e| match e {
            UserNameError::Empty => AuthError::Validation(MISSING_FIELDS.to_string()),
            other => AuthError::Validation(other.to_string()),
        })?;

        let raw_password = RawPassword::new(input.password).map_err(|e| match e {
            PasswordPolicyError::Empty => AuthError::Validation(MISSING_FIELDS.to_string()),
            other => AuthError::Validation(other.to_string()),
        })?;

        // Argon2id is CPU-bound; keep it off the async workers. A started
        // blocking task cannot be cancelled, so do not start one late.
        deadline.check()?;
        let pepper = self.config.password_pepper.clone();
        let hashing = tokio::task::spawn_blocking(move || {
            UserPassword::from_raw(&raw_password, pepper.as_deref())
        });
        let password_hash = deadline
            .run(hashing)
            .await??
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let identity = Identity::new(user_name, password_hash);
        deadline.run(self.identity_repo.save(&identity)).await??;

        tracing::info!(
            target: "audit",
            user_name = %identity.user_name,
            "Identity registered"
        );

        Ok(identity.user_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryAuthRepository;
    use std::time::Duration;

    fn use_case() -> (RegisterUseCase<InMemoryAuthRepository>, Arc<InMemoryAuthRepository>) {
        let repo = Arc::new(InMemoryAuthRepository::new());
        let config = Arc::new(AuthConfig::with_random_secret());
        (RegisterUseCase::new(repo.clone(), config), repo)
    }

    fn input(user_name: &str, password: &str) -> RegisterInput {
        RegisterInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
        }
    }

    fn deadline() -> Deadline {
        Deadline::after(Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_register_stores_digest_not_plaintext() {
        let (use_case, repo) = use_case();
        let user_name = use_case
            .execute(input("alice", "S3cret!"), deadline())
            .await
            .unwrap();

        let stored = repo.find_by_user_name(&user_name).await.unwrap().unwrap();
        assert!(stored.password_hash.as_phc_string().starts_with("$argon2id$"));
        assert!(!stored.password_hash.as_phc_string().contains("S3cret!"));
    }

    #[tokio::test]
    async fn test_empty_fields_rejected() {
        let (use_case, _) = use_case();
        for (user_name, password) in [("", "S3cret!"), ("alice", ""), ("   ", "x")] {
            let err = use_case
                .execute(input(user_name, password), deadline())
                .await
                .unwrap_err();
            assert!(
                matches!(&err, AuthError::Validation(msg) if msg == MISSING_FIELDS),
                "{user_name:?}/{password:?} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_overlong_user_name_rejected() {
        let (use_case, _) = use_case();
        let err = use_case
            .execute(input(&"a".repeat(65), "S3cret!"), deadline())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_reregistration_overwrites() {
        let (use_case, repo) = use_case();
        let user_name = use_case
            .execute(input("alice", "first"), deadline())
            .await
            .unwrap();
        let first = repo.find_by_user_name(&user_name).await.unwrap().unwrap();

        use_case
            .execute(input("alice", "second"), deadline())
            .await
            .unwrap();
        let second = repo.find_by_user_name(&user_name).await.unwrap().unwrap();

        assert_ne!(first.password_hash, second.password_hash);
        let raw = RawPassword::new("second".to_string()).unwrap();
        assert!(second.password_hash.verify(&raw, None));
    }

    #[tokio::test]
    async fn test_elapsed_deadline_aborts_before_save() {
        let (use_case, repo) = use_case();
        let elapsed = Deadline::at(tokio::time::Instant::now() - Duration::from_millis(1));

        let err = use_case
            .execute(input("alice", "S3cret!"), elapsed)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DeadlineExceeded));

        let user_name = UserName::new("alice").unwrap();
        assert!(repo.find_by_user_name(&user_name).await.unwrap().is_none());
    }
}
