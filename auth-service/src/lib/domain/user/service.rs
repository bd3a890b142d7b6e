use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Argon2id hash with default parameters whose preimage is unknown.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Domain service implementation for user operations.
///
/// Owns password hashing; the repository only ever sees hashes.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        // Argon2 is CPU-heavy; keep it off the async workers
        let hasher = self.password_hasher.clone();
        let password = command.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            full_name: command.full_name,
            password_hash,
            enabled: true,
            roles: BTreeSet::from([Role::user()]),
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User created"
        );

        Ok(created_user)
    }

    async fn find_user_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        self.repository.find_by_username(username).await
    }

    async fn username_exists(&self, username: &Username) -> Result<bool, UserError> {
        self.repository.exists_by_username(username).await
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserError> {
        self.repository.exists_by_email(email).await
    }

    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, UserError> {
        let hasher = self.password_hasher.clone();
        let password_hash = user.password_hash.clone();
        let password = password.to_owned();

        let matches =
            tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
                .await
                .map_err(|e| {
                    UserError::Unknown(format!("Password verification task failed: {}", e))
                })??;

        Ok(matches)
    }

    async fn verify_dummy_password(&self, password: &str) -> Result<(), UserError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&password, DUMMY_PASSWORD_HASH))
            .await
            .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))??;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::FullName;
    use crate::domain::user::models::Password;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError>;
            async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError>;
        }
    }

    fn command(username: &str, email: &str) -> CreateUserCommand {
        CreateUserCommand::new(
            Username::new(username.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            FullName::new("Test User".to_string()).unwrap(),
            Password::new("TestPassword123".to_string()).unwrap(),
        )
    }

    fn stored_user(password: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            full_name: FullName::new("Test User".to_string()).unwrap(),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            enabled: true,
            roles: BTreeSet::from([Role::user()]),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && user.email.as_str() == "test@example.com"
                    && user.full_name.as_str() == "Test User"
                    && user.password_hash.starts_with("$argon2")
                    && user.enabled
                    && user.roles.contains(&Role::user())
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository));

        let user = service
            .create_user(command("testuser", "test@example.com"))
            .await
            .expect("Failed to create user");

        assert_eq!(user.username.as_str(), "testuser");
        // Password is hashed with real Argon2, never stored as plaintext
        assert_ne!(user.password_hash, "TestPassword123");
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository));

        let result = service
            .create_user(command("testuser", "test2@example.com"))
            .await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_find_user_by_username_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let username = Username::new("nonexistent".to_string()).unwrap();
        let result = service.find_user_by_username(&username).await;
        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_exists_checks_delegate_to_repository() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_exists_by_username()
            .withf(|u| u.as_str() == "testuser")
            .times(1)
            .returning(|_| Ok(true));
        repository
            .expect_exists_by_email()
            .times(1)
            .returning(|_| Ok(false));

        let service = UserService::new(Arc::new(repository));

        let username = Username::new("testuser".to_string()).unwrap();
        let email = EmailAddress::new("new@example.com".to_string()).unwrap();
        assert!(service.username_exists(&username).await.unwrap());
        assert!(!service.email_exists(&email).await.unwrap());
    }

    #[tokio::test]
    async fn test_verify_password() {
        let service = UserService::new(Arc::new(MockTestUserRepository::new()));
        let user = stored_user("TestPassword123");

        assert!(service
            .verify_password(&user, "TestPassword123")
            .await
            .unwrap());
        assert!(!service.verify_password(&user, "wrong").await.unwrap());
    }

    #[test]
    fn test_dummy_hash_parses_and_matches_nothing() {
        let hasher = PasswordHasher::new();

        assert_eq!(hasher.verify("TestPassword123", DUMMY_PASSWORD_HASH), Ok(false));
        assert_eq!(hasher.verify("", DUMMY_PASSWORD_HASH), Ok(false));
    }

    #[tokio::test]
    async fn test_verify_dummy_password() {
        let service = UserService::new(Arc::new(MockTestUserRepository::new()));

        assert!(service.verify_dummy_password("whatever").await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_password_corrupt_hash() {
        let service = UserService::new(Arc::new(MockTestUserRepository::new()));
        let mut user = stored_user("TestPassword123");
        user.password_hash = "not-a-phc-string".to_string();

        let result = service.verify_password(&user, "TestPassword123").await;
        assert!(matches!(result, Err(UserError::Unknown(_))));
    }
}
