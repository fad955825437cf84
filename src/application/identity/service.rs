//! Identity service — the access gate
//!
//! All authentication and staff-management logic lives here. HTTP handlers
//! are thin wrappers that delegate to this service; the role check itself
//! is enforced once, in the router middleware, never inline per handler.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Identity service — orchestrates login, password changes and staff
/// account management.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct IdentityService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    jwt_config: JwtConfig,
}

impl<R: UserRepositoryInterface> IdentityService<R> {
    pub fn new(repo: Arc<R>, jwt_config: JwtConfig) -> Self {
        Self { repo, jwt_config }
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username + password and return a JWT.
    ///
    /// The username match is case-sensitive and exact. Absent user and
    /// wrong password collapse into the same error so the response never
    /// reveals which usernames exist.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthResult> {
        let user = self.repo.get_user_by_username(username).await?;

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        self.repo.update_last_login(&user.id).await?;

        let token = create_token(&user.id, &user.username, user.role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    /// Change a user's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.len() < 8 {
            return Err(DomainError::Validation(
                "New password must be at least 8 characters".into(),
            ));
        }

        let user = self
            .repo
            .get_user_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;

        let valid = verify_password(current_password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        let new_hash = hash_password(new_password)
            .map_err(|e| DomainError::Validation(format!("Failed to hash password: {}", e)))?;

        self.repo.update_user_password(user_id, &new_hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    // ── Staff management (admin surface) ────────────────────────

    /// Create a staff or admin account. Accounts are only ever created
    /// here (by an admin) or by the bootstrap seeding — never self-registered.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: UserRole,
    ) -> DomainResult<User> {
        if username.len() < 3 || username.len() > 50 {
            return Err(DomainError::Validation(
                "Username must be 3-50 characters".into(),
            ));
        }
        if password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }

        if self.repo.get_user_by_username(username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }

        let user = self
            .repo
            .create_user(CreateUserDto {
                username: username.to_string(),
                password: password.to_string(),
                role,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.repo.list_users().await
    }

    pub async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        self.repo.get_user_by_id(id).await
    }

    /// Delete a user account. Admin accounts can never be deleted,
    /// regardless of who asks, even though the route is already
    /// admin-gated.
    pub async fn delete_user(&self, id: &str) -> DomainResult<()> {
        let user = self
            .repo
            .get_user_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            })?;

        if user.role == UserRole::Admin {
            return Err(DomainError::Protected(
                "Admin accounts cannot be deleted".into(),
            ));
        }

        self.repo.delete_user(id).await?;

        info!(user_id = %id, username = %user.username, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support::setup_db;
    use crate::infrastructure::database::repositories::UserRepository;

    async fn service() -> IdentityService<UserRepository> {
        let db = setup_db().await;
        IdentityService::new(Arc::new(UserRepository::new(db)), JwtConfig::default())
    }

    #[tokio::test]
    async fn login_round_trip() {
        let svc = service().await;
        svc.create_user("alice", "password123", UserRole::Staff)
            .await
            .unwrap();

        let auth = svc.login("alice", "password123").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert!(!auth.token.is_empty());
        assert_eq!(auth.user.username, "alice");

        let err = svc.login("alice", "wrong-password").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        let err = svc.login("nobody", "password123").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn admin_accounts_are_protected_from_deletion() {
        let svc = service().await;
        let admin = svc
            .create_user("root", "password123", UserRole::Admin)
            .await
            .unwrap();

        let err = svc.delete_user(&admin.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Protected(_)));

        // the record must survive the attempt
        let users = svc.list_users().await.unwrap();
        assert!(users.iter().any(|u| u.id == admin.id));
    }

    #[tokio::test]
    async fn staff_accounts_can_be_deleted() {
        let svc = service().await;
        let staff = svc
            .create_user("temp", "password123", UserRole::Staff)
            .await
            .unwrap();

        svc.delete_user(&staff.id).await.unwrap();
        assert!(svc.get_user_by_id(&staff.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_user_validation() {
        let svc = service().await;

        let err = svc
            .create_user("ab", "password123", UserRole::Staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = svc
            .create_user("alice", "short", UserRole::Staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        svc.create_user("alice", "password123", UserRole::Staff)
            .await
            .unwrap();
        let err = svc
            .create_user("alice", "password123", UserRole::Staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn change_password_requires_current() {
        let svc = service().await;
        let user = svc
            .create_user("alice", "password123", UserRole::Staff)
            .await
            .unwrap();

        let err = svc
            .change_password(&user.id, "wrong", "new-password-1")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        svc.change_password(&user.id, "password123", "new-password-1")
            .await
            .unwrap();
        svc.login("alice", "new-password-1").await.unwrap();
    }
}
