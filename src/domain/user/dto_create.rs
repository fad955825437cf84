use super::UserRole;

/// Input for creating a user account.
///
/// Carries the raw password; the repository hashes it before persisting.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    pub role: UserRole,
}
