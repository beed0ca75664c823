//! User repository contract with soft delete semantics.

use async_trait::async_trait;

use common::AppResult;
use domain::{CreateUser, UpdateUser, User, UserFilter};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// By default, all query methods exclude soft-deleted records.
/// Use `*_with_deleted` variants to include them.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List active users matching every field set on `filter`, in insertion order
    async fn find_all_users(&self, filter: Option<UserFilter>) -> AppResult<Vec<User>>;

    /// List all users including soft-deleted
    async fn find_all_users_with_deleted(&self) -> AppResult<Vec<User>>;

    /// List only soft-deleted users
    async fn find_deleted_users(&self) -> AppResult<Vec<User>>;

    /// Find active user by ID (excludes soft-deleted)
    async fn find_one_user(&self, id: &str) -> AppResult<User>;

    /// Find user by ID including soft-deleted
    async fn find_one_user_with_deleted(&self, id: &str) -> AppResult<User>;

    /// Validate input, enforce name uniqueness and store a new user
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Merge supplied fields over an active user
    async fn update_user(&self, changes: UpdateUser) -> AppResult<User>;

    /// Soft delete user by ID (sets deleted_at timestamp)
    async fn remove_user(&self, id: &str) -> AppResult<bool>;

    /// Restore a soft-deleted user
    async fn restore_user(&self, id: &str) -> AppResult<User>;

    /// Count active users
    async fn count_users(&self) -> AppResult<usize>;
}
