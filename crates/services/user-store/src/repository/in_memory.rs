//! In-memory user repository.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{CreateUser, UpdateUser, User, UserFactory, UserFilter};

use super::UserRepository;

/// User store kept in a single ordered `Vec` owned by the instance.
///
/// Records are never physically removed: soft-deleted users stay in place
/// with `deleted_at` set and are skipped by every default read. Each
/// operation holds the lock for its whole check-then-write sequence.
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
    factory: Arc<dyn UserFactory>,
}

impl InMemoryUserStore {
    /// Creates an empty store that builds new records with `factory`.
    pub fn new(factory: Arc<dyn UserFactory>) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            factory,
        }
    }
}

fn active_position(users: &[User], id: &str) -> Option<usize> {
    users.iter().position(|u| u.id == id && u.is_active())
}

/// Check whether an active user other than the one at `except` holds `name`.
fn name_taken(users: &[User], name: &str, except: Option<usize>) -> bool {
    users
        .iter()
        .enumerate()
        .any(|(i, u)| Some(i) != except && u.is_active() && u.name == name)
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn find_all_users(&self, filter: Option<UserFilter>) -> AppResult<Vec<User>> {
        let filter = filter.filter(|f| !f.is_empty());
        let users = self.users.read().await;
        let found: Vec<User> = users
            .iter()
            .filter(|u| u.is_active())
            .filter(|u| filter.as_ref().map_or(true, |f| u.matches(f)))
            .cloned()
            .collect();

        debug!(count = found.len(), filtered = filter.is_some(), "Listed users");
        Ok(found)
    }

    async fn find_all_users_with_deleted(&self) -> AppResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn find_deleted_users(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.is_deleted()).cloned().collect())
    }

    async fn find_one_user(&self, id: &str) -> AppResult<User> {
        let users = self.users.read().await;
        let user = users
            .iter()
            .find(|u| u.id == id && u.is_active())
            .cloned()
            .ok_or_not_found(id);

        if user.is_err() {
            debug!(user_id = %id, "User not found");
        }
        user
    }

    async fn find_one_user_with_deleted(&self, id: &str) -> AppResult<User> {
        let users = self.users.read().await;
        users.iter().find(|u| u.id == id).cloned().ok_or_not_found(id)
    }

    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        if let Err(err) = input.check() {
            warn!(error = %err, "Rejected user creation");
            return Err(err.into());
        }

        let mut users = self.users.write().await;
        if name_taken(&users, &input.name, None) {
            warn!(name = %input.name, "Rejected duplicate user name");
            return Err(AppError::duplicate_name(input.name));
        }

        let user = self.factory.create(input);
        users.push(user.clone());

        info!(user_id = %user.id, name = %user.name, "User created");
        Ok(user)
    }

    async fn update_user(&self, changes: UpdateUser) -> AppResult<User> {
        let mut users = self.users.write().await;
        let idx = active_position(&users, &changes.id).ok_or_not_found(&changes.id)?;

        if !changes.has_changes() {
            debug!(user_id = %changes.id, "Update without changes");
            return Ok(users[idx].clone());
        }

        if let Some(name) = &changes.name {
            if name_taken(&users, name, Some(idx)) {
                warn!(user_id = %changes.id, name = %name, "Rejected rename to taken name");
                return Err(AppError::duplicate_name(name.clone()));
            }
        }

        let user = &mut users[idx];
        user.apply(changes);

        info!(user_id = %user.id, "User updated");
        Ok(user.clone())
    }

    async fn remove_user(&self, id: &str) -> AppResult<bool> {
        let mut users = self.users.write().await;
        let idx = active_position(&users, id).ok_or_not_found(id)?;

        users[idx].soft_delete();

        info!(user_id = %id, "User soft deleted");
        Ok(true)
    }

    async fn restore_user(&self, id: &str) -> AppResult<User> {
        let mut users = self.users.write().await;
        let idx = users
            .iter()
            .position(|u| u.id == id && u.is_deleted())
            .ok_or_not_found(id)?;

        if name_taken(&users, &users[idx].name, Some(idx)) {
            let name = users[idx].name.clone();
            warn!(user_id = %id, name = %name, "Rejected restore over taken name");
            return Err(AppError::duplicate_name(name));
        }

        let user = &mut users[idx];
        user.restore();

        info!(user_id = %id, "User restored");
        Ok(user.clone())
    }

    async fn count_users(&self) -> AppResult<usize> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.is_active()).count())
    }
}
