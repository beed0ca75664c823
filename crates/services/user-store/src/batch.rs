//! Batch execution of repository operations.
//!
//! The store only lives as long as the process, so the CLI feeds it a whole
//! script of operations at once and reports one outcome per operation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use common::{AppError, AppResult, ErrorResponse};
use domain::{CreateUser, UpdateUser, UserFilter};

use crate::repository::UserRepository;

/// A single repository call read from a batch script
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Create(CreateUser),
    List {
        #[serde(default)]
        filter: Option<UserFilter>,
    },
    ListAll,
    ListDeleted,
    Find {
        id: String,
    },
    Update(UpdateUser),
    Remove {
        id: String,
    },
    Restore {
        id: String,
    },
    Count,
}

impl Operation {
    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Create(_) => "create",
            Operation::List { .. } => "list",
            Operation::ListAll => "list_all",
            Operation::ListDeleted => "list_deleted",
            Operation::Find { .. } => "find",
            Operation::Update(_) => "update",
            Operation::Remove { .. } => "remove",
            Operation::Restore { .. } => "restore",
            Operation::Count => "count",
        }
    }
}

/// Result line printed for each operation
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Ok { ok: Value },
    Err(ErrorResponse),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok { .. })
    }
}

impl From<AppResult<Value>> for Outcome {
    fn from(result: AppResult<Value>) -> Self {
        match result {
            Ok(ok) => Outcome::Ok { ok },
            Err(err) => Outcome::Err(ErrorResponse::from(&err)),
        }
    }
}

/// Parse a JSON array of operations
pub fn parse(input: &str) -> AppResult<Vec<Operation>> {
    Ok(serde_json::from_str(input)?)
}

fn to_value<T: Serialize>(value: T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| AppError::internal(e.to_string()))
}

/// Run one operation against the repository
pub async fn execute(repo: &dyn UserRepository, op: Operation) -> AppResult<Value> {
    match op {
        Operation::Create(input) => to_value(repo.create_user(input).await?),
        Operation::List { filter } => to_value(repo.find_all_users(filter).await?),
        Operation::ListAll => to_value(repo.find_all_users_with_deleted().await?),
        Operation::ListDeleted => to_value(repo.find_deleted_users().await?),
        Operation::Find { id } => to_value(repo.find_one_user(&id).await?),
        Operation::Update(changes) => to_value(repo.update_user(changes).await?),
        Operation::Remove { id } => to_value(repo.remove_user(&id).await?),
        Operation::Restore { id } => to_value(repo.restore_user(&id).await?),
        Operation::Count => to_value(repo.count_users().await?),
    }
}

/// Run every operation in order; a failed operation does not stop the batch
pub async fn run(repo: &dyn UserRepository, ops: Vec<Operation>) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(ops.len());
    for (index, op) in ops.into_iter().enumerate() {
        let name = op.name();
        let result = execute(repo, op).await;
        match &result {
            Ok(_) => debug!(index, op = name, "Operation finished"),
            Err(err) if err.is_client_error() => {
                debug!(index, op = name, code = err.code(), "Operation rejected")
            }
            Err(err) => warn!(index, op = name, error = %err, "Operation failed"),
        }
        outcomes.push(Outcome::from(result));
    }
    outcomes
}
