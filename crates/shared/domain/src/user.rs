//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::DomainResult;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if user is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if user is active (not deleted)
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Soft delete the user
    pub fn soft_delete(&mut self) {
        self.deleted_at = Some(Utc::now());
    }

    /// Restore a soft-deleted user
    pub fn restore(&mut self) {
        self.deleted_at = None;
    }

    /// Merge the supplied fields of `changes` over this record.
    ///
    /// Fields left as `None` are untouched and timestamps are never modified.
    pub fn apply(&mut self, changes: UpdateUser) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(age) = changes.age {
            self.age = age;
        }
        if let Some(city) = changes.city {
            self.city = city;
        }
    }

    /// Check whether every field set on `filter` equals this record's value
    pub fn matches(&self, filter: &UserFilter) -> bool {
        fn eq<T: PartialEq>(wanted: &Option<T>, actual: &T) -> bool {
            wanted.as_ref().map_or(true, |w| w == actual)
        }

        eq(&filter.id, &self.id)
            && eq(&filter.name, &self.name)
            && eq(&filter.age, &self.age)
            && eq(&filter.city, &self.city)
            && filter.created_at.map_or(true, |ts| self.created_at == Some(ts))
            && filter.updated_at.map_or(true, |ts| self.updated_at == Some(ts))
    }
}

/// Deserialize `null` the same way as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// User creation data transfer object
///
/// Absent and `null` fields deserialize to their empty value and are then
/// rejected by [`CreateUser::check`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUser {
    /// User display name
    #[serde(deserialize_with = "null_as_default")]
    #[validate(length(min = 1))]
    pub name: String,
    /// User age (zero counts as missing)
    #[serde(deserialize_with = "null_as_default")]
    #[validate(range(min = 1))]
    pub age: u32,
    /// User city
    #[serde(deserialize_with = "null_as_default")]
    #[validate(length(min = 1))]
    pub city: String,
}

impl CreateUser {
    pub fn new(name: impl Into<String>, age: u32, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            city: city.into(),
        }
    }

    /// Validate that every required field is present
    pub fn check(&self) -> DomainResult<()> {
        self.validate()?;
        Ok(())
    }
}

/// User update data transfer object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUser {
    /// Target user id
    pub id: String,
    /// New display name
    #[serde(default)]
    pub name: Option<String>,
    /// New age
    #[serde(default)]
    pub age: Option<u32>,
    /// New city
    #[serde(default)]
    pub city: Option<String>,
}

impl UpdateUser {
    /// Create an update for `id` that changes nothing yet
    pub fn for_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Check if any field besides the id was supplied
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.age.is_some() || self.city.is_some()
    }
}

/// Exact-equality filter for listing users.
///
/// Every `Some` field must match; `None` fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserFilter {
    pub id: Option<String>,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub city: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserFilter {
    /// Filter on name only
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Filter on city only
    pub fn by_city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Self::default()
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Check if no field is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    fn sample_user() -> User {
        User {
            id: "1234".to_string(),
            name: "Jest".to_string(),
            age: 20,
            city: "Diamantina".to_string(),
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn test_create_user_accepts_complete_input() {
        assert!(CreateUser::new("Jest", 20, "Salvador").check().is_ok());
    }

    #[test]
    fn test_create_user_rejects_empty_city() {
        let err = CreateUser::new("Jest", 20, "").check().unwrap_err();
        assert_eq!(err, DomainError::MissingParams("city".to_string()));
    }

    #[test]
    fn test_create_user_rejects_zero_age() {
        let err = CreateUser::new("Jest", 0, "Salvador").check().unwrap_err();
        assert_eq!(err, DomainError::MissingParams("age".to_string()));
    }

    #[test]
    fn test_create_user_reports_all_missing_fields() {
        let err = CreateUser::default().check().unwrap_err();
        assert_eq!(err, DomainError::MissingParams("age, city, name".to_string()));
    }

    #[test]
    fn test_create_user_absent_json_fields_are_missing() {
        let input: CreateUser = serde_json::from_str(r#"{"name":"Jest","age":20}"#).unwrap();
        assert_eq!(input.city, "");
        assert!(matches!(input.check(), Err(DomainError::MissingParams(_))));
    }

    #[test]
    fn test_create_user_null_json_fields_are_missing() {
        let input: CreateUser =
            serde_json::from_str(r#"{"name":null,"age":null,"city":"Diamantina"}"#).unwrap();
        assert_eq!(input, CreateUser::new("", 0, "Diamantina"));

        let err = input.check().unwrap_err();
        assert_eq!(err, DomainError::MissingParams("age, name".to_string()));
    }

    #[test]
    fn test_apply_merges_only_supplied_fields() {
        let mut user = sample_user();
        user.apply(UpdateUser::for_id("1234").name("Natan"));

        assert_eq!(user.name, "Natan");
        assert_eq!(user.age, 20);
        assert_eq!(user.city, "Diamantina");
    }

    #[test]
    fn test_apply_without_changes_is_noop() {
        let mut user = sample_user();
        let update = UpdateUser::for_id("1234");
        assert!(!update.has_changes());

        user.apply(update);
        assert_eq!(user, sample_user());
    }

    #[test]
    fn test_matches_requires_every_field() {
        let user = sample_user();

        assert!(UserFilter::default().is_empty());
        assert!(!UserFilter::by_name("Jest").is_empty());
        assert!(user.matches(&UserFilter::default()));
        assert!(user.matches(&UserFilter::by_city("Diamantina").with_age(20)));
        assert!(!user.matches(&UserFilter::by_city("Diamantina").with_age(21)));
        assert!(!user.matches(&UserFilter::by_name("Jes")));
    }

    #[test]
    fn test_soft_delete_and_restore() {
        let mut user = sample_user();
        user.soft_delete();
        assert!(user.is_deleted());

        user.restore();
        assert!(user.is_active());
    }

    #[test]
    fn test_user_serializes_camel_case_without_empty_timestamps() {
        let mut user = sample_user();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("deletedAt").is_none());

        user.soft_delete();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("deletedAt").is_some());
    }
}
