//! The `Good` entity and its create / patch DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

/// A good as stored in the `goods` table and as cached.
///
/// `id` and `created_at` are assigned by the store. `(id, project_id)`
/// identifies a good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Good {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `None` is meaningful and distinct from `Some(0)`.
    pub priority: Option<i32>,
    #[serde(default)]
    pub removed: bool,
    pub created_at: Timestamp,
}

/// Create request body.
///
/// `id` is optional. When present the store honours it only if no good
/// already uses it, otherwise the create is rejected as a duplicate.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateGood {
    pub id: Option<DbId>,
    #[validate(
        required(message = "field is required"),
        range(min = 1, message = "must be a positive integer")
    )]
    pub project_id: Option<DbId>,
    #[validate(
        required(message = "field is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i32>,
    #[serde(default)]
    pub removed: bool,
}

/// Patch request body.
///
/// Every mutable field must be echoed back, including `removed`. Any `id` or
/// `project_id` in the body is discarded in favour of the ones addressing
/// the request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PatchGood {
    pub id: Option<DbId>,
    pub project_id: Option<DbId>,
    #[validate(
        required(message = "field is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "field is required"),
        length(min = 1, message = "must not be empty")
    )]
    pub description: Option<String>,
    pub priority: Option<i32>,
    #[validate(required(message = "field is required"))]
    pub removed: Option<bool>,
}

/// Validated input for the store's `save`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGood {
    /// Explicitly requested id; `None` lets the store pick one.
    pub id: Option<DbId>,
    pub project_id: DbId,
    pub name: String,
    pub description: String,
    pub priority: Option<i32>,
    pub removed: bool,
}

/// Validated input for the store's `patch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoodPatch {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: String,
    pub priority: Option<i32>,
    pub removed: bool,
}

impl CreateGood {
    /// Run field validation and convert into store input.
    ///
    /// Returns the raw [`validator::ValidationErrors`] so callers can report
    /// them per field.
    pub fn into_new_good(self) -> Result<NewGood, validator::ValidationErrors> {
        self.validate()?;
        let project_id = self.project_id.unwrap_or_default();
        let name = self.name.unwrap_or_default();
        Ok(NewGood {
            id: self.id,
            project_id,
            name,
            description: self.description.unwrap_or_default(),
            priority: self.priority,
            removed: self.removed,
        })
    }
}

impl PatchGood {
    /// Run field validation and bind the patch to `(id, project_id)`.
    pub fn into_patch(
        self,
        id: DbId,
        project_id: DbId,
    ) -> Result<GoodPatch, validator::ValidationErrors> {
        self.validate()?;
        Ok(GoodPatch {
            id,
            project_id,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            priority: self.priority,
            removed: self.removed.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create_from(value: serde_json::Value) -> CreateGood {
        serde_json::from_value(value).unwrap()
    }

    fn patch_from(value: serde_json::Value) -> PatchGood {
        serde_json::from_value(value).unwrap()
    }

    // -- CreateGood ------------------------------------------------------------

    #[test]
    fn create_accepts_minimal_payload() {
        let new = create_from(json!({"project_id": 1, "name": "Widget"}))
            .into_new_good()
            .unwrap();
        assert_eq!(new.project_id, 1);
        assert_eq!(new.name, "Widget");
        assert_eq!(new.description, "");
        assert_eq!(new.priority, None);
        assert!(!new.removed);
        assert_eq!(new.id, None);
    }

    #[test]
    fn create_without_name_fails_on_name() {
        let errs = create_from(json!({"project_id": 1}))
            .into_new_good()
            .unwrap_err();
        assert!(errs.field_errors().contains_key("name"));
        assert!(!errs.field_errors().contains_key("project_id"));
    }

    #[test]
    fn create_with_empty_name_fails() {
        let errs = create_from(json!({"project_id": 1, "name": ""}))
            .into_new_good()
            .unwrap_err();
        assert!(errs.field_errors().contains_key("name"));
    }

    #[test]
    fn create_without_project_fails_on_project_id() {
        let errs = create_from(json!({"name": "Widget"}))
            .into_new_good()
            .unwrap_err();
        assert!(errs.field_errors().contains_key("project_id"));
    }

    #[test]
    fn create_with_zero_project_fails() {
        let errs = create_from(json!({"project_id": 0, "name": "Widget"}))
            .into_new_good()
            .unwrap_err();
        assert!(errs.field_errors().contains_key("project_id"));
    }

    #[test]
    fn create_keeps_requested_id_and_priority() {
        let new = create_from(json!({
            "id": 9, "project_id": 2, "name": "W", "priority": 0, "removed": true
        }))
        .into_new_good()
        .unwrap();
        assert_eq!(new.id, Some(9));
        assert_eq!(new.priority, Some(0));
        assert!(new.removed);
    }

    // -- PatchGood -------------------------------------------------------------

    #[test]
    fn patch_takes_identity_from_arguments() {
        let patch = patch_from(json!({
            "id": 999, "project_id": 999,
            "name": "N", "description": "D", "removed": false
        }))
        .into_patch(5, 6)
        .unwrap();
        assert_eq!(patch.id, 5);
        assert_eq!(patch.project_id, 6);
    }

    #[test]
    fn patch_requires_removed_to_be_echoed() {
        let errs = patch_from(json!({"name": "N", "description": "D"}))
            .into_patch(1, 1)
            .unwrap_err();
        assert!(errs.field_errors().contains_key("removed"));
    }

    #[test]
    fn patch_requires_description() {
        let errs = patch_from(json!({"name": "N", "removed": true}))
            .into_patch(1, 1)
            .unwrap_err();
        assert!(errs.field_errors().contains_key("description"));
    }

    #[test]
    fn patch_null_priority_clears_it() {
        let patch = patch_from(json!({
            "name": "N", "description": "D", "priority": null, "removed": false
        }))
        .into_patch(1, 1)
        .unwrap();
        assert_eq!(patch.priority, None);
    }

    // -- Good ------------------------------------------------------------------

    #[test]
    fn good_serializes_with_snake_case_fields() {
        let good = Good {
            id: 1,
            project_id: 2,
            name: "Widget".into(),
            description: "d".into(),
            priority: None,
            removed: false,
            created_at: chrono::Utc::now(),
        };
        let value = serde_json::to_value(&good).unwrap();
        assert_eq!(value["project_id"], 2);
        assert!(value["priority"].is_null());
        assert!(value["created_at"].is_string());
    }
}
