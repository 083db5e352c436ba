//! Hive: a top-level storage location.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::HiveId;
use crate::lifecycle::Lifecycle;
use crate::record::{Draft, Record, Root, UpdateRequest, checks};

/// A storage location that owns [`HiveSection`](crate::hive_section::HiveSection)s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hive {
    pub id: HiveId,
    pub name: String,
    pub code: String,
    pub address: String,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

/// Fields a caller may set when creating or updating a hive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHiveRequest {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub address: String,
}

impl UpdateHiveRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            address: String::new(),
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }
}

impl UpdateRequest for UpdateHiveRequest {
    fn code(&self) -> &str {
        &self.code
    }

    fn validate(&self) -> Result<(), ValidationError> {
        checks::length("name", &self.name, 4, 60)?;
        checks::exact_length("code", &self.code, 5)?;
        checks::length("address", &self.address, 0, 300)
    }
}

/// Hive row in listings, with the number of sections it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveListItem {
    pub id: HiveId,
    pub name: String,
    pub code: String,
    pub is_deleted: bool,
    pub hive_section_count: u64,
}

impl Record for Hive {
    const KIND: &'static str = "Hive";

    type Id = HiveId;
    type Parent = Root;
    type Request = UpdateHiveRequest;
    type ListItem = HiveListItem;
    type ChildCount = u64;

    fn id(&self) -> HiveId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn parent(&self) -> Root {
        Root
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn from_draft(id: HiveId, draft: Draft<Self>) -> Self {
        let UpdateHiveRequest {
            name,
            code,
            address,
        } = draft.request;
        Self {
            id,
            name,
            code,
            address,
            lifecycle: draft.lifecycle,
        }
    }

    fn apply(&mut self, request: UpdateHiveRequest) {
        self.name = request.name;
        self.code = request.code;
        self.address = request.address;
    }

    fn into_list_item(self, hive_section_count: u64) -> HiveListItem {
        HiveListItem {
            id: self.id,
            name: self.name,
            code: self.code,
            is_deleted: self.lifecycle.is_deleted,
            hive_section_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::UserId;
    use chrono::Utc;

    fn stored() -> Hive {
        Hive::from_draft(
            HiveId::new(1),
            Draft {
                parent: Root,
                request: UpdateHiveRequest::new("North Hive", "NORTH").with_address("1 Main St"),
                lifecycle: Lifecycle::created(UserId::new(1), Utc::now()),
            },
        )
    }

    #[test]
    fn should_accept_valid_request() {
        let request = UpdateHiveRequest::new("North Hive", "NORTH");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn should_reject_code_that_is_not_five_characters() {
        let request = UpdateHiveRequest::new("North Hive", "NOR");
        assert_eq!(
            request.validate(),
            Err(ValidationError::ExactLength {
                field: "code",
                len: 5
            })
        );
    }

    #[test]
    fn should_reject_short_name() {
        let request = UpdateHiveRequest::new("N", "NORTH");
        assert!(matches!(
            request.validate(),
            Err(ValidationError::Length { field: "name", .. })
        ));
    }

    #[test]
    fn should_copy_request_fields_when_materialised() {
        let hive = stored();
        assert_eq!(hive.name, "North Hive");
        assert_eq!(hive.code, "NORTH");
        assert_eq!(hive.address, "1 Main St");
        assert!(!hive.lifecycle.is_deleted);
    }

    #[test]
    fn should_overwrite_only_request_fields_when_applied() {
        let mut hive = stored();
        let lifecycle = hive.lifecycle.clone();

        hive.apply(UpdateHiveRequest::new("South Hive", "SOUTH"));

        assert_eq!(hive.id, HiveId::new(1));
        assert_eq!(hive.name, "South Hive");
        assert_eq!(hive.code, "SOUTH");
        assert_eq!(hive.address, "");
        assert_eq!(hive.lifecycle, lifecycle);
    }

    #[test]
    fn should_serialize_with_camel_case_and_flattened_lifecycle() {
        let json = serde_json::to_value(stored()).unwrap();
        assert_eq!(json["code"], "NORTH");
        assert_eq!(json["isDeleted"], false);
        assert!(json.get("lifecycle").is_none());
    }

    #[test]
    fn should_carry_section_count_in_list_item() {
        let item = stored().into_list_item(3);
        assert_eq!(item.hive_section_count, 3);
        assert_eq!(item.code, "NORTH");
    }
}
