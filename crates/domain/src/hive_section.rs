//! Hive section: a subdivision of a [`Hive`](crate::hive::Hive).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{HiveId, HiveSectionId};
use crate::lifecycle::Lifecycle;
use crate::record::{Draft, Record, UpdateRequest, checks};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveSection {
    pub id: HiveSectionId,
    pub name: String,
    pub code: String,
    pub hive_id: HiveId,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

/// Fields a caller may set on a section. The owning hive is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHiveSectionRequest {
    pub name: String,
    pub code: String,
}

impl UpdateHiveSectionRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

impl UpdateRequest for UpdateHiveSectionRequest {
    fn code(&self) -> &str {
        &self.code
    }

    fn validate(&self) -> Result<(), ValidationError> {
        checks::length("name", &self.name, 4, 60)?;
        checks::exact_length("code", &self.code, 5)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveSectionListItem {
    pub id: HiveSectionId,
    pub name: String,
    pub code: String,
    pub hive_id: HiveId,
    pub is_deleted: bool,
}

impl Record for HiveSection {
    const KIND: &'static str = "HiveSection";

    const PARENT_KIND: &'static str = "Hive";

    type Id = HiveSectionId;
    type Parent = HiveId;
    type Request = UpdateHiveSectionRequest;
    type ListItem = HiveSectionListItem;
    type ChildCount = ();

    fn id(&self) -> HiveSectionId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn parent(&self) -> HiveId {
        self.hive_id
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn from_draft(id: HiveSectionId, draft: Draft<Self>) -> Self {
        Self {
            id,
            name: draft.request.name,
            code: draft.request.code,
            hive_id: draft.parent,
            lifecycle: draft.lifecycle,
        }
    }

    fn apply(&mut self, request: UpdateHiveSectionRequest) {
        self.name = request.name;
        self.code = request.code;
    }

    fn into_list_item(self, (): ()) -> HiveSectionListItem {
        HiveSectionListItem {
            id: self.id,
            name: self.name,
            code: self.code,
            hive_id: self.hive_id,
            is_deleted: self.lifecycle.is_deleted,
        }
    }
}
