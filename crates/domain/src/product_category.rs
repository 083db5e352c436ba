//! Product category: a grouping of catalogue products.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::ProductCategoryId;
use crate::lifecycle::Lifecycle;
use crate::record::{Draft, Record, Root, UpdateRequest, checks};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub id: ProductCategoryId,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductCategoryRequest {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateProductCategoryRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl UpdateRequest for UpdateProductCategoryRequest {
    fn code(&self) -> &str {
        &self.code
    }

    fn validate(&self) -> Result<(), ValidationError> {
        checks::length("name", &self.name, 1, 60)?;
        checks::length("code", &self.code, 1, 10)?;
        checks::optional_length("description", self.description.as_deref(), 300)
    }
}

/// Category row in listings, with the number of products filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategoryListItem {
    pub id: ProductCategoryId,
    pub name: String,
    pub code: String,
    pub is_deleted: bool,
    pub product_count: u64,
}

impl Record for ProductCategory {
    const KIND: &'static str = "ProductCategory";

    type Id = ProductCategoryId;
    type Parent = Root;
    type Request = UpdateProductCategoryRequest;
    type ListItem = ProductCategoryListItem;
    type ChildCount = u64;

    fn id(&self) -> ProductCategoryId {
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

    fn from_draft(id: ProductCategoryId, draft: Draft<Self>) -> Self {
        Self {
            id,
            name: draft.request.name,
            code: draft.request.code,
            description: draft.request.description,
            lifecycle: draft.lifecycle,
        }
    }

    fn apply(&mut self, request: UpdateProductCategoryRequest) {
        self.name = request.name;
        self.code = request.code;
        self.description = request.description;
    }

    fn into_list_item(self, product_count: u64) -> ProductCategoryListItem {
        ProductCategoryListItem {
            id: self.id,
            name: self.name,
            code: self.code,
            is_deleted: self.lifecycle.is_deleted,
            product_count,
        }
    }
}
