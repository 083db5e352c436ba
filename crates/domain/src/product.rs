//! Catalogue product: a stocked item filed under a
//! [`ProductCategory`](crate::product_category::ProductCategory).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{ProductCategoryId, ProductId};
use crate::lifecycle::Lifecycle;
use crate::record::{Draft, Record, UpdateRequest, checks};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueProduct {
    pub id: ProductId,
    pub name: String,
    pub code: String,
    pub category_id: ProductCategoryId,
    pub description: Option<String>,
    pub manufacturer_code: Option<String>,
    pub price: f64,
    #[serde(flatten)]
    pub lifecycle: Lifecycle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manufacturer_code: Option<String>,
    #[serde(default)]
    pub price: f64,
}

impl UpdateProductRequest {
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            description: None,
            manufacturer_code: None,
            price: 0.0,
        }
    }

    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    #[must_use]
    pub fn with_manufacturer_code(mut self, code: impl Into<String>) -> Self {
        self.manufacturer_code = Some(code.into());
        self
    }
}

impl UpdateRequest for UpdateProductRequest {
    fn code(&self) -> &str {
        &self.code
    }

    fn validate(&self) -> Result<(), ValidationError> {
        checks::length("name", &self.name, 1, 60)?;
        checks::length("code", &self.code, 1, 10)?;
        checks::optional_length("description", self.description.as_deref(), 300)?;
        checks::optional_length("manufacturerCode", self.manufacturer_code.as_deref(), 10)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    pub id: ProductId,
    pub name: String,
    pub code: String,
    pub category_id: ProductCategoryId,
    pub price: f64,
    pub is_deleted: bool,
}

impl Record for CatalogueProduct {
    const KIND: &'static str = "CatalogueProduct";

    const PARENT_KIND: &'static str = "ProductCategory";

    type Id = ProductId;
    type Parent = ProductCategoryId;
    type Request = UpdateProductRequest;
    type ListItem = ProductListItem;
    type ChildCount = ();

    fn id(&self) -> ProductId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn parent(&self) -> ProductCategoryId {
        self.category_id
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn from_draft(id: ProductId, draft: Draft<Self>) -> Self {
        let UpdateProductRequest {
            name,
            code,
            description,
            manufacturer_code,
            price,
        } = draft.request;
        Self {
            id,
            name,
            code,
            category_id: draft.parent,
            description,
            manufacturer_code,
            price,
            lifecycle: draft.lifecycle,
        }
    }

    fn apply(&mut self, request: UpdateProductRequest) {
        self.name = request.name;
        self.code = request.code;
        self.description = request.description;
        self.manufacturer_code = request.manufacturer_code;
        self.price = request.price;
    }

    fn into_list_item(self, (): ()) -> ProductListItem {
        ProductListItem {
            id: self.id,
            name: self.name,
            code: self.code,
            category_id: self.category_id,
            price: self.price,
            is_deleted: self.lifecycle.is_deleted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_free_product() {
        assert!(UpdateProductRequest::new("Tent", "TENT-01").validate().is_ok());
    }

    #[test]
    fn should_reject_negative_price() {
        let result = UpdateProductRequest::new("Tent", "TENT-01")
            .with_price(-1.0)
            .validate();
        assert_eq!(result, Err(ValidationError::InvalidPrice));
    }

    #[test]
    fn should_reject_non_finite_price() {
        let result = UpdateProductRequest::new("Tent", "TENT-01")
            .with_price(f64::NAN)
            .validate();
        assert_eq!(result, Err(ValidationError::InvalidPrice));
    }

    #[test]
    fn should_reject_overlong_manufacturer_code() {
        let result = UpdateProductRequest::new("Tent", "TENT-01")
            .with_manufacturer_code("ABCDEFGHIJK")
            .validate();
        assert!(matches!(
            result,
            Err(ValidationError::Length {
                field: "manufacturerCode",
                ..
            })
        ));
    }
}
