use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

/// A stored catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Assigned by the store on creation
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Widget")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = 9.99)]
    pub price: f64,
}

/// A product that has passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Body of `POST /`.
///
/// Every field is optional at the JSON level so that a missing name or price is
/// reported as a validation failure rather than a deserialization error.
/// Unknown fields are ignored; `desc` is accepted for `description`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AddProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Widget")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 9.99, minimum = 0.0)]
    pub price: Option<f64>,

    #[serde(default, alias = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One failed rule of [`AddProductRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub code: &'static str,
    pub message: &'static str,
}

impl AddProductRequest {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Failed rules in check order: name first, then price.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            violations.push(Violation {
                field: "name",
                code: "blank_name",
                message: "Product name must not be blank",
            });
        }

        match self.price {
            None => violations.push(Violation {
                field: "price",
                code: "missing_price",
                message: "Product price is required",
            }),
            Some(price) if price < 0.0 => violations.push(Violation {
                field: "price",
                code: "negative_price",
                message: "Product price must not be negative",
            }),
            Some(_) => {}
        }

        violations
    }

    /// Convert into a [`NewProduct`] with the name trimmed.
    ///
    /// Returns `None` if a required field is missing; call after validation.
    pub fn into_new_product(self) -> Option<NewProduct> {
        Some(NewProduct {
            name: self.name?.trim().to_string(),
            description: self.description,
            price: self.price?,
        })
    }
}

impl Validate for AddProductRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for violation in self.violations() {
            errors.add(
                violation.field,
                ValidationError::new(violation.code).with_message(violation.message.into()),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
