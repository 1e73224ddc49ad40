use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::transaction::models::TransactionType;
use crate::validation::{self, FieldRules, WireEnum};

pub const DEFAULT_COLOR: &str = "#6b21a8";

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// A persisted category
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Category {
    /// Unique category identifier
    pub id: i32,
    #[schema(example = "Utilidades")]
    pub name: String,
    /// Whether the category holds expenses or income
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    /// Display color in hex format
    #[schema(example = "#f97316")]
    pub color: String,
}

/// Database row for categories
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub category_type: String,
    pub color: Option<String>,
}

impl CategoryRow {
    pub fn into_category(self) -> Result<Category, String> {
        let category_type = TransactionType::parse(&self.category_type)
            .ok_or_else(|| format!("unexpected type value '{}'", self.category_type))?;

        Ok(Category {
            id: self.id,
            name: self.name,
            category_type,
            color: self.color.unwrap_or_else(default_color),
        })
    }
}

/// Insertable shape of a category (request body for creation)
#[derive(Debug, Clone, PartialEq, ToSchema)]
pub struct NewCategory {
    /// Category name (1-50 characters)
    #[schema(example = "Utilidades")]
    pub name: String,
    #[schema(rename = "type")]
    pub category_type: TransactionType,
    /// Display color in hex format (defaults to #6b21a8)
    #[schema(required = false, example = "#f97316")]
    pub color: String,
}

impl NewCategory {
    pub fn new(name: &str, category_type: TransactionType, color: &str) -> Self {
        Self {
            name: name.to_string(),
            category_type,
            color: color.to_string(),
        }
    }

    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut rules = FieldRules::new(body)?;

        let name = rules.required("name", validation::text(50));
        let category_type = rules.required("type", validation::one_of::<TransactionType>);
        let color = rules
            .optional("color", validation::color_hex)
            .unwrap_or_else(default_color);

        match (name, category_type) {
            (Some(name), Some(category_type)) => rules.finish().map(|()| Self {
                name,
                category_type,
                color,
            }),
            _ => Err(rules.into_errors()),
        }
    }
}
