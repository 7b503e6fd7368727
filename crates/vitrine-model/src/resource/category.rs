use serde::{Deserialize, Serialize};

use super::{FieldName, Resource};

/// Product category, possibly nested under a parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Id,
    Name,
    ParentId,
    CreatedAt,
}

impl FieldName for CategoryField {
    fn as_str(&self) -> &'static str {
        match self {
            CategoryField::Id => "id",
            CategoryField::Name => "name",
            CategoryField::ParentId => "parent_id",
            CategoryField::CreatedAt => "created_at",
        }
    }
}

impl Resource for Category {
    const PATH: &'static str = "categories";
    type Field = CategoryField;
}
