use serde::{Deserialize, Serialize};

use super::{FieldName, Resource};

/// A seller's store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub owner_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreField {
    Id,
    Name,
    OwnerId,
    CreatedAt,
}

impl FieldName for StoreField {
    fn as_str(&self) -> &'static str {
        match self {
            StoreField::Id => "id",
            StoreField::Name => "name",
            StoreField::OwnerId => "owner_id",
            StoreField::CreatedAt => "created_at",
        }
    }
}

impl Resource for Store {
    const PATH: &'static str = "stores";
    type Field = StoreField;
}
