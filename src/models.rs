use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::store::Record;

/// A pet as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Pet {
    pub id: u64,
    pub name: String,
    pub category: String,
}

impl Pet {
    pub fn new(id: u64, payload: PetPayload) -> Self {
        Self {
            id,
            name: payload.name,
            category: payload.category,
        }
    }

    /// Store key of this pet
    pub fn key(&self) -> String {
        self.id.to_string()
    }

    /// Flatten into the string-valued record the store keeps
    pub fn to_record(&self) -> Record {
        Record::from([
            ("id".to_string(), self.id.to_string()),
            ("name".to_string(), self.name.clone()),
            ("category".to_string(), self.category.clone()),
        ])
    }

    /// Rebuild a pet from the record stored at `key`
    ///
    /// The store keeps every field as a string; `id` is parsed back into an
    /// integer so responses carry a JSON number.
    pub fn from_record(key: &str, record: &Record) -> Result<Self, ApiError> {
        let field = |name: &str| {
            record.get(name).cloned().ok_or_else(|| ApiError::CorruptRecord {
                key: key.to_string(),
                reason: format!("missing field '{}'", name),
            })
        };

        let id_str = record.get("id").map(String::as_str).unwrap_or(key);
        let id = id_str.parse::<u64>().map_err(|_| ApiError::CorruptRecord {
            key: key.to_string(),
            reason: format!("id '{}' is not an integer", id_str),
        })?;

        Ok(Self {
            id,
            name: field("name")?,
            category: field("category")?,
        })
    }
}

/// Request body for creating or replacing a pet
///
/// Any `id` in the body is ignored; ids are always assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
pub struct PetPayload {
    pub name: String,
    pub category: String,
}

impl PetPayload {
    /// Decode and validate a raw request body
    ///
    /// Bodies that are not JSON fail with [`ApiError::MalformedJson`];
    /// JSON with missing, mistyped, or empty fields fails with
    /// [`ApiError::InvalidPet`].
    pub fn decode(body: &[u8]) -> Result<Self, ApiError> {
        let payload: PetPayload = serde_json::from_slice(body)?;
        payload.validate()?;
        Ok(payload)
    }

    /// Both fields must be present and non-empty
    pub fn validate(&self) -> Result<(), ApiError> {
        for (field, value) in [("name", &self.name), ("category", &self.category)] {
            if value.is_empty() {
                return Err(ApiError::InvalidPet(format!(
                    "field `{}` must not be empty",
                    field
                )));
            }
        }
        Ok(())
    }
}

/// Query parameters for the list endpoint
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub category: Option<String>,
}

impl ListQuery {
    /// Build from raw query pairs
    ///
    /// A repeated parameter uses its first value and an empty `category`
    /// means no filter, so no query string is ever rejected.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let category = pairs
            .into_iter()
            .find(|(name, _)| name == "category")
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty());
        Self { category }
    }
}

/// Service metadata returned by the index endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IndexResponse {
    pub name: String,
    pub version: String,
    pub url: String,
    pub data: String,
}
