// Route path constants - single source of truth for all API paths

pub const INDEX: &str = "/";
pub const HEALTH: &str = "/health";
pub const PETS: &str = "/pets";
pub const PET_ITEM: &str = "/pets/{id}";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI: &str = "/swagger-ui";

/// URL of a single pet, as used in `Location` headers
pub fn pet_location(id: u64) -> String {
    format!("{}/{}", PETS, id)
}
