use uuid::Uuid;

pub type Id = String;

/// Sentinel stored in an identity column to mean "applies to any value".
pub const WILDCARD: &str = "*";

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// `None` for absent or empty input.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Collapses an absent or empty field to the wildcard.
pub fn or_wildcard(value: Option<&str>) -> String {
    non_empty(value).unwrap_or(WILDCARD).to_string()
}
