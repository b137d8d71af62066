use std::collections::HashMap;

/// Address fields naming the street, most specific first
pub const STREET_FIELDS: &[&str] = &["road", "pedestrian"];

/// Address fields naming the locality, most specific first
pub const LOCALITY_FIELDS: &[&str] = &["village", "suburb", "town", "city", "county"];

/// Label used when the provider returned nothing usable
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Return the value of the first field in `keys` that is present and non-blank
pub fn first_present<'a>(fields: &'a HashMap<String, String>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// Build a short "Locality, Street" label from structured address fields
///
/// Falls back to whichever half is available, then the provider's display
/// name, then [`UNKNOWN_LOCATION`].
pub fn concise_address(fields: &HashMap<String, String>, display_name: Option<&str>) -> String {
    let street = first_present(fields, STREET_FIELDS);
    let locality = first_present(fields, LOCALITY_FIELDS);

    match (locality, street) {
        (Some(locality), Some(street)) => format!("{}, {}", locality, street),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_LOCATION)
            .to_string(),
    }
}
