//! Tag mappings derived from an event's tag list

use crate::error::{Error, Result};
use crate::sentry::{Event, Tag};
use std::collections::HashMap;

pub type TagMap = HashMap<String, String>;

pub const HMI_TYPE: &str = "hmi_type";
pub const VEHICLE_BRAND: &str = "vehicle_brand";
pub const VEHICLE_TYPE: &str = "vehicle_type";
pub const VEHICLE_COUNTRY: &str = "vehicle_country";

/// Stands in for a user id or vehicle type the event did not carry
pub const ABSENT: &str = "unknown";

/// Folds the tag list into a mapping; later duplicates overwrite earlier ones
///
/// A tag with a `null` value clears the key.
pub fn extract_tags(tags: &[Tag]) -> TagMap {
    tags.iter().fold(TagMap::new(), |mut map, tag| {
        match &tag.value {
            Some(value) => map.insert(tag.key.clone(), value.clone()),
            None => map.remove(&tag.key),
        };
        map
    })
}

/// First whitespace-delimited word of the `hmi_type` tag, e.g. `MINI` for
/// `MINI ID5`
pub fn vehicle_brand(tags: &TagMap) -> Option<&str> {
    tags.get(HMI_TYPE)
        .and_then(|hmi_type| hmi_type.split_whitespace().next())
}

/// Tag mapping of `event` with `vehicle_brand` derived from `hmi_type`
///
/// Every event is expected to report its HMI type; one that does not is a
/// [`Error::MissingTag`].
pub fn vehicle_tags(event: &Event) -> Result<TagMap> {
    let mut tags = extract_tags(&event.tags);
    let brand = vehicle_brand(&tags)
        .ok_or_else(|| Error::MissingTag {
            key: HMI_TYPE,
            event_id: event.display_id().to_string(),
        })?
        .to_string();
    tags.insert(VEHICLE_BRAND.to_string(), brand);
    Ok(tags)
}

/// Identifies one car as `{user}-{vehicle_type}`
pub fn car_id(event: &Event, tags: &TagMap) -> String {
    let user = event.user_id().unwrap_or(ABSENT);
    let vehicle_type = tags.get(VEHICLE_TYPE).map_or(ABSENT, String::as_str);
    format!("{user}-{vehicle_type}")
}
