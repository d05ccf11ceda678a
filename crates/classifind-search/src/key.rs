//! Listing identity used for deduplication and prioritization.

use classifind_core::ProductRecord;
use serde_json::Value;

/// Derives the identity key of a listing, most specific source first:
///
/// 1. `id` → `"id:<id>"`
/// 2. `product_id` + `title` → `"prod:<product_id>:<title>"`
/// 3. `product_id` → `"prod:<product_id>"`
/// 4. `title` → `"title:<title>"`
/// 5. the serialized payload → `"json:<payload>"`
///
/// Returns `None` for an empty payload, or one that cannot be serialized.
#[must_use]
pub fn key_of(record: &ProductRecord) -> Option<String> {
    if let Some(id) = &record.id {
        return Some(format!("id:{id}"));
    }

    match (&record.product_id, &record.title) {
        (Some(product_id), Some(title)) => Some(format!("prod:{product_id}:{title}")),
        (Some(product_id), None) => Some(format!("prod:{product_id}")),
        (None, Some(title)) => Some(format!("title:{title}")),
        (None, None) => structural_key(&record.raw),
    }
}

/// `serde_json` maps are key-ordered, so equal payloads serialize identically.
fn structural_key(raw: &Value) -> Option<String> {
    match raw {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        other => serde_json::to_string(other)
            .ok()
            .map(|s| format!("json:{s}")),
    }
}
