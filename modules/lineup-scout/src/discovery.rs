use std::sync::LazyLock;

use regex::Regex;

use lineup_common::EventMetadata;

use crate::error::{Result, ScoutError};

static RE_NEXT_DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<script[^>]*id="__NEXT_DATA__"[^>]*>(.*?)</script>"#).unwrap()
});

/// Locate the backend feed identifiers inside a rendered page's embedded
/// `__NEXT_DATA__` payload.
///
/// The contract: the payload carries `props.pageProps.doc.blocks[]`, and
/// at least one block is typed `line-up` with non-empty `event` and `uuid`
/// fields. This is the sole discovery mechanism for the fallback path, so
/// every miss is `MetadataNotFound`.
pub fn discover_event_metadata(html: &str) -> Result<EventMetadata> {
    let payload = RE_NEXT_DATA
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            ScoutError::MetadataNotFound("no __NEXT_DATA__ payload on the page".to_string())
        })?;

    let data: serde_json::Value = serde_json::from_str(payload).map_err(|e| {
        ScoutError::MetadataNotFound(format!("__NEXT_DATA__ payload is not valid JSON: {e}"))
    })?;

    let blocks = data
        .pointer("/props/pageProps/doc/blocks")
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            ScoutError::MetadataNotFound("page data has no content blocks".to_string())
        })?;

    // First block typed `line-up` that carries both identifiers; blocks
    // missing either field are skipped, not errors.
    blocks
        .iter()
        .find_map(|block| {
            if block.get("type").and_then(|v| v.as_str()) != Some("line-up") {
                return None;
            }
            let event_code = non_empty_str(block.get("event"))?;
            let instance_id = non_empty_str(block.get("uuid"))?;
            Some(EventMetadata {
                event_code: event_code.to_string(),
                instance_id: instance_id.to_string(),
            })
        })
        .ok_or_else(|| {
            ScoutError::MetadataNotFound(
                "no line-up block with event and uuid in page data".to_string(),
            )
        })
}

fn non_empty_str(value: Option<&serde_json::Value>) -> Option<&str> {
    value.and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}
