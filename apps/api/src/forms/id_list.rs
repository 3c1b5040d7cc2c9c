use crate::models::Field;

/// Parses a submitted hidden-field value ("3,7,12") into ids.
///
/// Empty and non-numeric parts are skipped, duplicates keep their first
/// position, and the list is cut to the field's limit.
pub fn parse_submitted_ids(field: Field, raw: &str) -> Vec<i64> {
    let mut ids: Vec<i64> = Vec::with_capacity(field.limit());
    for part in raw.split(',') {
        let Some(id) = parse_id(part) else {
            continue;
        };
        if !ids.contains(&id) {
            ids.push(id);
        }
        if ids.len() == field.limit() {
            break;
        }
    }
    ids
}

/// Single-select submission: a valid id wins, anything else keeps `existing`.
pub fn resolve_single(raw: Option<&str>, existing: Option<i64>) -> Option<i64> {
    raw.and_then(parse_id).or(existing)
}

fn parse_id(part: &str) -> Option<i64> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
