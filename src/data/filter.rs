use super::model::{Field, Record};

// ---------------------------------------------------------------------------
// Free-text search over every column
// ---------------------------------------------------------------------------

/// A record matches when any of its values, rendered as text, contains the
/// term case-insensitively. The term is used as typed (no trimming), and an
/// empty term matches everything.
pub fn matches_search(record: &Record, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    Field::ALL
        .iter()
        .any(|&field| record.get(field).to_string().to_lowercase().contains(&needle))
}

/// Keep the rows matching `term`, preserving their order.
pub fn filter_records<'a>(rows: &[&'a Record], term: &str) -> Vec<&'a Record> {
    rows.iter()
        .copied()
        .filter(|rec| matches_search(rec, term))
        .collect()
}
