//! Dose-series grouping keys.
//!
//! Display names carry a canonical `" (dosis i/n)"` suffix when they belong
//! to a numbered series. Splitting that suffix off yields the base name
//! shared by sibling doses, which persistence uses for "this and all
//! future doses" operations.

use crate::vocab;

/// Strip trailing dose-position suffixes, returning the shared base name.
///
/// A suffix is recognized only when the name ends with `)` and the last
/// `" (dosis "` marker opens a tail that starts with "dosis "
/// (case-insensitive). Anything else, including unrelated trailing
/// parentheses, is returned unchanged. Stripping repeats until no suffix
/// remains, so the result is a fixpoint.
pub fn split_dose_base(name: &str) -> &str {
    let mut base = name;
    while let Some(stripped) = strip_suffix_once(base) {
        base = stripped;
    }
    base
}

/// Grouping key for an event: the split base when the name is suffixed,
/// else normalized notes when present, else the normalized name itself.
pub fn series_key(full_name: &str, notes: Option<&str>) -> String {
    let base = split_dose_base(full_name);
    if base.len() != full_name.len() {
        return normalize_key(base);
    }
    if let Some(notes) = notes {
        let key = normalize_key(notes);
        if !key.is_empty() {
            return key;
        }
    }
    normalize_key(full_name)
}

/// Case- and whitespace-insensitive lookup key.
pub fn normalize_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn strip_suffix_once(name: &str) -> Option<&str> {
    if !name.ends_with(')') {
        return None;
    }

    let lower = name.to_lowercase();
    let idx = lower.rfind(vocab::DOSE_MARKER)?;
    if idx == 0 {
        return None;
    }

    // Lowercasing may shift byte offsets around unusual characters, so
    // confirm the marker really sits at idx in the original string. The
    // marker is ASCII, which makes the case-insensitive compare cheap.
    let marker = name.get(idx..idx + vocab::DOSE_MARKER.len())?;
    if !marker.eq_ignore_ascii_case(vocab::DOSE_MARKER) {
        return None;
    }

    Some(name[..idx].trim_end())
}
