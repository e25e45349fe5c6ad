/*
SPDX-License-Identifier: MPL-2.0
*/

//! Helpers for the AsciiBib `key.subkey:: value` line format.

/// Returns `"{prefix}."` for a non-empty prefix, `""` otherwise.
pub(crate) fn pref(prefix: &str) -> String {
    if prefix.is_empty() { String::new() } else { format!("{prefix}.") }
}

/// Appends a rendered fragment, dropping empty ones so joins stay clean.
pub(crate) fn push(out: &mut Vec<String>, fragment: String) {
    if !fragment.is_empty() {
        out.push(fragment);
    }
}
