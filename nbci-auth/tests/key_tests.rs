use nbci_auth::key::{is_well_formed, KEY_PREFIX, MIN_KEY_LEN};

// ── Well-formed keys ─────────────────────────────────────────────

#[test]
fn accepts_prefixed_key_of_minimum_length() {
    let key = format!("{}{}", KEY_PREFIX, "x".repeat(MIN_KEY_LEN - KEY_PREFIX.len()));
    assert!(is_well_formed(&key));
}

#[test]
fn accepts_long_key() {
    let key = format!("nbci_{}", "x".repeat(20));
    assert!(is_well_formed(&key));
}

#[test]
fn trims_surrounding_whitespace() {
    let key = format!("  nbci_{}  ", "x".repeat(20));
    assert!(is_well_formed(&key));
}

// ── Malformed keys ───────────────────────────────────────────────

#[test]
fn rejects_missing_prefix() {
    assert!(!is_well_formed("badkey"));
    assert!(!is_well_formed("abcd_xxxxxxxxxxxxxxxx"));
}

#[test]
fn rejects_short_key() {
    assert!(!is_well_formed("nbci_x"));
}

#[test]
fn rejects_empty_key() {
    assert!(!is_well_formed(""));
}

#[test]
fn rejects_prefix_alone() {
    assert!(!is_well_formed(KEY_PREFIX));
}

#[test]
fn rejects_prefix_in_wrong_case() {
    assert!(!is_well_formed("NBCI_xxxxxxxxxxxxxxxx"));
}
