use super::*;

#[test]
fn test_parse_confirm_explicit() {
    assert!(parse_confirm("y", false));
    assert!(parse_confirm("Yes", false));
    assert!(!parse_confirm("n", true));
    assert!(!parse_confirm("NO", true));
}

#[test]
fn test_parse_confirm_empty_takes_default() {
    assert!(parse_confirm("", true));
    assert!(!parse_confirm("", false));
}

#[test]
fn test_parse_confirm_garbage_is_no() {
    assert!(!parse_confirm("maybe", true));
}

#[test]
fn test_apply_default() {
    assert_eq!(apply_default("", "alice"), "alice");
    assert_eq!(apply_default("bob", "alice"), "bob");
}
