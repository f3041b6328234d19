use serde::Deserialize;
use site::validate::{FieldKind, field_spec};

#[derive(Debug, Deserialize)]
struct Cases {
    case: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    field: String,
    input: String,
    valid: bool,
}

fn kind(field: &str) -> FieldKind {
    match field {
        "name" => FieldKind::Name,
        "email" => FieldKind::Email,
        "phone" => FieldKind::Phone,
        "message" => FieldKind::Message,
        other => panic!("unknown field {other:?} in fixture"),
    }
}

#[test]
fn field_rules_match_fixture_table() {
    let raw = include_str!("fixtures/validation_cases.toml");
    let cases: Cases = toml::from_str(raw).expect("fixture parses");
    assert!(!cases.case.is_empty());

    let failures: Vec<String> = cases
        .case
        .iter()
        .filter(|c| (field_spec(kind(&c.field)).validate)(&c.input) != c.valid)
        .map(|c| format!("{} {:?}: expected valid={}", c.field, c.input, c.valid))
        .collect();
    assert!(failures.is_empty(), "mismatches:\n{}", failures.join("\n"));
}
