// tests/evaluator_tests.rs

use serde_json::json;
use sift_lang::evaluator::{EvalError, Evaluator, Resolver};
use sift_lang::{Query, Value};

fn check(query: &str, record: serde_json::Value) -> bool {
    let query = Query::parse(query).unwrap();
    let record = Value::from(record);
    Evaluator::new().matches(&query, &record).unwrap()
}

// ============================================================================
// Path resolution
// ============================================================================

#[test]
fn test_nested_field_access() {
    assert!(check("one.two = rhs", json!({"one": {"two": "rhs"}})));
    assert!(!check("one.two = rhs", json!({"one": {"x": "rhs"}})));
    assert!(check(
        "one.two[0].three = rhs",
        json!({"one": {"two": [{"three": "rhs"}]}})
    ));
}

#[test]
fn test_missing_key_is_no_match() {
    assert!(!check("missing = x", json!({"one": 1})));
    assert!(!check("one.missing = x", json!({"one": {"two": 2}})));
}

#[test]
fn test_field_access_on_scalar_is_no_match() {
    assert!(!check("one.two = x", json!({"one": 5})));
}

#[test]
fn test_index_access() {
    assert!(check("one.two[0] = rhs", json!({"one": {"two": ["rhs"]}})));
    assert!(!check("one.two[1] = rhs", json!({"one": {"two": ["rhs"]}})));
    assert!(!check("one[0] = x", json!({"one": {"0": "x"}})));
}

#[test]
fn test_null_intermediate_is_no_match() {
    assert!(!check("one.two = x", json!({"one": null})));
    assert!(!check("one", json!({"one": null})));
}

#[test]
fn test_conjunction_and_disjunction() {
    let record = json!({"one": {"two": "x"}, "three": {"four": ["y"]}, "five": 1});
    assert!(check("one.two = x and three.four[0] = y", record.clone()));
    assert!(check("one.two = x and three.four[0] = z or five", record.clone()));
    assert!(!check("one.two = z or five = 2", record));
}

// ============================================================================
// Comparison
// ============================================================================

#[test]
fn test_equality_folds_case_for_text() {
    assert!(check("name = \"john\"", json!({"name": "John"})));
    assert!(check("name = JOHN", json!({"name": "john"})));
    assert!(!check("name != \"john\"", json!({"name": "John"})));
}

#[test]
fn test_numeric_equality() {
    assert!(check("age = 30", json!({"age": 30})));
    assert!(check("age = 30", json!({"age": 30.0})));
    assert!(!check("age = 30", json!({"age": 31})));
    // Quoted digits compare as text, not numbers.
    assert!(!check("age = \"30\"", json!({"age": 30})));
}

#[test]
fn test_ordering() {
    assert!(check("one < 0", json!({"one": -1})));
    assert!(check("one.two <= 2", json!({"one": {"two": 2}})));
    assert!(check("year >= 2021", json!({"year": 2021.5})));
    assert!(check("id < \"person002\"", json!({"id": "person001"})));
    assert!(!check("id > \"person002\"", json!({"id": "person001"})));
}

#[test]
fn test_incomparable_types_are_no_match() {
    // String value against an integer literal: no ordering either way.
    assert!(!check("one < 0", json!({"one": "x"})));
    assert!(!check("one > 0", json!({"one": "x"})));
    assert!(!check("one <= 0", json!({"one": "x"})));
    assert!(!check("one >= 0", json!({"one": "x"})));
    assert!(!check("one < x", json!({"one": 5})));
}

#[test]
fn test_contains_substring() {
    assert!(check("s ~ 2", json!({"s": "co2"})));
    assert!(check("s ~ \"2\"", json!({"s": "co2"})));
    assert!(!check("s ~ 2", json!({"s": "abc"})));
    assert!(check("s ~ \"CO\"", json!({"s": "co2"})));
    assert!(check("s !~ xyz", json!({"s": "co2"})));
}

#[test]
fn test_contains_membership() {
    assert!(check("arr ~ 2", json!({"arr": [1, 2, 3]})));
    assert!(!check("arr ~ 4", json!({"arr": [1, 2, 3]})));
    assert!(check("arr ~ x", json!({"arr": ["x", "y"]})));
    assert!(check("arr !~ z", json!({"arr": ["x", "y"]})));
    assert!(!check("arr ~ x", json!({"arr": []})));
}

#[test]
fn test_contains_on_scalar_is_no_match() {
    assert!(!check("n ~ 2", json!({"n": 5})));
}

#[test]
fn test_truthiness_term() {
    assert!(check("one.two", json!({"one": {"two": 1}})));
    assert!(check("one", json!({"one": -1})));
    assert!(check("flag", json!({"flag": true})));
    assert!(!check("flag", json!({"flag": false})));
    assert!(!check("one", json!({"one": 0})));
    assert!(!check("one", json!({"one": ""})));
    assert!(!check("one", json!({"one": []})));
    assert!(!check("one", json!({"one": {}})));
    assert!(!check("missing", json!({"one": 1})));
}

#[test]
fn test_boolean_equals_integer_form() {
    assert!(check("private = 1", json!({"private": true})));
    assert!(check("private = 0", json!({"private": false})));
    assert!(!check("private = 1", json!({"private": false})));
}

// ============================================================================
// length
// ============================================================================

#[test]
fn test_length_of_array() {
    assert!(check("array.length = 1", json!({"array": ["x"]})));
    assert!(!check("array.length = 1", json!({"array": []})));
    assert!(!check("array.length = 1", json!({"array": ["x", "y"]})));
    assert!(check("array.length = 0", json!({"array": []})));
}

#[test]
fn test_length_of_string_and_mapping() {
    assert!(check("name.length = 4", json!({"name": "John"})));
    assert!(check("attrs.length = 2", json!({"attrs": {"a": 1, "b": 2}})));
}

#[test]
fn test_length_of_non_countable_is_no_match() {
    assert!(!check("n.length = 1", json!({"n": 5})));
    assert!(!check("n.length", json!({"n": 5})));
}

// ============================================================================
// Quantifiers
// ============================================================================

#[test]
fn test_any_final_segment() {
    assert!(check("arr.any = 2", json!({"arr": [1, 2, 3]})));
    assert!(!check("arr.any = 2", json!({"arr": [3, 4, 5]})));
    assert!(!check("arr.any = 2", json!({"arr": []})));
}

#[test]
fn test_all_final_segment() {
    assert!(check("arr.all = 2", json!({"arr": [2, 2, 2]})));
    assert!(!check("arr.all = 2", json!({"arr": [2, 2, 3]})));
}

#[test]
fn test_all_on_empty_sequence_is_false() {
    // Not vacuously true: the reduction requires at least one element.
    assert!(!check("arr.all = 2", json!({"arr": []})));
    assert!(!check("arr.all", json!({"arr": []})));
}

#[test]
fn test_quantifier_with_remaining_path() {
    let record = json!({"refs": [{"ref": "a"}, {"ref": "b"}]});
    assert!(check("refs.any.ref = a", record.clone()));
    assert!(!check("refs.any.ref = c", record.clone()));
    assert!(check("refs.all.ref != c", record.clone()));
    assert!(!check("refs.all.ref = a", record));
}

#[test]
fn test_quantifier_on_non_sequence_is_no_match() {
    assert!(!check("one.any = 2", json!({"one": 2})));
    assert!(!check("one.all = 2", json!({"one": {"a": 2}})));
}

#[test]
fn test_quantifier_skips_invalid_elements() {
    // Elements whose type cannot satisfy the comparison are non-matching,
    // not fatal.
    assert!(check("arr.any = 2", json!({"arr": [{"a": 1}, 2]})));
    assert!(check("arr.any.ref = a", json!({"arr": ["scalar", {"ref": "a"}]})));
}

#[test]
fn test_quantifier_truthiness() {
    assert!(check("arr.any", json!({"arr": [0, 1]})));
    assert!(!check("arr.all", json!({"arr": [0, 1]})));
    assert!(check("arr.all", json!({"arr": [1, 2]})));
}

#[test]
fn test_nested_quantifiers() {
    let record = json!({"outer": [{"inner": [1, 2]}, {"inner": [3]}]});
    assert!(check("outer.any.inner.any = 3", record.clone()));
    assert!(!check("outer.all.inner.any = 3", record));
}

// ============================================================================
// Dereference
// ============================================================================

struct NoteStore;

impl Resolver for NoteStore {
    fn resolve(&self, category: &str, key: &str) -> Option<Value> {
        if category == "note" && key == "h1" {
            Some(Value::from(json!({"gramps_id": "note003"})))
        } else {
            None
        }
    }
}

#[test]
fn test_dereference_through_resolver() {
    let query = Query::parse("note_list.any.get_note.gramps_id = note003").unwrap();
    let store = NoteStore;
    let evaluator = Evaluator::with_resolver(&store);

    let record = Value::from(json!({"note_list": ["h1"]}));
    assert!(evaluator.matches(&query, &record).unwrap());

    let record = Value::from(json!({"note_list": ["h2"]}));
    assert!(!evaluator.matches(&query, &record).unwrap());
}

#[test]
fn test_dereference_wrong_category_is_no_match() {
    let query = Query::parse("note_list.any.get_person.gramps_id = note003").unwrap();
    let store = NoteStore;
    let evaluator = Evaluator::with_resolver(&store);

    let record = Value::from(json!({"note_list": ["h1"]}));
    assert!(!evaluator.matches(&query, &record).unwrap());
}

#[test]
fn test_dereference_non_string_key_is_no_match() {
    let store = NoteStore;
    let evaluator = Evaluator::with_resolver(&store);

    let query = Query::parse("ref.get_note.gramps_id = note003").unwrap();
    let record = Value::from(json!({"ref": 42}));
    assert!(!evaluator.matches(&query, &record).unwrap());

    // First segment against a mapping: the candidate itself is not a key.
    let query = Query::parse("get_note.gramps_id = note003").unwrap();
    let record = Value::from(json!({"gramps_id": "x"}));
    assert!(!evaluator.matches(&query, &record).unwrap());
}

#[test]
fn test_dereference_without_resolver_is_an_error() {
    let query = Query::parse("note_list.any.get_note.gramps_id = note003").unwrap();
    let record = Value::from(json!({"note_list": ["h1"]}));

    let err = Evaluator::new().matches(&query, &record).unwrap_err();
    assert_eq!(
        err,
        EvalError::MissingResolver {
            category: "note".to_string()
        }
    );
}

#[test]
fn test_resolver_error_propagates_through_connectives() {
    let query = Query::parse("gramps_id = x or note_list.any.get_note.gramps_id = y").unwrap();
    let record = Value::from(json!({"gramps_id": "x", "note_list": ["h1"]}));
    assert!(Evaluator::new().matches(&query, &record).is_err());
}

// ============================================================================
// Convenience entry point
// ============================================================================

#[test]
fn test_matches_convenience() {
    let record = Value::from(json!({"one": {"two": "x"}}));
    assert!(sift_lang::matches("one.two = x", &record).unwrap());
    assert!(sift_lang::matches("one.two", &record).unwrap());
    assert!(!sift_lang::matches("one.three = x", &record).unwrap());
    assert!(sift_lang::matches("one.two = ", &record).is_err());
}
