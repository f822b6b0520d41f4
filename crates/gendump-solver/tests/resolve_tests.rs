use super::*;
use crate::registry::SetupError;
use crate::test_fixtures::MockRegistry;
use crate::category::CategoryTree;

fn engine(registry: &MockRegistry) -> ResolutionEngine<'_, MockRegistry> {
    ResolutionEngine::new(registry, ResolutionPolicy::default()).expect("placeholders present")
}

#[test]
fn test_new_requires_structural_reference() {
    let (mut registry, _, _) = MockRegistry::with_placeholders();
    registry.clear_placeholders();
    let err = ResolutionEngine::new(&registry, ResolutionPolicy::default())
        .err()
        .expect("setup must fail");
    assert_eq!(
        err,
        SetupError::MissingCapability("structural reference placeholder")
    );
}

#[test]
fn test_new_requires_primitive_numeric() {
    let (mut registry, _, _) = MockRegistry::with_placeholders();
    registry.clear_primitive_numeric();
    assert!(matches!(
        ResolutionEngine::new(&registry, ResolutionPolicy::default()),
        Err(SetupError::MissingCapability("primitive numeric placeholder"))
    ));
}

#[test]
fn test_structural_reference_wins_over_everything() {
    let (mut registry, reference, numeric) = MockRegistry::with_placeholders();
    let bar = registry.open("Bar");
    registry.set_candidates(bar, &[numeric, reference]);

    let engine = engine(&registry);
    let mut report = PassReport::new();
    let chosen = engine.resolve_argument(bar, &mut report).expect("resolved");

    assert_eq!(chosen.source, ArgumentSource::StructuralReference);
    assert_eq!(chosen.instantiation, registry.instance(bar, reference));
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_numeric_placeholder_when_reference_is_unsupported() {
    let (mut registry, reference, numeric) = MockRegistry::with_placeholders();
    let bar = registry.open("Bar");
    let with_ref = registry.instance(bar, reference);
    registry.mark_unsupported(with_ref);

    let engine = engine(&registry);
    let chosen = engine
        .resolve_argument(bar, &mut PassReport::new())
        .expect("resolved");
    assert_eq!(chosen.source, ArgumentSource::PrimitiveNumeric);
    assert_eq!(chosen.instantiation, registry.instance(bar, numeric));
}

#[test]
fn test_numeric_placeholder_beats_valid_candidates() {
    let (mut registry, reference, numeric) = MockRegistry::with_placeholders();
    let int = registry.closed("Int");
    let bar = registry.open("Bar");
    let candidates = registry.set_candidates(bar, &[int, reference]);
    let with_ref = registry.instance(bar, reference);
    registry.mark_unsupported(with_ref);

    let engine = engine(&registry);
    let mut report = PassReport::new();
    let chosen = engine.resolve_argument(bar, &mut report).expect("resolved");

    assert_eq!(chosen.source, ArgumentSource::PrimitiveNumeric);
    assert_eq!(chosen.instantiation, registry.instance(bar, numeric));
    assert_ne!(chosen.instantiation, candidates[0]);
    assert!(report.unresolved.is_empty());
}

#[test]
fn test_numeric_placeholder_when_reference_fails_to_instantiate() {
    let (mut registry, reference, _) = MockRegistry::with_placeholders();
    let bar = registry.open("Bar");
    registry.fail_instantiation(bar, reference);

    let engine = engine(&registry);
    let mut report = PassReport::new();
    let chosen = engine.resolve_argument(bar, &mut report).expect("resolved");

    assert_eq!(chosen.source, ArgumentSource::PrimitiveNumeric);
    assert_eq!(report.rejected_candidates, 1);
    assert_eq!(
        report.diagnostics[0].code,
        gendump_common::diagnostic_codes::INSTANTIATION_FAILED
    );
}

#[test]
fn test_first_fully_valid_candidate_wins() {
    let (mut registry, reference, numeric) = MockRegistry::with_placeholders();
    let int = registry.closed("Int");
    let text = registry.closed("Text");
    let color = registry.closed("Color");
    let bar = registry.open("Bar");
    registry.mark_invalid(registry.instance(bar, reference));
    registry.mark_invalid(registry.instance(bar, numeric));
    let list = registry.set_candidates(bar, &[int, text, color]);
    registry.mark_unsupported(list[0]);

    let engine = engine(&registry);
    let chosen = engine
        .resolve_argument(bar, &mut PassReport::new())
        .expect("resolved");

    // `color` would also validate but ranks lower.
    assert_eq!(chosen.source, ArgumentSource::Candidate(1));
    assert_eq!(chosen.instantiation, list[1]);
}

#[test]
fn test_candidate_validity_error_is_recovered() {
    let (mut registry, reference, numeric) = MockRegistry::with_placeholders();
    let int = registry.closed("Int");
    let text = registry.closed("Text");
    let bar = registry.open("Bar");
    registry.fail_instantiation(bar, reference);
    registry.fail_instantiation(bar, numeric);
    let list = registry.set_candidates(bar, &[int, text]);
    registry.mark_validity_error(list[0]);

    let engine = engine(&registry);
    let mut report = PassReport::new();
    let chosen = engine.resolve_argument(bar, &mut report).expect("resolved");

    assert_eq!(chosen.instantiation, list[1]);
    assert_eq!(report.rejected_candidates, 3);
    assert!(report.unresolved.is_empty());
}

#[test]
fn test_unresolved_type_is_reported() {
    let (mut registry, reference, numeric) = MockRegistry::with_placeholders();
    let bar = registry.open("Bar");
    registry.fail_instantiation(bar, reference);
    registry.fail_instantiation(bar, numeric);

    let engine = engine(&registry);
    let mut report = PassReport::new();
    assert!(engine.resolve_argument(bar, &mut report).is_none());
    assert_eq!(report.unresolved, vec![bar]);
    assert_eq!(
        report.diagnostics.last().map(|d| d.code),
        Some(gendump_common::diagnostic_codes::NO_VALID_ARGUMENT)
    );
}

#[test]
fn test_multi_parameter_type_falls_back_to_candidates() {
    let (mut registry, _, _) = MockRegistry::with_placeholders();
    let pair = registry.open_with_arity("Pair", 2);
    let closed_pair = registry.closed("Pair<Int, Int>");
    registry.set_candidate_list(pair, vec![closed_pair]);

    let engine = engine(&registry);
    let mut report = PassReport::new();
    let chosen = engine.resolve_argument(pair, &mut report).expect("resolved");

    assert_eq!(chosen.source, ArgumentSource::Candidate(0));
    assert_eq!(chosen.instantiation, closed_pair);
    // Both placeholders hit an arity mismatch.
    assert_eq!(report.rejected_candidates, 2);
}

#[test]
fn test_valid_candidates_skip_supported_check_by_default() {
    let (mut registry, _, _) = MockRegistry::with_placeholders();
    let int = registry.closed("Int");
    let text = registry.closed("Text");
    let color = registry.closed("Color");
    let bar = registry.open("Bar");
    let list = registry.set_candidates(bar, &[int, text, color]);
    registry.mark_unsupported(list[0]);
    registry.mark_invalid(list[1]);

    let engine = engine(&registry);
    let valid = engine.valid_candidates(bar, &mut PassReport::new());
    assert_eq!(
        valid,
        vec![
            ValidCandidate {
                rank: 0,
                instantiation: list[0]
            },
            ValidCandidate {
                rank: 2,
                instantiation: list[2]
            },
        ]
    );
}

#[test]
fn test_valid_candidates_can_require_supported() {
    let (mut registry, _, _) = MockRegistry::with_placeholders();
    let int = registry.closed("Int");
    let text = registry.closed("Text");
    let bar = registry.open("Bar");
    let list = registry.set_candidates(bar, &[int, text]);
    registry.mark_unsupported(list[0]);

    let policy = ResolutionPolicy {
        diagnostic_requires_supported: true,
        ..ResolutionPolicy::default()
    };
    let engine = ResolutionEngine::new(&registry, policy).unwrap();
    let valid = engine.valid_candidates(bar, &mut PassReport::new());
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].instantiation, list[1]);
}

#[test]
fn test_valid_candidates_drop_duplicates() {
    let (mut registry, _, _) = MockRegistry::with_placeholders();
    let int = registry.closed("Int");
    let text = registry.closed("Text");
    let bar = registry.open("Bar");
    let list = registry.set_candidates(bar, &[int, text, int]);

    let engine = engine(&registry);
    let valid: Vec<TypeId> = engine
        .valid_candidates(bar, &mut PassReport::new())
        .into_iter()
        .map(|c| c.instantiation)
        .collect();
    assert_eq!(valid, vec![list[0], list[1]]);
}

#[test]
fn test_prioritized_entries_sort_by_name_length_stably() {
    let (mut registry, _, _) = MockRegistry::with_placeholders();
    let long = registry.closed("Longest");
    let b = registry.closed("Bb");
    let a = registry.closed("Aa");
    let open = registry.open("X"); // "X`1"
    let tree = CategoryTree::build([("N/Sub", long), ("N/Sub", b), ("N", a), ("N", open)]);

    let engine = engine(&registry);
    let entries = engine.prioritized_entries(tree.subcategory("N"), &[]);
    let order: Vec<TypeId> = entries.iter().map(|e| e.ty).collect();
    assert_eq!(order, vec![b, a, open, long]);
}

#[test]
fn test_resolve_entries_leaves_closed_types_unchosen() {
    let (mut registry, reference, _) = MockRegistry::with_placeholders();
    let foo = registry.closed("Foo");
    let bar = registry.open("Bar");
    let entries = [FlatEntry::new(foo, false), FlatEntry::new(bar, true)];

    let engine = engine(&registry);
    let resolved = engine.resolve_entries(&entries, &mut PassReport::new());
    assert_eq!(resolved[0].chosen, None);
    assert_eq!(resolved[0].encodable(), Some(foo));
    assert_eq!(resolved[1].encodable(), Some(registry.instance(bar, reference)));
}
