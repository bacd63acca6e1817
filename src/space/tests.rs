//! Tests for registry snapshots

use crate::error::{ErrorKind, SweepError};
use crate::space::{ParamValue, ParameterEntry, Registry};

// -------------------------------------------------------------------------
// Collapse
// -------------------------------------------------------------------------

#[test]
fn test_disabled_collapses_to_default() {
    let registry = Registry::new().with(ParameterEntry::new("batch_size", [9i64, 10, 11, 12]).disabled(10i64));
    let space = registry.snapshot().unwrap();
    let param = space.get("batch_size").unwrap();
    assert_eq!(param.candidates, vec![ParamValue::Int(10)]);
    assert!(!param.enabled);
}

#[test]
fn test_snapshot_leaves_registry_untouched() {
    let registry = Registry::new().with(ParameterEntry::new("batch_size", [9i64, 10]).disabled(10i64));
    let before = registry.clone();
    let first = registry.snapshot().unwrap();
    let second = registry.snapshot().unwrap();
    assert_eq!(registry, before);
    assert_eq!(first, second);
    assert_eq!(registry.get("batch_size").unwrap().candidates.len(), 2);
}

#[test]
fn test_falsy_defaults_are_present() {
    let registry = Registry::new()
        .with(ParameterEntry::new("a", [1i64, 2]).disabled(0i64))
        .with(ParameterEntry::new("b", [0.5, 1.5]).disabled(0.0))
        .with(ParameterEntry::new("c", [true, false]).disabled(false));
    let space = registry.snapshot().unwrap();
    assert_eq!(space.get("a").unwrap().candidates, vec![ParamValue::Int(0)]);
    assert_eq!(space.get("b").unwrap().candidates, vec![ParamValue::Float(0.0)]);
    assert_eq!(space.get("c").unwrap().candidates, vec![ParamValue::Bool(false)]);
}

#[test]
fn test_disabled_without_default_fails() {
    let registry = Registry::new().with(ParameterEntry::new("lr", [0.1, 0.01]).off());
    let err = registry.snapshot().unwrap_err();
    assert!(matches!(err, SweepError::MissingDefault { ref param } if param == "lr"));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_enabled_without_default_is_fine() {
    let registry = Registry::new().with(ParameterEntry::new("ebd_dm", [48i64]));
    assert!(registry.snapshot().is_ok());
}

#[test]
fn test_empty_candidates_fail() {
    let registry = Registry::new().with(ParameterEntry::new("x", Vec::<i64>::new()));
    assert!(matches!(registry.snapshot(), Err(SweepError::EmptyCandidates { .. })));
}

#[test]
fn test_duplicate_candidates_are_removed() {
    let registry = Registry::new().with(ParameterEntry::new("x", [1i64, 2, 1, 2, 3]));
    let space = registry.snapshot().unwrap();
    assert_eq!(space.get("x").unwrap().candidates.len(), 3);
}

#[test]
fn test_duplicate_names_fail() {
    let registry = Registry::new()
        .with(ParameterEntry::new("x", [1i64]))
        .with(ParameterEntry::new("x", [2i64]));
    assert!(matches!(registry.snapshot(), Err(SweepError::DuplicateParameter { .. })));
}

// -------------------------------------------------------------------------
// Dependency graph
// -------------------------------------------------------------------------

#[test]
fn test_unknown_dependency_fails() {
    let registry =
        Registry::new().with(ParameterEntry::new("dr", [0.5]).depends_on("conv_layer_n"));
    let err = registry.snapshot().unwrap_err();
    assert!(matches!(err, SweepError::UnknownDependency { ref reference, .. } if reference == "conv_layer_n"));
    assert_eq!(err.kind(), ErrorKind::DependencyOrder);
}

#[test]
fn test_self_dependency_is_a_cycle() {
    let registry = Registry::new().with(ParameterEntry::new("n", [1i64, 2]).depends_on("n"));
    match registry.snapshot() {
        Err(SweepError::DependencyCycle { params }) => assert_eq!(params, vec!["n", "n"]),
        other => panic!("expected cycle, got {other:?}"),
    }
}

#[test]
fn test_mutual_dependency_fails_on_first_forward_edge() {
    let registry = Registry::new()
        .with(ParameterEntry::new("a", [1i64]).depends_on("b"))
        .with(ParameterEntry::new("b", [1i64]).depends_on("a"));
    let err = registry.snapshot().unwrap_err();
    assert!(matches!(
        err,
        SweepError::ForwardDependency { ref param, ref reference } if param == "a" && reference == "b"
    ));
    assert_eq!(err.kind(), ErrorKind::DependencyOrder);
}

#[test]
fn test_forward_reference_is_rejected() {
    let registry = Registry::new()
        .with(ParameterEntry::new("dr", [0.5]).depends_on("n"))
        .with(ParameterEntry::new("lr", [0.1]))
        .with(ParameterEntry::new("n", [2i64, 3]));
    let err = registry.snapshot().unwrap_err();
    assert!(matches!(
        err,
        SweepError::ForwardDependency { ref param, ref reference } if param == "dr" && reference == "n"
    ));
    assert_eq!(err.kind(), ErrorKind::DependencyOrder);
}

#[test]
fn test_resolution_order_follows_declarations() {
    let registry = Registry::new()
        .with(ParameterEntry::new("n", [2i64, 3]))
        .with(ParameterEntry::new("lr", [0.1]))
        .with(ParameterEntry::new("dr", [0.5]).depends_on("n"));
    let space = registry.snapshot().unwrap();
    let order: Vec<&str> = space.order().iter().map(|&i| space.params()[i].name.as_str()).collect();
    assert_eq!(order, vec!["n", "lr", "dr"]);
}

#[test]
fn test_tuple_valued_source_is_rejected() {
    let registry = Registry::new()
        .with(ParameterEntry::new("n", [2i64]))
        .with(ParameterEntry::new("t", [1i64]).depends_on("n"))
        .with(ParameterEntry::new("u", [1i64]).depends_on("t"));
    assert!(matches!(registry.snapshot(), Err(SweepError::NonScalarSource { .. })));
}

#[test]
fn test_non_integer_source_is_rejected() {
    let registry = Registry::new()
        .with(ParameterEntry::new("n", [2.0, 3.0]))
        .with(ParameterEntry::new("t", [1i64]).depends_on("n"));
    assert!(matches!(registry.snapshot(), Err(SweepError::InvalidLength { .. })));

    let registry = Registry::new()
        .with(ParameterEntry::new("n", [-1i64, 2]))
        .with(ParameterEntry::new("t", [1i64]).depends_on("n"));
    assert!(matches!(registry.snapshot(), Err(SweepError::InvalidLength { .. })));
}

#[test]
fn test_offset_applies_to_tuple_len() {
    let registry = Registry::new()
        .with(ParameterEntry::new("conv_layer_n", [2i64, 3]).disabled(2i64))
        .with(ParameterEntry::new("l2_regs", [1e-4, 1e-5, 1e-6]).depends_on("conv_layer_n+2"));
    let space = registry.snapshot().unwrap();
    let l2 = space.get("l2_regs").unwrap();
    assert_eq!(space.tuple_len(l2, &ParamValue::Int(2)).unwrap(), 4);
    assert_eq!(space.length_sources(), vec![0]);
}

#[test]
fn test_malformed_expression_fails() {
    let registry = Registry::new()
        .with(ParameterEntry::new("n", [2i64]))
        .with(ParameterEntry::new("t", [1i64]).depends_on("n+two"));
    assert!(matches!(registry.snapshot(), Err(SweepError::InvalidDependency { .. })));
}
