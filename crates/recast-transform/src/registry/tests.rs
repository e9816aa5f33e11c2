//! Unit tests for the transformation registry.

use rstest::{fixture, rstest};

use super::*;
use crate::transformation::{Description, Quality, TransformationConfig, TransformationResult};

struct Fixed(&'static str);

impl Transformation for Fixed {
    fn description(&self) -> Description {
        Description::new(self.0, Quality::InDevelopment)
    }

    fn run(&self, _config: &TransformationConfig) -> TransformationResult {
        TransformationResult::new()
    }
}

#[fixture]
fn populated_registry() -> TransformationRegistry {
    let mut registry = TransformationRegistry::new();
    registry
        .register("extract", Fixed("Extract Function"))
        .expect("register extract");
    registry
        .register("inline", Fixed("Inline Variable"))
        .expect("register inline");
    registry
}

#[test]
fn new_registry_is_empty() {
    let registry = TransformationRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn builtins_include_rename_and_null() {
    let registry = TransformationRegistry::with_builtins();
    assert!(registry.contains("rename"));
    assert!(registry.contains("null"));
    assert_eq!(registry.len(), 2);
}

#[rstest]
fn lookup_returns_registered_transformation(populated_registry: TransformationRegistry) {
    let found = populated_registry.get("extract").expect("extract present");
    assert_eq!(found.description().name(), "Extract Function");
}

#[rstest]
fn lookup_of_unknown_name_is_none(populated_registry: TransformationRegistry) {
    assert!(populated_registry.get("missing").is_none());
    assert!(!populated_registry.contains("missing"));
}

#[rstest]
fn iteration_is_ordered_by_short_name(mut populated_registry: TransformationRegistry) {
    populated_registry
        .register("add-import", Fixed("Add Import"))
        .expect("register add-import");
    let names: Vec<_> = populated_registry.iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["add-import", "extract", "inline"]);
}

#[rstest]
fn duplicate_registration_is_rejected(mut populated_registry: TransformationRegistry) {
    let result = populated_registry.register("inline", Fixed("Other"));
    assert_eq!(
        result,
        Err(RegistryError::Duplicate {
            name: String::from("inline")
        })
    );
    assert_eq!(populated_registry.len(), 2);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_names_are_rejected(#[case] name: &str) {
    let mut registry = TransformationRegistry::new();
    assert_eq!(
        registry.register(name, Fixed("Blank")),
        Err(RegistryError::EmptyName)
    );
}

#[rstest]
fn debug_lists_short_names(populated_registry: TransformationRegistry) {
    assert_eq!(
        format!("{populated_registry:?}"),
        r#"{"extract", "inline"}"#
    );
}
