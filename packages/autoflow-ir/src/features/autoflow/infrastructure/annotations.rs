//! Annotation Normalizer
//!
//! Drops the trigger decorator and the async qualifier from a declaration's
//! annotation/qualifier list and makes sure the flow decorator is present.

use crate::shared::models::{Decorator, Modifier, ModifierKeyword};

/// Whether the list carries a decorator named exactly `trigger`
pub fn has_trigger(modifiers: &[Modifier], trigger: &str) -> bool {
    modifiers.iter().any(|m| m.is_decorator_named(trigger))
}

/// Normalize an annotation/qualifier list
///
/// The flow decorator is inserted first when no decorator of the same name
/// is present; other entries keep their relative order. Idempotent.
pub fn normalize_modifiers(
    modifiers: &[Modifier],
    trigger: &str,
    flow_decorator: &Decorator,
) -> Vec<Modifier> {
    let mut normalized: Vec<Modifier> = modifiers
        .iter()
        .filter(|m| !m.is_keyword(ModifierKeyword::Async) && !m.is_decorator_named(trigger))
        .cloned()
        .collect();

    let already_present = match flow_decorator.name() {
        Some(flow_name) => normalized.iter().any(|m| m.is_decorator_named(flow_name)),
        None => normalized
            .iter()
            .any(|m| m.as_decorator() == Some(flow_decorator)),
    };
    if !already_present {
        normalized.insert(0, Modifier::Decorator(flow_decorator.clone()));
    }

    normalized
}
