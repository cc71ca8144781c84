//! Class Identity Rewriter
//!
//! `@autoModel class Test {}` → `@ns.model("<identity>") class Test {}`

use crate::shared::models::{Decorator, Expr, Modifier};

/// Replace the class trigger decorator with the identity decorator
///
/// Returns `None` when no decorator is named exactly `trigger`. The
/// identity decorator takes the position of the first removed trigger;
/// `identity_name` is only invoked when the trigger is present.
pub fn rewrite_class_identity(
    modifiers: &[Modifier],
    trigger: &str,
    identity: &Expr,
    identity_name: impl FnOnce() -> String,
) -> Option<Vec<Modifier>> {
    let position = modifiers.iter().position(|m| m.is_decorator_named(trigger))?;
    let name = identity_name();

    let mut rewritten: Vec<Modifier> = modifiers
        .iter()
        .filter(|m| !m.is_decorator_named(trigger))
        .cloned()
        .collect();
    let annotation = Decorator::new(Expr::call(identity.clone(), vec![Expr::string(&name)]));
    rewritten.insert(position, Modifier::Decorator(annotation));

    Some(rewritten)
}
