//! Per-invocation pass state
//!
//! Everything one traversal accumulates lives here and is dropped with it,
//! so concurrent invocations never share mutable state.

use crate::config::TransformConfig;
use crate::errors::{Result, TransformError};
use crate::shared::models::{Decorator, Expr};
use crate::shared::ScopeStack;

/// Expressions referring to the target package through the generated
/// namespace identifier
#[derive(Debug, Clone)]
pub struct TargetRefs {
    pub namespace: String,
    pub async_adapter: Expr,
    pub await_adapter: Expr,
    pub flow_decorator: Decorator,
    pub identity: Expr,
}

impl TargetRefs {
    pub fn new(namespace: &str, config: &TransformConfig) -> Self {
        let ns = || Expr::ident(namespace);
        Self {
            namespace: namespace.to_string(),
            async_adapter: Expr::member(ns(), &config.async_adapter),
            await_adapter: Expr::member(ns(), &config.await_adapter),
            flow_decorator: Decorator::new(Expr::member(ns(), &config.flow_annotation)),
            identity: Expr::member(ns(), &config.identity_annotation),
        }
    }
}

/// Accumulator threaded through one traversal
#[derive(Debug, Default)]
pub struct PassContext {
    rewritten: bool,
    rewrite_count: usize,
    classes: ScopeStack,
    /// Per enclosing class: properties whose wrapper call was converted and
    /// which still need the flow annotation
    pending_flow_properties: Vec<Vec<String>>,
}

impl PassContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a structural match fired
    pub fn mark_rewritten(&mut self) {
        self.rewritten = true;
        self.rewrite_count += 1;
    }

    pub fn is_rewritten(&self) -> bool {
        self.rewritten
    }

    pub fn rewrite_count(&self) -> usize {
        self.rewrite_count
    }

    pub fn enter_class(&mut self, name: &str) {
        self.classes.push(name);
        self.pending_flow_properties.push(Vec::new());
    }

    /// Leave the innermost class, handing back its pending property names
    pub fn exit_class(&mut self) -> Vec<String> {
        self.classes.pop();
        self.pending_flow_properties.pop().unwrap_or_default()
    }

    /// Innermost enclosing class name, "" if anonymous or none
    pub fn current_class_name(&self) -> &str {
        self.classes.current_or_empty()
    }

    pub fn record_flow_property(&mut self, name: &str) -> Result<()> {
        match self.pending_flow_properties.last_mut() {
            Some(pending) => {
                pending.push(name.to_string());
                Ok(())
            }
            None => Err(TransformError::contract_violation(format!(
                "property '{name}' was converted outside of any class declaration"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_refs_are_rooted_at_namespace() {
        let refs = TargetRefs::new("mobx_keystone_1", &TransformConfig::default());
        assert_eq!(
            refs.async_adapter,
            Expr::member(Expr::ident("mobx_keystone_1"), "_async")
        );
        assert_eq!(refs.flow_decorator.name(), Some("modelFlow"));
        assert_eq!(refs.identity.reference_name(), Some("model"));
    }

    #[test]
    fn test_class_frames_track_pending_properties() {
        let mut ctx = PassContext::new();
        ctx.enter_class("Outer");
        ctx.record_flow_property("a").unwrap();
        ctx.enter_class("Inner");
        assert_eq!(ctx.current_class_name(), "Inner");
        ctx.record_flow_property("b").unwrap();
        assert_eq!(ctx.exit_class(), vec!["b".to_string()]);
        assert_eq!(ctx.current_class_name(), "Outer");
        assert_eq!(ctx.exit_class(), vec!["a".to_string()]);
        assert_eq!(ctx.current_class_name(), "");
    }

    #[test]
    fn test_recording_outside_class_is_contract_violation() {
        let mut ctx = PassContext::new();
        assert!(matches!(
            ctx.record_flow_property("fn"),
            Err(TransformError::ContractViolation(_))
        ));
    }

    #[test]
    fn test_rewritten_flag() {
        let mut ctx = PassContext::new();
        assert!(!ctx.is_rewritten());
        ctx.mark_rewritten();
        ctx.mark_rewritten();
        assert!(ctx.is_rewritten());
        assert_eq!(ctx.rewrite_count(), 2);
    }
}
