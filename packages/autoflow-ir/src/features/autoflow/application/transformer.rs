//! Pass Coordinator
//!
//! One [`AutoflowTransformer::transform`] call runs one traversal over one
//! source unit:
//!
//! ```text
//! Init ──▶ Scanning ──┬──▶ Rewritten   (working copy, import kept)
//!                     └──▶ Unchanged   (caller's unit, same Arc)
//! ```
//!
//! `Init` reserves the namespace identifier, builds the target-package
//! references and prepends the import to a working copy. `Scanning` folds
//! every top-level statement, trying per class member, in order:
//!
//! 1. property initialized with `autoFlow(async ... )`
//! 2. `@autoFlow async method() {}` (turned into a property first)
//! 3. `@autoFlow prop = async ... `
//!
//! Class identity triggers are handled before the members are visited.

use std::sync::Arc;

use crate::config::{TransformConfig, Validatable};
use crate::errors::{Result, TransformError};
use crate::features::autoflow::domain::fold::{walk_function, walk_member, Fold};
use crate::features::autoflow::domain::{
    AsyncQualifierProbe, PassContext, SyntaxFlagProbe, TargetRefs,
};
use crate::features::autoflow::infrastructure::{
    has_trigger, namespace_import, normalize_modifiers, prepend_import, reserve_generated_identifier,
    rewrite_class_identity, rewrite_suspensions, wrap_in_async_adapter,
};
use crate::shared::models::{
    ClassDecl, ClassMember, Expr, Function, FunctionBody, FunctionKind, MethodDecl, MethodKind,
    ModifierKeyword, PropertyDecl, PropertyMarker, SourceUnit,
};

use super::options::TransformOptions;

/// Terminal state of one pass
#[derive(Debug, Clone)]
pub enum TransformOutcome {
    /// At least one rewrite fired; the unit starts with the namespace import
    Rewritten(Arc<SourceUnit>),
    /// Nothing matched; the caller's own unit, not a copy
    Unchanged(Arc<SourceUnit>),
}

impl TransformOutcome {
    pub fn is_rewritten(&self) -> bool {
        matches!(self, TransformOutcome::Rewritten(_))
    }

    pub fn unit(&self) -> &Arc<SourceUnit> {
        match self {
            TransformOutcome::Rewritten(unit) | TransformOutcome::Unchanged(unit) => unit,
        }
    }

    pub fn into_unit(self) -> Arc<SourceUnit> {
        match self {
            TransformOutcome::Rewritten(unit) | TransformOutcome::Unchanged(unit) => unit,
        }
    }
}

/// Rewrites source units; holds no per-unit state and is shared freely
/// across threads
pub struct AutoflowTransformer {
    options: TransformOptions,
    probe: Option<Arc<dyn AsyncQualifierProbe>>,
}

impl AutoflowTransformer {
    /// Transformer using the parser's async flag as the qualifier probe
    pub fn new(options: TransformOptions) -> Result<Self> {
        Self::with_probe(options, Some(Arc::new(SyntaxFlagProbe)))
    }

    /// Transformer with a host-supplied probe
    ///
    /// `None` is accepted here and reported by the first `transform` call.
    pub fn with_probe(
        options: TransformOptions,
        probe: Option<Arc<dyn AsyncQualifierProbe>>,
    ) -> Result<Self> {
        options.config.validate()?;
        Ok(Self { options, probe })
    }

    pub fn config(&self) -> &TransformConfig {
        &self.options.config
    }

    pub fn transform(&self, unit: &Arc<SourceUnit>) -> Result<TransformOutcome> {
        let probe = self.probe.as_deref().ok_or_else(|| {
            TransformError::capability_unavailable(
                "host cannot detect the async qualifier of a function value",
            )
        })?;
        let config = &self.options.config;

        // Init
        let namespace = reserve_generated_identifier(unit, &config.target_package_name);
        let targets = TargetRefs::new(&namespace, config);
        let working = prepend_import(
            &unit.statements,
            namespace_import(&namespace, &config.target_package_name),
        );

        // Scanning
        let mut pass = AutoflowPass {
            ctx: PassContext::new(),
            config,
            options: &self.options,
            probe,
            targets: &targets,
            file_name: &unit.file_name,
        };
        let statements = working
            .iter()
            .map(|stmt| pass.fold_stmt(stmt))
            .collect::<Result<Vec<_>>>()?;

        if !pass.ctx.is_rewritten() {
            debug!("{}: no autoflow triggers, unit left unchanged", unit.file_name);
            return Ok(TransformOutcome::Unchanged(Arc::clone(unit)));
        }

        info!(
            "{}: {} rewrite(s), namespace import bound to {}",
            unit.file_name,
            pass.ctx.rewrite_count(),
            namespace
        );
        Ok(TransformOutcome::Rewritten(Arc::new(
            unit.with_statements(statements),
        )))
    }
}

/// Build the per-unit transform function
///
/// Fails only if the configuration is invalid; the returned function
/// raises on contract violations instead of returning the input.
pub fn create_transformer(
    options: Option<TransformOptions>,
) -> Result<impl Fn(&Arc<SourceUnit>) -> Result<Arc<SourceUnit>> + Send + Sync> {
    let transformer = AutoflowTransformer::new(options.unwrap_or_default())?;
    Ok(move |unit: &Arc<SourceUnit>| {
        transformer
            .transform(unit)
            .map(TransformOutcome::into_unit)
    })
}

/// The traversal itself; lives for exactly one `transform` call
struct AutoflowPass<'a> {
    ctx: PassContext,
    config: &'a TransformConfig,
    options: &'a TransformOptions,
    probe: &'a dyn AsyncQualifierProbe,
    targets: &'a TargetRefs,
    file_name: &'a str,
}

impl AutoflowPass<'_> {
    /// Sole argument of a trigger wrapper call and the async function value
    /// inside it, if it is one
    fn wrapped_flow<'e>(&self, init: Option<&'e Expr>) -> Option<(&'e Expr, &'e Arc<Function>)> {
        let Some(Expr::Call(call)) = init.map(Expr::without_comments) else {
            return None;
        };
        let is_trigger = match &call.callee {
            Expr::Ident(name) => *name == self.config.flow_trigger,
            Expr::Member(member) => member.property == self.config.flow_trigger,
            _ => false,
        };
        if !is_trigger || call.args.len() != 1 {
            return None;
        }
        let argument = &call.args[0];
        argument
            .without_comments()
            .as_function()
            .filter(|f| self.is_async_value(f))
            .map(|function| (argument, function))
    }

    fn is_async_value(&self, function: &Function) -> bool {
        function.is_value() && self.probe.detect_async_qualifier(function)
    }

    /// `async (...) => ...` → `_async(function* (this: C, ...) { ... })`
    fn convert(&mut self, function: &Arc<Function>) -> Result<Expr> {
        // Classes nested in the body still get their own rewrites
        let visited = walk_function(self, function)?;
        let generator = rewrite_suspensions(&visited, self.probe, &self.targets.await_adapter)?;
        Ok(wrap_in_async_adapter(
            generator,
            &self.targets.async_adapter,
            self.ctx.current_class_name(),
        ))
    }

    fn convert_property(&mut self, prop: &PropertyDecl, function: &Arc<Function>) -> Result<PropertyDecl> {
        let converted = self.convert(function)?;
        let init = match &prop.init {
            Some(original) => original.replace_commented(converted),
            None => converted,
        };
        let modifiers = self.fold_modifiers(&prop.modifiers)?;
        self.ctx.mark_rewritten();
        debug!(
            "converted {}.{} to a flow",
            self.ctx.current_class_name(),
            prop.name
        );
        Ok(PropertyDecl {
            modifiers,
            init: Some(init),
            ..prop.clone()
        })
    }

    /// Property equivalent of `@autoFlow async name(...) { ... }`, if it is one
    fn method_as_property(&self, method: &MethodDecl) -> Option<PropertyDecl> {
        let eligible = method.kind == MethodKind::Method
            && !method.is_generator
            && has_trigger(&method.modifiers, &self.config.flow_trigger)
            && method.modifiers.iter().any(|m| m.is_keyword(ModifierKeyword::Async));
        if !eligible {
            return None;
        }
        let body = method.body.as_ref()?;

        let function = Function {
            kind: FunctionKind::Expression,
            name: None,
            is_async: true,
            is_generator: false,
            type_params: method.type_params.clone(),
            params: Arc::clone(&method.params),
            return_type: method.return_type.clone(),
            body: FunctionBody::Block(Arc::clone(body)),
        };
        Some(PropertyDecl {
            modifiers: method.modifiers.clone(),
            name: method.name.clone(),
            marker: if method.optional {
                PropertyMarker::Optional
            } else {
                PropertyMarker::None
            },
            type_ann: None,
            init: Some(Expr::Function(Arc::new(function))),
        })
    }

    /// Annotate properties converted from a wrapper call in the class just left
    fn annotate_pending(&self, members: &mut [ClassMember], pending: Vec<String>) -> Result<()> {
        for name in pending {
            let slot = members.iter_mut().find_map(|member| match member {
                ClassMember::Property(prop) if prop.name == name => Some(prop),
                _ => None,
            });
            let Some(prop) = slot else {
                return Err(TransformError::contract_violation(format!(
                    "converted flow property '{name}' not found in its class"
                )));
            };
            let modifiers = normalize_modifiers(
                &prop.modifiers,
                &self.config.flow_trigger,
                &self.targets.flow_decorator,
            );
            *prop = Arc::new(PropertyDecl {
                modifiers,
                ..(**prop).clone()
            });
        }
        Ok(())
    }
}

impl Fold for AutoflowPass<'_> {
    fn fold_class(&mut self, class: &Arc<ClassDecl>) -> Result<Arc<ClassDecl>> {
        let identity = rewrite_class_identity(
            &class.modifiers,
            &self.config.model_trigger,
            &self.targets.identity,
            || self.options.identity_name_for(self.file_name),
        );
        let modifiers = match identity {
            Some(rewritten) => {
                self.ctx.mark_rewritten();
                debug!("class {} gets an identity annotation", class.name_or_empty());
                rewritten
            }
            None => class.modifiers.clone(),
        };
        let modifiers = self.fold_modifiers(&modifiers)?;

        self.ctx.enter_class(class.name_or_empty());
        let members = class
            .members
            .iter()
            .map(|member| self.fold_member(member))
            .collect::<Result<Vec<_>>>();
        let pending = self.ctx.exit_class();
        let mut members = members?;
        self.annotate_pending(&mut members, pending)?;

        Ok(Arc::new(ClassDecl {
            modifiers,
            name: class.name.clone(),
            type_params: class.type_params.clone(),
            heritage: class.heritage.clone(),
            members: members.into(),
        }))
    }

    fn fold_member(&mut self, member: &ClassMember) -> Result<ClassMember> {
        match member {
            ClassMember::Property(prop) => {
                if let Some((argument, function)) = self.wrapped_flow(prop.init.as_ref()) {
                    let mut converted = self.convert_property(prop, function)?;
                    converted.init = converted.init.map(|init| argument.replace_commented(init));
                    self.ctx.record_flow_property(&prop.name)?;
                    return Ok(ClassMember::Property(Arc::new(converted)));
                }
                if has_trigger(&prop.modifiers, &self.config.flow_trigger) {
                    let function = prop
                        .init
                        .as_ref()
                        .map(Expr::without_comments)
                        .and_then(Expr::as_function)
                        .filter(|f| self.is_async_value(f));
                    if let Some(function) = function {
                        return self.annotated_flow(prop, function);
                    }
                }
                walk_member(self, member)
            }
            ClassMember::Method(method) => match self.method_as_property(method) {
                Some(prop) => {
                    let function = prop.init.as_ref().and_then(Expr::as_function).cloned();
                    match function.filter(|f| self.is_async_value(f)) {
                        Some(function) => self.annotated_flow(&prop, &function),
                        None => walk_member(self, member),
                    }
                }
                None => walk_member(self, member),
            },
            ClassMember::Verbatim(_) => walk_member(self, member),
        }
    }
}

impl AutoflowPass<'_> {
    /// Forms driven by the trigger decorator: convert, then normalize in place
    fn annotated_flow(&mut self, prop: &PropertyDecl, function: &Arc<Function>) -> Result<ClassMember> {
        let converted = self.convert_property(prop, function)?;
        let modifiers = normalize_modifiers(
            &converted.modifiers,
            &self.config.flow_trigger,
            &self.targets.flow_decorator,
        );
        Ok(ClassMember::Property(Arc::new(PropertyDecl {
            modifiers,
            ..converted
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::shared::models::{Decorator, Modifier, Param, Stmt};

    fn awaited(expr: Expr) -> Expr {
        Expr::Await(Arc::new(expr))
    }

    fn async_arrow(params: Vec<Param>, body: FunctionBody) -> Expr {
        Expr::Function(Arc::new(Function {
            kind: FunctionKind::Arrow,
            name: None,
            is_async: true,
            is_generator: false,
            type_params: None,
            params: params.into(),
            return_type: None,
            body,
        }))
    }

    fn property(modifiers: Vec<Modifier>, name: &str, init: Expr) -> ClassMember {
        ClassMember::Property(Arc::new(PropertyDecl {
            modifiers,
            name: name.to_string(),
            marker: PropertyMarker::None,
            type_ann: None,
            init: Some(init),
        }))
    }

    fn class(modifiers: Vec<Modifier>, name: &str, members: Vec<ClassMember>) -> Stmt {
        Stmt::Class(Arc::new(ClassDecl {
            modifiers,
            name: Some(name.to_string()),
            type_params: None,
            heritage: None,
            members: members.into(),
        }))
    }

    fn decorator(name: &str) -> Modifier {
        Modifier::Decorator(Decorator::new(Expr::ident(name)))
    }

    fn unit(statements: Vec<Stmt>) -> Arc<SourceUnit> {
        Arc::new(SourceUnit::new("x.ts", statements))
    }

    fn wrapped_call_unit() -> Arc<SourceUnit> {
        let call_api = Expr::call(Expr::ident("callApi"), vec![Expr::ident("input")]);
        let flow = async_arrow(vec![Param::named("input")], FunctionBody::Expr(awaited(call_api)));
        unit(vec![class(
            vec![],
            "Test",
            vec![property(vec![], "fn", Expr::call(Expr::ident("autoFlow"), vec![flow]))],
        )])
    }

    fn first_property(unit: &SourceUnit) -> Arc<PropertyDecl> {
        let Stmt::Class(class) = &unit.statements[1] else {
            panic!("expected class after the import");
        };
        match &class.members[0] {
            ClassMember::Property(prop) => Arc::clone(prop),
            other => panic!("expected property, got {other:?}"),
        }
    }

    #[test]
    fn test_unit_without_triggers_is_returned_as_is() {
        let input = unit(vec![class(vec![decorator("observable")], "Plain", vec![])]);
        let transformer = AutoflowTransformer::new(TransformOptions::default()).unwrap();

        let outcome = transformer.transform(&input).unwrap();

        assert!(!outcome.is_rewritten());
        assert!(Arc::ptr_eq(outcome.unit(), &input));
    }

    #[test]
    fn test_wrapper_call_is_converted_and_annotated() {
        let transformer = AutoflowTransformer::new(TransformOptions::default()).unwrap();
        let outcome = transformer.transform(&wrapped_call_unit()).unwrap();
        assert!(outcome.is_rewritten());

        let unit = outcome.into_unit();
        assert!(matches!(&unit.statements[0], Stmt::Import(import) if import.source == "mobx-keystone"));

        let prop = first_property(&unit);
        assert_eq!(prop.modifiers.len(), 1);
        assert!(prop.modifiers[0].is_decorator_named("modelFlow"));

        let Some(Expr::Call(call)) = &prop.init else {
            panic!("expected adapter call");
        };
        assert_eq!(call.callee.reference_name(), Some("_async"));
        let function = call.args[0].as_function().unwrap();
        assert!(function.is_generator);
        assert!(!function.is_async);
        assert_eq!(function.params[0].type_ann.as_deref(), Some("Test"));
        assert_eq!(function.params[1].pattern, "input");
    }

    #[test]
    fn test_annotated_async_method_becomes_property() {
        let method = ClassMember::Method(Arc::new(MethodDecl {
            modifiers: vec![decorator("autoFlow"), Modifier::Keyword(ModifierKeyword::Async)],
            kind: MethodKind::Method,
            name: "load".to_string(),
            is_generator: false,
            optional: false,
            type_params: None,
            params: vec![Param::named("id")].into(),
            return_type: Some("Promise<void>".to_string()),
            body: Some(vec![Stmt::Expr(awaited(Expr::ident("id")))].into()),
        }));
        let input = unit(vec![class(vec![], "Store", vec![method])]);
        let transformer = AutoflowTransformer::new(TransformOptions::default()).unwrap();

        let output = transformer.transform(&input).unwrap().into_unit();
        let prop = first_property(&output);

        assert_eq!(prop.name, "load");
        assert_eq!(prop.modifiers.len(), 1);
        assert!(prop.modifiers[0].is_decorator_named("modelFlow"));
    }

    #[test]
    fn test_non_function_wrapper_argument_is_left_alone() {
        let input = unit(vec![class(
            vec![],
            "Test",
            vec![property(
                vec![],
                "fn",
                Expr::call(Expr::ident("autoFlow"), vec![Expr::ident("handler")]),
            )],
        )]);
        let transformer = AutoflowTransformer::new(TransformOptions::default()).unwrap();
        assert!(!transformer.transform(&input).unwrap().is_rewritten());
    }

    #[test]
    fn test_missing_probe_fails_on_first_use() {
        let transformer = AutoflowTransformer::with_probe(TransformOptions::default(), None).unwrap();
        let err = transformer.transform(&wrapped_call_unit()).unwrap_err();
        assert!(matches!(err, TransformError::CapabilityUnavailable(_)));
    }

    #[test]
    fn test_probe_decides_what_is_async() {
        let never: Arc<dyn AsyncQualifierProbe> = Arc::new(|_: &Function| false);
        let transformer =
            AutoflowTransformer::with_probe(TransformOptions::default(), Some(never)).unwrap();
        assert!(!transformer.transform(&wrapped_call_unit()).unwrap().is_rewritten());
    }

    #[test]
    fn test_class_identity_uses_namer() {
        let input = unit(vec![class(vec![decorator("autoModel")], "Test", vec![])]);
        let options = TransformOptions::default().identity_name_from_path(|p| p.to_uppercase());
        let transformer = AutoflowTransformer::new(options).unwrap();

        let output = transformer.transform(&input).unwrap().into_unit();
        let Stmt::Class(class) = &output.statements[1] else {
            panic!("expected class");
        };
        let Some(Modifier::Decorator(identity)) = class.modifiers.first() else {
            panic!("expected identity decorator");
        };
        let Expr::Call(call) = &identity.expr else {
            panic!("expected identity call");
        };
        assert_eq!(identity.name(), Some("model"));
        assert_eq!(&call.args[..], &[Expr::string("X.TS")]);
    }

    #[test]
    fn test_invalid_config_is_rejected_at_construction() {
        let options = TransformOptions::default().target_package_name("");
        let result = AutoflowTransformer::new(options);
        assert!(matches!(
            result,
            Err(TransformError::Config(ConfigError::Empty(_)))
        ));
    }

    #[test]
    fn test_create_transformer_returns_plain_function() {
        let transform = create_transformer(None).unwrap();
        let input = unit(vec![]);
        let output = transform(&input).unwrap();
        assert!(Arc::ptr_eq(&output, &input));
    }
}
