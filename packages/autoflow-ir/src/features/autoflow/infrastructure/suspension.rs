//! Suspension Rewriter
//!
//! Turns one async function value into a generator: every `await E` of its
//! own body becomes `yield* <await_adapter>(E)`. Nested function-like
//! nodes are separate coroutines and are copied through untouched.

use std::sync::Arc;

use crate::errors::{Result, TransformError};
use crate::features::autoflow::domain::fold::{fold_stmts, walk_expr, walk_verbatim, Fold};
use crate::features::autoflow::domain::AsyncQualifierProbe;
use crate::shared::models::{ClassDecl, Expr, Function, FunctionBody, Verbatim};

struct SuspensionFolder<'a> {
    await_adapter: &'a Expr,
    converted: usize,
}

impl Fold for SuspensionFolder<'_> {
    fn fold_expr(&mut self, expr: &Expr) -> Result<Expr> {
        match expr {
            Expr::Await(arg) => {
                // `await await x` converts inside out
                let arg = self.fold_expr(arg)?;
                self.converted += 1;
                Ok(Expr::yield_delegate(Expr::call(
                    self.await_adapter.clone(),
                    vec![arg],
                )))
            }
            _ => walk_expr(self, expr),
        }
    }

    fn fold_function(&mut self, function: &Arc<Function>) -> Result<Arc<Function>> {
        Ok(Arc::clone(function))
    }

    fn fold_class(&mut self, class: &Arc<ClassDecl>) -> Result<Arc<ClassDecl>> {
        Ok(Arc::clone(class))
    }

    fn fold_verbatim(&mut self, verbatim: &Verbatim) -> Result<Verbatim> {
        if verbatim.is_function_boundary() {
            return Ok(verbatim.clone());
        }
        walk_verbatim(self, verbatim)
    }
}

/// Convert an async function value into a generator function value
///
/// Fails with a contract violation when `function` is not async-qualified:
/// the caller's matcher should never have selected it.
pub fn rewrite_suspensions(
    function: &Function,
    probe: &dyn AsyncQualifierProbe,
    await_adapter: &Expr,
) -> Result<Function> {
    if !probe.detect_async_qualifier(function) {
        return Err(TransformError::contract_violation(format!(
            "suspension rewrite invoked on a function without the async qualifier ({})",
            function.name.as_deref().unwrap_or("<anonymous>")
        )));
    }

    let mut folder = SuspensionFolder {
        await_adapter,
        converted: 0,
    };
    let body = match &function.body {
        FunctionBody::Block(stmts) => FunctionBody::Block(fold_stmts(&mut folder, stmts)?),
        FunctionBody::Expr(expr) => FunctionBody::Expr(folder.fold_expr(expr)?),
    };
    debug!(
        "converted {} suspension point(s) in {}",
        folder.converted,
        function.name.as_deref().unwrap_or("<anonymous>")
    );

    Ok(Function {
        is_async: false,
        is_generator: true,
        body,
        ..function.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::autoflow::domain::SyntaxFlagProbe;
    use crate::shared::models::{FunctionKind, Param, Stmt, VerbatimPart};

    fn adapter() -> Expr {
        Expr::member(Expr::ident("mk"), "_await")
    }

    fn awaited(expr: Expr) -> Expr {
        Expr::Await(Arc::new(expr))
    }

    fn converted(expr: Expr) -> Expr {
        Expr::yield_delegate(Expr::call(adapter(), vec![expr]))
    }

    fn arrow(is_async: bool, body: FunctionBody) -> Function {
        Function {
            kind: FunctionKind::Arrow,
            name: None,
            is_async,
            is_generator: false,
            type_params: None,
            params: vec![Param::named("input")].into(),
            return_type: None,
            body,
        }
    }

    #[test]
    fn test_await_becomes_delegated_yield() {
        let call = Expr::call(Expr::ident("callApi"), vec![Expr::ident("input")]);
        let function = arrow(
            true,
            FunctionBody::Block(vec![Stmt::Return(Some(awaited(call.clone())))].into()),
        );

        let result = rewrite_suspensions(&function, &SyntaxFlagProbe, &adapter()).unwrap();

        assert!(!result.is_async);
        assert!(result.is_generator);
        assert_eq!(
            result.body,
            FunctionBody::Block(vec![Stmt::Return(Some(converted(call)))].into())
        );
        assert_eq!(result.params, function.params);
    }

    #[test]
    fn test_nested_awaits_convert_inside_out() {
        let function = arrow(
            true,
            FunctionBody::Expr(awaited(awaited(Expr::ident("x")))),
        );
        let result = rewrite_suspensions(&function, &SyntaxFlagProbe, &adapter()).unwrap();
        assert_eq!(
            result.body,
            FunctionBody::Expr(converted(converted(Expr::ident("x"))))
        );
    }

    #[test]
    fn test_nested_function_is_left_untouched() {
        let nested = Expr::Function(Arc::new(arrow(
            true,
            FunctionBody::Expr(awaited(Expr::ident("inner"))),
        )));
        let body = FunctionBody::Block(
            vec![
                Stmt::Expr(nested.clone()),
                Stmt::Expr(awaited(Expr::ident("outer"))),
            ]
            .into(),
        );
        let function = arrow(true, body);

        let result = rewrite_suspensions(&function, &SyntaxFlagProbe, &adapter()).unwrap();

        let FunctionBody::Block(stmts) = &result.body else {
            panic!("expected block body");
        };
        assert_eq!(stmts[0], Stmt::Expr(nested));
        assert_eq!(stmts[1], Stmt::Expr(converted(Expr::ident("outer"))));
    }

    #[test]
    fn test_object_literal_method_is_left_untouched() {
        let method = Verbatim {
            kind: "method_definition".to_string(),
            parts: vec![
                VerbatimPart::Text("async load() ".to_string()),
                VerbatimPart::Stmt(Stmt::Block(
                    vec![Stmt::Expr(awaited(Expr::ident("inner")))].into(),
                )),
            ],
        };
        let object = Expr::Verbatim(Arc::new(Verbatim {
            kind: "object".to_string(),
            parts: vec![
                VerbatimPart::Text("{ ".to_string()),
                VerbatimPart::Group(method),
                VerbatimPart::Text(", v: ".to_string()),
                VerbatimPart::Expr(awaited(Expr::ident("outer"))),
                VerbatimPart::Text(" }".to_string()),
            ],
        }));
        let function = arrow(true, FunctionBody::Expr(object.clone()));

        let result = rewrite_suspensions(&function, &SyntaxFlagProbe, &adapter()).unwrap();

        let FunctionBody::Expr(Expr::Verbatim(folded)) = &result.body else {
            panic!("expected verbatim body");
        };
        let Expr::Verbatim(original) = &object else {
            unreachable!()
        };
        assert_eq!(folded.parts[1], original.parts[1]);
        assert_eq!(
            folded.parts[3],
            VerbatimPart::Expr(converted(Expr::ident("outer")))
        );
    }

    #[test]
    fn test_class_expression_and_commented_await() {
        let class = Expr::Class(Arc::new(ClassDecl {
            modifiers: Vec::new(),
            name: None,
            type_params: None,
            heritage: None,
            members: vec![].into(),
        }));
        let commented = Expr::commented(&[], awaited(Expr::ident("x")), &["/* c */".to_string()]);
        let body = FunctionBody::Block(
            vec![Stmt::Expr(class.clone()), Stmt::Expr(commented)].into(),
        );

        let result = rewrite_suspensions(&arrow(true, body), &SyntaxFlagProbe, &adapter()).unwrap();

        let FunctionBody::Block(stmts) = &result.body else {
            panic!("expected block body");
        };
        assert_eq!(stmts[0], Stmt::Expr(class));
        let Stmt::Expr(folded) = &stmts[1] else {
            panic!("expected expression statement");
        };
        assert_eq!(folded.without_comments(), &converted(Expr::ident("x")));
    }

    #[test]
    fn test_verbatim_arrow_is_a_boundary() {
        let arrow_text = Verbatim {
            kind: "arrow_function".to_string(),
            parts: vec![
                VerbatimPart::Text("async /* c */ () => ".to_string()),
                VerbatimPart::Expr(awaited(Expr::ident("inner"))),
            ],
        };
        let function = arrow(true, FunctionBody::Expr(Expr::Verbatim(Arc::new(arrow_text.clone()))));

        let result = rewrite_suspensions(&function, &SyntaxFlagProbe, &adapter()).unwrap();

        assert_eq!(result.body, FunctionBody::Expr(Expr::Verbatim(Arc::new(arrow_text))));
    }

    #[test]
    fn test_non_async_function_is_contract_violation() {
        let function = arrow(false, FunctionBody::Expr(Expr::ident("x")));
        let err = rewrite_suspensions(&function, &SyntaxFlagProbe, &adapter()).unwrap_err();
        assert!(matches!(err, TransformError::ContractViolation(_)));
    }
}
