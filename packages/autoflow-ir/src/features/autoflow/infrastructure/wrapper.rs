//! Function Wrapper Synthesizer
//!
//! `<async_adapter>(function* (this: ClassName, ...params) { body })`

use std::sync::Arc;

use crate::shared::models::{Expr, Function, FunctionBody, FunctionKind, Param, Stmt};

/// Wrap a generator function value in a call to the async adapter
///
/// Arrow functions cannot be generators, so the result is always a
/// function expression. A concise body becomes `{ return <expr>; }`.
/// The return type is dropped: it described the promise, not the generator.
pub fn wrap_in_async_adapter(generator: Function, async_adapter: &Expr, class_name: &str) -> Expr {
    let params: Arc<[Param]> = if generator.has_this_param() {
        Arc::clone(&generator.params)
    } else {
        std::iter::once(Param::this_typed(class_name))
            .chain(generator.params.iter().cloned())
            .collect()
    };

    let body = match generator.body {
        FunctionBody::Block(stmts) => FunctionBody::Block(stmts),
        FunctionBody::Expr(expr) => FunctionBody::Block(vec![Stmt::Return(Some(expr))].into()),
    };

    let function = Function {
        kind: FunctionKind::Expression,
        name: generator.name,
        is_async: false,
        is_generator: true,
        type_params: generator.type_params,
        params,
        return_type: None,
        body,
    };

    Expr::call(async_adapter.clone(), vec![Expr::Function(Arc::new(function))])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> Expr {
        Expr::member(Expr::ident("mk"), "_async")
    }

    fn generator(params: Vec<Param>, body: FunctionBody) -> Function {
        Function {
            kind: FunctionKind::Arrow,
            name: None,
            is_async: false,
            is_generator: true,
            type_params: None,
            params: params.into(),
            return_type: Some("Promise<number>".to_string()),
            body,
        }
    }

    fn wrapped_function(expr: &Expr) -> &Function {
        let Expr::Call(call) = expr else {
            panic!("expected adapter call");
        };
        assert_eq!(call.callee, adapter());
        assert_eq!(call.args.len(), 1);
        call.args[0].as_function().expect("function argument")
    }

    #[test]
    fn test_this_parameter_is_synthesized_first() {
        let wrapped = wrap_in_async_adapter(
            generator(vec![Param::named("input")], FunctionBody::Expr(Expr::ident("x"))),
            &adapter(),
            "Test",
        );
        let function = wrapped_function(&wrapped);

        assert_eq!(function.params.len(), 2);
        assert!(function.params[0].is_this());
        assert_eq!(function.params[0].type_ann.as_deref(), Some("Test"));
        assert_eq!(function.params[1].pattern, "input");
    }

    #[test]
    fn test_existing_this_parameter_is_not_duplicated() {
        let this = Param {
            type_ann: Some("Other".to_string()),
            ..Param::named("this")
        };
        let wrapped = wrap_in_async_adapter(
            generator(vec![this, Param::named("input")], FunctionBody::Block(vec![].into())),
            &adapter(),
            "Test",
        );
        let function = wrapped_function(&wrapped);

        assert_eq!(function.params.len(), 2);
        assert_eq!(function.params[0].type_ann.as_deref(), Some("Other"));
    }

    #[test]
    fn test_concise_body_becomes_return_block() {
        let wrapped = wrap_in_async_adapter(
            generator(vec![], FunctionBody::Expr(Expr::ident("x"))),
            &adapter(),
            "Test",
        );
        let function = wrapped_function(&wrapped);

        assert_eq!(function.kind, FunctionKind::Expression);
        assert!(function.is_generator);
        assert_eq!(function.return_type, None);
        assert_eq!(
            function.body,
            FunctionBody::Block(vec![Stmt::Return(Some(Expr::ident("x")))].into())
        );
    }
}
