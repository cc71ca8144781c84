//! Rewriting tree visitor
//!
//! `Fold` produces a new tree from an old one. Every method has a default
//! that delegates to the matching `walk_*` function, which rebuilds the node
//! from its folded children in their original order and copies every other
//! field. Implementors override only the kinds they rewrite; returning the
//! input `Arc` unchanged from `fold_function` or `fold_class` is how a
//! rewrite declines to descend into a subtree.
//!
//! All methods are fallible so a broken invariant deep in the tree aborts
//! the whole traversal.

use std::sync::Arc;

use crate::errors::Result;
use crate::shared::models::{
    BinaryExpr, CallExpr, ClassDecl, ClassMember, Decorator, Expr, Function, FunctionBody, IfStmt,
    MemberExpr, MethodDecl, Modifier, Param, PropertyDecl, Stmt, UnaryExpr, VarDecl,
    VarDeclarator, Verbatim, VerbatimPart, YieldExpr,
};

pub trait Fold {
    fn fold_stmt(&mut self, stmt: &Stmt) -> Result<Stmt> {
        walk_stmt(self, stmt)
    }

    fn fold_expr(&mut self, expr: &Expr) -> Result<Expr> {
        walk_expr(self, expr)
    }

    fn fold_class(&mut self, class: &Arc<ClassDecl>) -> Result<Arc<ClassDecl>> {
        walk_class(self, class)
    }

    fn fold_member(&mut self, member: &ClassMember) -> Result<ClassMember> {
        walk_member(self, member)
    }

    fn fold_function(&mut self, function: &Arc<Function>) -> Result<Arc<Function>> {
        walk_function(self, function)
    }

    fn fold_modifiers(&mut self, modifiers: &[Modifier]) -> Result<Vec<Modifier>> {
        walk_modifiers(self, modifiers)
    }

    fn fold_params(&mut self, params: &Arc<[Param]>) -> Result<Arc<[Param]>> {
        walk_params(self, params)
    }

    fn fold_verbatim(&mut self, verbatim: &Verbatim) -> Result<Verbatim> {
        walk_verbatim(self, verbatim)
    }
}

/// Fold a statement list, preserving order
pub fn fold_stmts<F: Fold + ?Sized>(folder: &mut F, stmts: &[Stmt]) -> Result<Arc<[Stmt]>> {
    stmts.iter().map(|stmt| folder.fold_stmt(stmt)).collect()
}

fn fold_opt_expr<F: Fold + ?Sized>(folder: &mut F, expr: Option<&Expr>) -> Result<Option<Expr>> {
    expr.map(|e| folder.fold_expr(e)).transpose()
}

pub fn walk_stmt<F: Fold + ?Sized>(folder: &mut F, stmt: &Stmt) -> Result<Stmt> {
    Ok(match stmt {
        Stmt::Import(_) => stmt.clone(),
        Stmt::Class(class) => Stmt::Class(folder.fold_class(class)?),
        Stmt::Function(function) => Stmt::Function(folder.fold_function(function)?),
        Stmt::Var(var) => {
            let declarators = var
                .declarators
                .iter()
                .map(|decl| {
                    Ok(VarDeclarator {
                        init: fold_opt_expr(folder, decl.init.as_ref())?,
                        ..decl.clone()
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Stmt::Var(Arc::new(VarDecl {
                kind: var.kind,
                declarators,
            }))
        }
        Stmt::Expr(expr) => Stmt::Expr(folder.fold_expr(expr)?),
        Stmt::Return(arg) => Stmt::Return(fold_opt_expr(folder, arg.as_ref())?),
        Stmt::Throw(arg) => Stmt::Throw(folder.fold_expr(arg)?),
        Stmt::If(if_stmt) => Stmt::If(Arc::new(IfStmt {
            test: folder.fold_expr(&if_stmt.test)?,
            consequent: folder.fold_stmt(&if_stmt.consequent)?,
            alternate: if_stmt
                .alternate
                .as_ref()
                .map(|alt| folder.fold_stmt(alt))
                .transpose()?,
        })),
        Stmt::Block(stmts) => Stmt::Block(fold_stmts(folder, stmts)?),
        Stmt::Verbatim(verbatim) => Stmt::Verbatim(Arc::new(folder.fold_verbatim(verbatim)?)),
    })
}

pub fn walk_expr<F: Fold + ?Sized>(folder: &mut F, expr: &Expr) -> Result<Expr> {
    Ok(match expr {
        Expr::Ident(_) | Expr::This | Expr::Lit(_) => expr.clone(),
        Expr::Member(member) => Expr::Member(Arc::new(MemberExpr {
            object: folder.fold_expr(&member.object)?,
            property: member.property.clone(),
            optional: member.optional,
        })),
        Expr::Call(call) => Expr::Call(Arc::new(CallExpr {
            callee: folder.fold_expr(&call.callee)?,
            type_args: call.type_args.clone(),
            args: call
                .args
                .iter()
                .map(|arg| folder.fold_expr(arg))
                .collect::<Result<_>>()?,
            optional: call.optional,
        })),
        Expr::Await(arg) => Expr::Await(Arc::new(folder.fold_expr(arg)?)),
        Expr::Yield(yield_expr) => Expr::Yield(Arc::new(YieldExpr {
            delegate: yield_expr.delegate,
            arg: fold_opt_expr(folder, yield_expr.arg.as_ref())?,
        })),
        Expr::Function(function) => Expr::Function(folder.fold_function(function)?),
        Expr::Class(class) => Expr::Class(folder.fold_class(class)?),
        Expr::Paren(inner) => Expr::Paren(Arc::new(folder.fold_expr(inner)?)),
        Expr::Unary(unary) => Expr::Unary(Arc::new(UnaryExpr {
            op: unary.op.clone(),
            arg: folder.fold_expr(&unary.arg)?,
        })),
        Expr::Binary(binary) => Expr::Binary(Arc::new(BinaryExpr {
            left: folder.fold_expr(&binary.left)?,
            op: binary.op.clone(),
            right: folder.fold_expr(&binary.right)?,
        })),
        Expr::Verbatim(verbatim) => Expr::Verbatim(Arc::new(folder.fold_verbatim(verbatim)?)),
    })
}

pub fn walk_class<F: Fold + ?Sized>(
    folder: &mut F,
    class: &Arc<ClassDecl>,
) -> Result<Arc<ClassDecl>> {
    let modifiers = folder.fold_modifiers(&class.modifiers)?;
    let members = class
        .members
        .iter()
        .map(|member| folder.fold_member(member))
        .collect::<Result<_>>()?;
    Ok(Arc::new(ClassDecl {
        modifiers,
        name: class.name.clone(),
        type_params: class.type_params.clone(),
        heritage: class.heritage.clone(),
        members,
    }))
}

pub fn walk_member<F: Fold + ?Sized>(folder: &mut F, member: &ClassMember) -> Result<ClassMember> {
    Ok(match member {
        ClassMember::Property(prop) => ClassMember::Property(Arc::new(PropertyDecl {
            modifiers: folder.fold_modifiers(&prop.modifiers)?,
            init: fold_opt_expr(folder, prop.init.as_ref())?,
            ..(**prop).clone()
        })),
        ClassMember::Method(method) => ClassMember::Method(Arc::new(MethodDecl {
            modifiers: folder.fold_modifiers(&method.modifiers)?,
            params: folder.fold_params(&method.params)?,
            body: method
                .body
                .as_ref()
                .map(|body| fold_stmts(folder, body))
                .transpose()?,
            ..(**method).clone()
        })),
        ClassMember::Verbatim(verbatim) => {
            ClassMember::Verbatim(Arc::new(folder.fold_verbatim(verbatim)?))
        }
    })
}

pub fn walk_function<F: Fold + ?Sized>(
    folder: &mut F,
    function: &Arc<Function>,
) -> Result<Arc<Function>> {
    let params = folder.fold_params(&function.params)?;
    let body = match &function.body {
        FunctionBody::Block(stmts) => FunctionBody::Block(fold_stmts(folder, stmts)?),
        FunctionBody::Expr(expr) => FunctionBody::Expr(folder.fold_expr(expr)?),
    };
    Ok(Arc::new(Function {
        params,
        body,
        ..(**function).clone()
    }))
}

pub fn walk_modifiers<F: Fold + ?Sized>(
    folder: &mut F,
    modifiers: &[Modifier],
) -> Result<Vec<Modifier>> {
    modifiers
        .iter()
        .map(|modifier| match modifier {
            Modifier::Decorator(decorator) => Ok(Modifier::Decorator(Decorator::new(
                folder.fold_expr(&decorator.expr)?,
            ))),
            Modifier::Keyword(_) | Modifier::Comment(_) => Ok(modifier.clone()),
        })
        .collect()
}

pub fn walk_params<F: Fold + ?Sized>(folder: &mut F, params: &Arc<[Param]>) -> Result<Arc<[Param]>> {
    params
        .iter()
        .map(|param| {
            Ok(Param {
                modifiers: folder.fold_modifiers(&param.modifiers)?,
                default: fold_opt_expr(folder, param.default.as_ref())?,
                ..param.clone()
            })
        })
        .collect()
}

pub fn walk_verbatim<F: Fold + ?Sized>(folder: &mut F, verbatim: &Verbatim) -> Result<Verbatim> {
    let parts = verbatim
        .parts
        .iter()
        .map(|part| {
            Ok(match part {
                VerbatimPart::Text(_) => part.clone(),
                VerbatimPart::Expr(expr) => VerbatimPart::Expr(folder.fold_expr(expr)?),
                VerbatimPart::Stmt(stmt) => VerbatimPart::Stmt(folder.fold_stmt(stmt)?),
                VerbatimPart::Group(group) => VerbatimPart::Group(folder.fold_verbatim(group)?),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Verbatim {
        kind: verbatim.kind.clone(),
        parts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;
    impl Fold for Identity {}

    struct Rename;
    impl Fold for Rename {
        fn fold_expr(&mut self, expr: &Expr) -> Result<Expr> {
            match expr {
                Expr::Ident(name) if name == "a" => Ok(Expr::ident("b")),
                _ => walk_expr(self, expr),
            }
        }
    }

    fn sample() -> Stmt {
        let body: Arc<[Stmt]> = vec![Stmt::Return(Some(Expr::Await(Arc::new(Expr::call(
            Expr::ident("a"),
            vec![Expr::ident("x")],
        )))))]
        .into();
        Stmt::Expr(Expr::Function(Arc::new(Function {
            kind: crate::shared::models::FunctionKind::Arrow,
            name: None,
            is_async: true,
            is_generator: false,
            type_params: None,
            params: vec![Param::named("x")].into(),
            return_type: None,
            body: FunctionBody::Block(body),
        })))
    }

    #[test]
    fn test_identity_fold_is_structurally_equal() {
        let stmt = sample();
        assert_eq!(Identity.fold_stmt(&stmt).unwrap(), stmt);
    }

    #[test]
    fn test_fold_reaches_nested_expressions() {
        let folded = Rename.fold_stmt(&sample()).unwrap();
        assert!(format!("{folded:?}").contains("Ident(\"b\")"));
        assert!(!format!("{folded:?}").contains("Ident(\"a\")"));
    }

    #[test]
    fn test_fold_descends_into_verbatim_parts() {
        let verbatim = Verbatim {
            kind: "for_of_statement".to_string(),
            parts: vec![
                VerbatimPart::Text("for (const x of ".to_string()),
                VerbatimPart::Expr(Expr::ident("a")),
                VerbatimPart::Text(") ".to_string()),
                VerbatimPart::Stmt(Stmt::Block(vec![].into())),
            ],
        };
        let folded = Rename.fold_verbatim(&verbatim).unwrap();
        assert_eq!(folded.parts[1], VerbatimPart::Expr(Expr::ident("b")));
        assert_eq!(folded.parts[0], verbatim.parts[0]);
    }
}
