//! Read-only tree visitor
//!
//! Same shape as [`Fold`](super::Fold) without producing a new tree.

use crate::shared::models::{
    ClassDecl, ClassMember, Expr, Function, FunctionBody, Modifier, Param, Stmt, Verbatim,
    VerbatimPart,
};

pub trait Visit {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt)
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr)
    }

    fn visit_class(&mut self, class: &ClassDecl) {
        walk_class(self, class)
    }

    fn visit_member(&mut self, member: &ClassMember) {
        walk_member(self, member)
    }

    fn visit_function(&mut self, function: &Function) {
        walk_function(self, function)
    }

    fn visit_param(&mut self, param: &Param) {
        walk_param(self, param)
    }

    fn visit_text(&mut self, _text: &str) {}
}

pub fn walk_stmt<V: Visit + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Import(_) => {}
        Stmt::Class(class) => visitor.visit_class(class),
        Stmt::Function(function) => visitor.visit_function(function),
        Stmt::Var(var) => {
            for decl in &var.declarators {
                if let Some(init) = &decl.init {
                    visitor.visit_expr(init);
                }
            }
        }
        Stmt::Expr(expr) | Stmt::Throw(expr) => visitor.visit_expr(expr),
        Stmt::Return(arg) => {
            if let Some(arg) = arg {
                visitor.visit_expr(arg);
            }
        }
        Stmt::If(if_stmt) => {
            visitor.visit_expr(&if_stmt.test);
            visitor.visit_stmt(&if_stmt.consequent);
            if let Some(alt) = &if_stmt.alternate {
                visitor.visit_stmt(alt);
            }
        }
        Stmt::Block(stmts) => stmts.iter().for_each(|s| visitor.visit_stmt(s)),
        Stmt::Verbatim(verbatim) => walk_verbatim(visitor, verbatim),
    }
}

pub fn walk_expr<V: Visit + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Ident(_) | Expr::This | Expr::Lit(_) => {}
        Expr::Member(member) => visitor.visit_expr(&member.object),
        Expr::Call(call) => {
            visitor.visit_expr(&call.callee);
            call.args.iter().for_each(|arg| visitor.visit_expr(arg));
        }
        Expr::Await(arg) | Expr::Paren(arg) => visitor.visit_expr(arg),
        Expr::Yield(yield_expr) => {
            if let Some(arg) = &yield_expr.arg {
                visitor.visit_expr(arg);
            }
        }
        Expr::Function(function) => visitor.visit_function(function),
        Expr::Class(class) => visitor.visit_class(class),
        Expr::Unary(unary) => visitor.visit_expr(&unary.arg),
        Expr::Binary(binary) => {
            visitor.visit_expr(&binary.left);
            visitor.visit_expr(&binary.right);
        }
        Expr::Verbatim(verbatim) => walk_verbatim(visitor, verbatim),
    }
}

pub fn walk_class<V: Visit + ?Sized>(visitor: &mut V, class: &ClassDecl) {
    walk_modifiers(visitor, &class.modifiers);
    class.members.iter().for_each(|m| visitor.visit_member(m));
}

pub fn walk_member<V: Visit + ?Sized>(visitor: &mut V, member: &ClassMember) {
    match member {
        ClassMember::Property(prop) => {
            walk_modifiers(visitor, &prop.modifiers);
            if let Some(init) = &prop.init {
                visitor.visit_expr(init);
            }
        }
        ClassMember::Method(method) => {
            walk_modifiers(visitor, &method.modifiers);
            method.params.iter().for_each(|p| visitor.visit_param(p));
            if let Some(body) = &method.body {
                body.iter().for_each(|s| visitor.visit_stmt(s));
            }
        }
        ClassMember::Verbatim(verbatim) => walk_verbatim(visitor, verbatim),
    }
}

pub fn walk_function<V: Visit + ?Sized>(visitor: &mut V, function: &Function) {
    function.params.iter().for_each(|p| visitor.visit_param(p));
    match &function.body {
        FunctionBody::Block(stmts) => stmts.iter().for_each(|s| visitor.visit_stmt(s)),
        FunctionBody::Expr(expr) => visitor.visit_expr(expr),
    }
}

pub fn walk_param<V: Visit + ?Sized>(visitor: &mut V, param: &Param) {
    walk_modifiers(visitor, &param.modifiers);
    if let Some(default) = &param.default {
        visitor.visit_expr(default);
    }
}

fn walk_modifiers<V: Visit + ?Sized>(visitor: &mut V, modifiers: &[Modifier]) {
    for modifier in modifiers {
        if let Modifier::Decorator(decorator) = modifier {
            visitor.visit_expr(&decorator.expr);
        }
    }
}

pub fn walk_verbatim<V: Visit + ?Sized>(visitor: &mut V, verbatim: &Verbatim) {
    for part in &verbatim.parts {
        match part {
            VerbatimPart::Text(text) => visitor.visit_text(text),
            VerbatimPart::Expr(expr) => visitor.visit_expr(expr),
            VerbatimPart::Stmt(stmt) => visitor.visit_stmt(stmt),
            VerbatimPart::Group(group) => walk_verbatim(visitor, group),
        }
    }
}
