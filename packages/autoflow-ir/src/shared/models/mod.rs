//! Shared models

pub mod ast;
mod span;

pub use ast::{
    BinaryExpr, CallExpr, ClassDecl, ClassMember, Decorator, Expr, Function, FunctionBody,
    FunctionKind, IfStmt, ImportClause, ImportDecl, ImportSpecifier, MemberExpr, MethodDecl,
    MethodKind, Modifier, ModifierKeyword, Param, PropertyDecl, PropertyMarker, SourceUnit, Stmt,
    UnaryExpr, VarDecl, VarDeclarator, VarKind, Verbatim, VerbatimPart, YieldExpr,
};
pub use span::Span;
