//! TypeScript syntax tree
//!
//! Immutable, persistent tree consumed and produced by the rewrite engine.
//! Every child link is an `Arc`, so producing a new node only rebuilds the
//! path from the root to the rewritten subtree; untouched siblings are shared.
//!
//! The set of kinds is closed. Syntax that has no dedicated variant is kept
//! as [`Verbatim`]: raw text fragments interleaved with nested expressions
//! and statements, so the rewrite can still reach into it.

use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════
// Source Unit
// ═══════════════════════════════════════════════════════════════════════════

/// One file's whole syntax tree, the unit of transformation
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUnit {
    pub file_name: String,
    pub statements: Arc<[Stmt]>,
    pub is_declaration_file: bool,
    /// `/// <reference path="..." />`
    pub referenced_files: Vec<String>,
    /// `/// <reference types="..." />`
    pub type_reference_directives: Vec<String>,
    /// `/// <reference lib="..." />`
    pub lib_reference_directives: Vec<String>,
}

impl SourceUnit {
    pub fn new(file_name: impl Into<String>, statements: Vec<Stmt>) -> Self {
        let file_name = file_name.into();
        Self {
            is_declaration_file: file_name.ends_with(".d.ts"),
            file_name,
            statements: statements.into(),
            referenced_files: Vec::new(),
            type_reference_directives: Vec::new(),
            lib_reference_directives: Vec::new(),
        }
    }

    /// Same unit-level metadata, new statement list
    pub fn with_statements(&self, statements: Vec<Stmt>) -> Self {
        Self {
            file_name: self.file_name.clone(),
            statements: statements.into(),
            is_declaration_file: self.is_declaration_file,
            referenced_files: self.referenced_files.clone(),
            type_reference_directives: self.type_reference_directives.clone(),
            lib_reference_directives: self.lib_reference_directives.clone(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Statements
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Import(Arc<ImportDecl>),
    Class(Arc<ClassDecl>),
    /// Function declaration; `Function::kind` is `Declaration`
    Function(Arc<Function>),
    Var(Arc<VarDecl>),
    Expr(Expr),
    Return(Option<Expr>),
    Throw(Expr),
    If(Arc<IfStmt>),
    Block(Arc<[Stmt]>),
    Verbatim(Arc<Verbatim>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub type_only: bool,
    pub clause: ImportClause,
    /// Module specifier without quotes
    pub source: String,
}

impl ImportDecl {
    /// `import * as <local> from "<source>";`
    pub fn namespace(local: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            type_only: false,
            clause: ImportClause {
                namespace: Some(local.into()),
                ..ImportClause::default()
            },
            source: source.into(),
        }
    }

    /// Every local name this import binds
    pub fn local_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        if let Some(default) = &self.clause.default {
            names.push(default.as_str());
        }
        if let Some(namespace) = &self.clause.namespace {
            names.push(namespace.as_str());
        }
        if let Some(named) = &self.clause.named {
            names.extend(named.iter().map(ImportSpecifier::local_name));
        }
        names
    }
}

/// All bindings of an import; a side-effect import has none of them set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportClause {
    pub default: Option<String>,
    pub namespace: Option<String>,
    pub named: Option<Vec<ImportSpecifier>>,
}

impl ImportClause {
    pub fn is_side_effect(&self) -> bool {
        self.default.is_none() && self.namespace.is_none() && self.named.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpecifier {
    pub name: String,
    pub alias: Option<String>,
}

impl ImportSpecifier {
    pub fn local_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// Decorators and keywords, in source order
    pub modifiers: Vec<Modifier>,
    pub name: Option<String>,
    pub type_params: Option<String>,
    /// `extends ... implements ...`, passed through untouched
    pub heritage: Option<String>,
    pub members: Arc<[ClassMember]>,
}

impl ClassDecl {
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub kind: VarKind,
    pub declarators: Vec<VarDeclarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclarator {
    /// Binding pattern as written (identifier or destructuring)
    pub name: String,
    pub type_ann: Option<String>,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub test: Expr,
    pub consequent: Stmt,
    pub alternate: Option<Stmt>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Class members
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Property(Arc<PropertyDecl>),
    Method(Arc<MethodDecl>),
    Verbatim(Arc<Verbatim>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyMarker {
    None,
    /// `name?`
    Optional,
    /// `name!`
    Definite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub marker: PropertyMarker,
    pub type_ann: Option<String>,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
    Constructor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    /// Decorators and keywords; an async method carries `ModifierKeyword::Async`
    pub modifiers: Vec<Modifier>,
    pub kind: MethodKind,
    pub name: String,
    pub is_generator: bool,
    pub optional: bool,
    pub type_params: Option<String>,
    pub params: Arc<[Param]>,
    pub return_type: Option<String>,
    /// `None` for overload signatures
    pub body: Option<Arc<[Stmt]>>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Annotations / qualifiers
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKeyword {
    Export,
    Default,
    Declare,
    Abstract,
    Public,
    Private,
    Protected,
    Static,
    Override,
    Readonly,
    Accessor,
    Async,
}

impl ModifierKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModifierKeyword::Export => "export",
            ModifierKeyword::Default => "default",
            ModifierKeyword::Declare => "declare",
            ModifierKeyword::Abstract => "abstract",
            ModifierKeyword::Public => "public",
            ModifierKeyword::Private => "private",
            ModifierKeyword::Protected => "protected",
            ModifierKeyword::Static => "static",
            ModifierKeyword::Override => "override",
            ModifierKeyword::Readonly => "readonly",
            ModifierKeyword::Accessor => "accessor",
            ModifierKeyword::Async => "async",
        }
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        Some(match text {
            "export" => ModifierKeyword::Export,
            "default" => ModifierKeyword::Default,
            "declare" => ModifierKeyword::Declare,
            "abstract" => ModifierKeyword::Abstract,
            "public" => ModifierKeyword::Public,
            "private" => ModifierKeyword::Private,
            "protected" => ModifierKeyword::Protected,
            "static" => ModifierKeyword::Static,
            "override" => ModifierKeyword::Override,
            "readonly" => ModifierKeyword::Readonly,
            "accessor" => ModifierKeyword::Accessor,
            "async" => ModifierKeyword::Async,
            _ => return None,
        })
    }
}

/// `@expr`
#[derive(Debug, Clone, PartialEq)]
pub struct Decorator {
    pub expr: Expr,
}

impl Decorator {
    pub fn new(expr: Expr) -> Self {
        Self { expr }
    }

    /// Trailing identifier of the decorator expression:
    /// `x`, `ns.x`, `x(...)` and `ns.x(...)` are all named `x`.
    pub fn name(&self) -> Option<&str> {
        self.expr.reference_name()
    }
}

/// One entry of a declaration's ordered annotation/qualifier list
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    Decorator(Decorator),
    Keyword(ModifierKeyword),
    /// Comment between annotations, kept as written
    Comment(String),
}

impl Modifier {
    pub fn as_decorator(&self) -> Option<&Decorator> {
        match self {
            Modifier::Decorator(decorator) => Some(decorator),
            Modifier::Keyword(_) | Modifier::Comment(_) => None,
        }
    }

    pub fn is_keyword(&self, keyword: ModifierKeyword) -> bool {
        matches!(self, Modifier::Keyword(k) if *k == keyword)
    }

    /// Exact name match, never a substring match
    pub fn is_decorator_named(&self, name: &str) -> bool {
        self.as_decorator().and_then(Decorator::name) == Some(name)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Functions
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// `(a) => ...`
    Arrow,
    /// `function (a) { ... }` in expression position
    Expression,
    /// `function name(a) { ... }` as a statement
    Declaration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    Block(Arc<[Stmt]>),
    /// Concise arrow body
    Expr(Expr),
}

/// Function value (arrow, function expression) or function declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub kind: FunctionKind,
    pub name: Option<String>,
    pub is_async: bool,
    pub is_generator: bool,
    pub type_params: Option<String>,
    pub params: Arc<[Param]>,
    pub return_type: Option<String>,
    pub body: FunctionBody,
}

impl Function {
    pub fn is_value(&self) -> bool {
        matches!(self.kind, FunctionKind::Arrow | FunctionKind::Expression)
    }

    pub fn has_this_param(&self) -> bool {
        self.params.iter().any(Param::is_this)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Decorators, accessibility and `readonly` (constructor parameter properties)
    pub modifiers: Vec<Modifier>,
    /// Binding pattern as written; `this` for an explicit this-parameter
    pub pattern: String,
    pub optional: bool,
    pub rest: bool,
    pub type_ann: Option<String>,
    pub default: Option<Expr>,
    /// Comments between this parameter and the next separator
    pub comments: Vec<String>,
}

impl Param {
    pub fn named(pattern: impl Into<String>) -> Self {
        Self {
            modifiers: Vec::new(),
            pattern: pattern.into(),
            optional: false,
            rest: false,
            type_ann: None,
            default: None,
            comments: Vec::new(),
        }
    }

    /// `this: <class_name>`; untyped when the class name is unknown
    pub fn this_typed(class_name: &str) -> Self {
        Self {
            type_ann: (!class_name.is_empty()).then(|| class_name.to_string()),
            ..Self::named("this")
        }
    }

    pub fn is_this(&self) -> bool {
        self.pattern == "this"
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    This,
    /// Literal exactly as written (string with its quotes, number, `true`, ...)
    Lit(String),
    Member(Arc<MemberExpr>),
    Call(Arc<CallExpr>),
    Await(Arc<Expr>),
    Yield(Arc<YieldExpr>),
    Function(Arc<Function>),
    /// Class expression, including `export default class { ... }`
    Class(Arc<ClassDecl>),
    Paren(Arc<Expr>),
    Unary(Arc<UnaryExpr>),
    /// Binary operators, including assignments
    Binary(Arc<BinaryExpr>),
    Verbatim(Arc<Verbatim>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Expr,
    pub property: String,
    /// `a?.b`
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Expr,
    pub type_args: Option<String>,
    pub args: Arc<[Expr]>,
    /// `f?.()`
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YieldExpr {
    /// `yield*`
    pub delegate: bool,
    pub arg: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: String,
    pub arg: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Expr,
    pub op: String,
    pub right: Expr,
}

impl BinaryExpr {
    pub fn is_assignment(&self) -> bool {
        self.op.ends_with('=') && !matches!(self.op.as_str(), "==" | "===" | "!=" | "!==" | "<=" | ">=")
    }
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn member(object: Expr, property: impl Into<String>) -> Self {
        Expr::Member(Arc::new(MemberExpr {
            object,
            property: property.into(),
            optional: false,
        }))
    }

    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call(Arc::new(CallExpr {
            callee,
            type_args: None,
            args: args.into(),
            optional: false,
        }))
    }

    /// `yield* <arg>`
    pub fn yield_delegate(arg: Expr) -> Self {
        Expr::Yield(Arc::new(YieldExpr {
            delegate: true,
            arg: Some(arg),
        }))
    }

    /// Double-quoted string literal
    pub fn string(value: &str) -> Self {
        // serde_json escaping is a valid TypeScript string literal
        let quoted = serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""));
        Expr::Lit(quoted)
    }

    /// Name this expression refers to, if it is a (possibly qualified or
    /// called) reference: `x`, `ns.x`, `x(...)`, `ns.x(...)` → `x`
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            Expr::Ident(name) => Some(name),
            Expr::Member(member) => Some(&member.property),
            Expr::Call(call) => call.callee.reference_name(),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Arc<Function>> {
        match self {
            Expr::Function(function) => Some(function),
            _ => None,
        }
    }

    /// `expr` with comments around it; `expr` itself when there are none
    pub fn commented(leading: &[String], expr: Expr, trailing: &[String]) -> Self {
        if leading.is_empty() && trailing.is_empty() {
            return expr;
        }
        let mut parts = Vec::with_capacity(leading.len() + trailing.len() + 1);
        for comment in leading {
            parts.push(VerbatimPart::Text(format!("{comment}{}", comment_gap(comment))));
        }
        parts.push(VerbatimPart::Expr(expr));
        for comment in trailing {
            let end = if is_line_comment(comment) { "\n" } else { "" };
            parts.push(VerbatimPart::Text(format!(" {comment}{end}")));
        }
        Expr::Verbatim(Arc::new(Verbatim {
            kind: Verbatim::COMMENTED.to_string(),
            parts,
        }))
    }

    /// The expression inside any comments attached to it
    pub fn without_comments(&self) -> &Expr {
        match self {
            Expr::Verbatim(verbatim) if verbatim.kind == Verbatim::COMMENTED => verbatim
                .parts
                .iter()
                .find_map(|part| match part {
                    VerbatimPart::Expr(inner) => Some(inner.without_comments()),
                    _ => None,
                })
                .unwrap_or(self),
            _ => self,
        }
    }

    /// Same attached comments around `replacement`
    pub fn replace_commented(&self, replacement: Expr) -> Expr {
        match self {
            Expr::Verbatim(verbatim) if verbatim.kind == Verbatim::COMMENTED => {
                let parts = verbatim
                    .parts
                    .iter()
                    .map(|part| match part {
                        VerbatimPart::Expr(inner) => {
                            VerbatimPart::Expr(inner.replace_commented(replacement.clone()))
                        }
                        _ => part.clone(),
                    })
                    .collect();
                Expr::Verbatim(Arc::new(Verbatim {
                    kind: verbatim.kind.clone(),
                    parts,
                }))
            }
            _ => replacement,
        }
    }
}

/// `// ...` runs to the end of its line
pub fn is_line_comment(comment: &str) -> bool {
    comment.starts_with("//")
}

/// Whitespace that must follow a comment placed before other code
pub fn comment_gap(comment: &str) -> &'static str {
    if is_line_comment(comment) {
        "\n"
    } else {
        " "
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Verbatim
// ═══════════════════════════════════════════════════════════════════════════

/// Syntax without a dedicated variant, kept as written
#[derive(Debug, Clone, PartialEq)]
pub struct Verbatim {
    /// Grammar kind it was parsed from (e.g. `for_statement`)
    pub kind: String,
    pub parts: Vec<VerbatimPart>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VerbatimPart {
    /// Tokens, whitespace and comments
    Text(String),
    Expr(Expr),
    Stmt(Stmt),
    Group(Verbatim),
}

impl Verbatim {
    /// Expression wrapped only to carry its comments
    pub const COMMENTED: &'static str = "commented";

    pub fn text(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            parts: vec![VerbatimPart::Text(text.into())],
        }
    }

    /// Functions and classes kept as text: their bodies are separate
    /// functions even though they have no dedicated variant
    pub fn is_function_boundary(&self) -> bool {
        matches!(
            self.kind.as_str(),
            "method_definition"
                | "class"
                | "class_declaration"
                | "abstract_class_declaration"
                | "class_body"
                | "class_static_block"
                | "arrow_function"
                | "function"
                | "function_expression"
                | "generator_function"
                | "function_declaration"
                | "generator_function_declaration"
        )
    }

    /// Nested expressions take this node's own position
    pub fn is_transparent(&self) -> bool {
        matches!(self.kind.as_str(), Verbatim::COMMENTED | "expression_statement")
    }
}
