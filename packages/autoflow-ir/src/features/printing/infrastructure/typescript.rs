//! TypeScript printer
//!
//! Canonical layout for structured nodes (two-space indentation, one
//! statement per line, decorators on their own line); `Verbatim` text is
//! written back exactly as it was read.

use crate::features::printing::ports::Printer;
use crate::shared::models::ast::{comment_gap, is_line_comment};
use crate::shared::models::{
    ClassDecl, ClassMember, Expr, Function, FunctionBody, FunctionKind, ImportDecl, MethodDecl,
    MethodKind, Modifier, Param, PropertyDecl, PropertyMarker, SourceUnit, Stmt, VarDecl,
    Verbatim, VerbatimPart,
};

/// TypeScript source printer
#[derive(Debug, Clone)]
pub struct TypeScriptPrinter {
    indent: String,
}

impl Default for TypeScriptPrinter {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }
}

impl TypeScriptPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    pub fn print_stmt(&self, stmt: &Stmt) -> String {
        let mut emitter = Emitter::new(&self.indent);
        emitter.stmt(stmt);
        emitter.out
    }

    pub fn print_expr(&self, expr: &Expr) -> String {
        let mut emitter = Emitter::new(&self.indent);
        emitter.expr(expr, false);
        emitter.out
    }
}

impl Printer for TypeScriptPrinter {
    fn print_unit(&self, unit: &SourceUnit) -> String {
        let mut emitter = Emitter::new(&self.indent);
        for stmt in unit.statements.iter() {
            emitter.stmt(stmt);
            emitter.out.push('\n');
        }
        emitter.out
    }
}

struct Emitter<'p> {
    out: String,
    level: usize,
    indent: &'p str,
}

impl<'p> Emitter<'p> {
    fn new(indent: &'p str) -> Self {
        Self {
            out: String::new(),
            level: 0,
            indent,
        }
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.level {
            self.out.push_str(self.indent);
        }
    }

    fn separated<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            each(self, item);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Import(import) => self.import(import),
            Stmt::Class(class) => self.class(class),
            Stmt::Function(function) => self.function(function),
            Stmt::Var(var) => {
                self.var(var);
                self.push(";");
            }
            Stmt::Expr(expr) => {
                self.expr(expr, false);
                self.push(";");
            }
            Stmt::Return(arg) => {
                self.push("return");
                if let Some(arg) = arg {
                    self.push(" ");
                    self.expr(arg, false);
                }
                self.push(";");
            }
            Stmt::Throw(arg) => {
                self.push("throw ");
                self.expr(arg, false);
                self.push(";");
            }
            Stmt::If(if_stmt) => {
                self.push("if (");
                self.expr(&if_stmt.test, false);
                self.push(") ");
                self.stmt(&if_stmt.consequent);
                if let Some(alt) = &if_stmt.alternate {
                    if matches!(if_stmt.consequent, Stmt::Block(_)) {
                        self.push(" ");
                    } else {
                        self.newline();
                    }
                    self.push("else ");
                    self.stmt(alt);
                }
            }
            Stmt::Block(stmts) => self.block(stmts),
            Stmt::Verbatim(verbatim) => self.verbatim(verbatim, false),
        }
    }

    fn block(&mut self, stmts: &[Stmt]) {
        if stmts.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.level += 1;
        for stmt in stmts {
            self.newline();
            self.stmt(stmt);
        }
        self.level -= 1;
        self.newline();
        self.push("}");
    }

    fn import(&mut self, import: &ImportDecl) {
        self.push("import ");
        if import.type_only {
            self.push("type ");
        }
        let clause = &import.clause;
        if !clause.is_side_effect() {
            let mut bindings = Vec::new();
            if let Some(default) = &clause.default {
                bindings.push(default.clone());
            }
            if let Some(namespace) = &clause.namespace {
                bindings.push(format!("* as {namespace}"));
            }
            if let Some(named) = &clause.named {
                let specifiers = named
                    .iter()
                    .map(|spec| match &spec.alias {
                        Some(alias) => format!("{} as {}", spec.name, alias),
                        None => spec.name.clone(),
                    })
                    .collect::<Vec<_>>();
                if specifiers.is_empty() {
                    bindings.push("{}".to_string());
                } else {
                    bindings.push(format!("{{ {} }}", specifiers.join(", ")));
                }
            }
            self.push(&bindings.join(", "));
            self.push(" from ");
        }
        let quote = if import.source.contains('"') { '\'' } else { '"' };
        self.out.push(quote);
        self.push(&import.source);
        self.out.push(quote);
        self.push(";");
    }

    fn var(&mut self, var: &VarDecl) {
        self.push(var.kind.as_str());
        self.push(" ");
        self.separated(&var.declarators, |this, decl| {
            this.push(&decl.name);
            if let Some(type_ann) = &decl.type_ann {
                this.push(": ");
                this.push(type_ann);
            }
            if let Some(init) = &decl.init {
                this.push(" = ");
                this.expr(init, false);
            }
        });
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Classes
    // ═══════════════════════════════════════════════════════════════════════

    /// Decorators each on their own line, keywords space-separated
    fn modifiers(&mut self, modifiers: &[Modifier]) {
        for modifier in modifiers {
            match modifier {
                Modifier::Decorator(decorator) => {
                    self.push("@");
                    self.expr(&decorator.expr, false);
                    self.newline();
                }
                Modifier::Keyword(keyword) => {
                    self.push(keyword.as_str());
                    self.push(" ");
                }
                Modifier::Comment(comment) => self.comment(comment),
            }
        }
    }

    /// Comment followed by whatever keeps the next token out of it
    fn comment(&mut self, comment: &str) {
        self.push(comment);
        if is_line_comment(comment) {
            self.newline();
        } else {
            self.push(" ");
        }
    }

    fn class(&mut self, class: &ClassDecl) {
        self.modifiers(&class.modifiers);
        self.push("class");
        if let Some(name) = &class.name {
            self.push(" ");
            self.push(name);
        }
        if let Some(type_params) = &class.type_params {
            self.push(type_params);
        }
        if let Some(heritage) = &class.heritage {
            self.push(" ");
            self.push(heritage);
        }
        self.push(" ");

        if class.members.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.level += 1;
        for member in class.members.iter() {
            self.newline();
            self.member(member);
        }
        self.level -= 1;
        self.newline();
        self.push("}");
    }

    fn member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Property(prop) => self.property(prop),
            ClassMember::Method(method) => self.method(method),
            ClassMember::Verbatim(verbatim) => self.verbatim(verbatim, false),
        }
    }

    fn property(&mut self, prop: &PropertyDecl) {
        self.modifiers(&prop.modifiers);
        self.push(&prop.name);
        match prop.marker {
            PropertyMarker::None => {}
            PropertyMarker::Optional => self.push("?"),
            PropertyMarker::Definite => self.push("!"),
        }
        if let Some(type_ann) = &prop.type_ann {
            self.push(": ");
            self.push(type_ann);
        }
        if let Some(init) = &prop.init {
            self.push(" = ");
            self.expr(init, false);
        }
        self.push(";");
    }

    fn method(&mut self, method: &MethodDecl) {
        self.modifiers(&method.modifiers);
        match method.kind {
            MethodKind::Getter => self.push("get "),
            MethodKind::Setter => self.push("set "),
            MethodKind::Method | MethodKind::Constructor => {}
        }
        if method.is_generator {
            self.push("*");
        }
        self.push(&method.name);
        if method.optional {
            self.push("?");
        }
        self.signature(method.type_params.as_deref(), &method.params, method.return_type.as_deref());
        match &method.body {
            Some(body) => {
                self.push(" ");
                self.block(body);
            }
            None => self.push(";"),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Functions
    // ═══════════════════════════════════════════════════════════════════════

    fn signature(&mut self, type_params: Option<&str>, params: &[Param], return_type: Option<&str>) {
        if let Some(type_params) = type_params {
            self.push(type_params);
        }
        self.push("(");
        self.separated(params, |this, param| this.param(param));
        self.push(")");
        if let Some(return_type) = return_type {
            self.push(": ");
            self.push(return_type);
        }
    }

    fn param(&mut self, param: &Param) {
        for modifier in &param.modifiers {
            match modifier {
                Modifier::Decorator(decorator) => {
                    self.push("@");
                    self.expr(&decorator.expr, false);
                    self.push(" ");
                }
                Modifier::Keyword(keyword) => {
                    self.push(keyword.as_str());
                    self.push(" ");
                }
                Modifier::Comment(comment) => {
                    self.push(comment);
                    self.push(comment_gap(comment));
                }
            }
        }
        if param.rest {
            self.push("...");
        }
        self.push(&param.pattern);
        if param.optional {
            self.push("?");
        }
        if let Some(type_ann) = &param.type_ann {
            self.push(": ");
            self.push(type_ann);
        }
        if let Some(default) = &param.default {
            self.push(" = ");
            self.expr(default, false);
        }
        for comment in &param.comments {
            self.push(" ");
            self.push(comment);
            if is_line_comment(comment) {
                self.push("\n");
            }
        }
    }

    fn function(&mut self, function: &Function) {
        if function.is_async {
            self.push("async ");
        }
        if function.kind != FunctionKind::Arrow {
            self.push("function");
            if function.is_generator {
                self.push("*");
            }
            match &function.name {
                Some(name) => {
                    self.push(" ");
                    self.push(name);
                }
                None => self.push(" "),
            }
        }
        self.signature(
            function.type_params.as_deref(),
            &function.params,
            function.return_type.as_deref(),
        );
        if function.kind == FunctionKind::Arrow {
            self.push(" =>");
        }
        self.push(" ");
        match &function.body {
            FunctionBody::Block(stmts) => self.block(stmts),
            FunctionBody::Expr(expr) => self.expr(expr, false),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════════

    /// `operand`: the expression sits where a `yield` must be parenthesized
    fn expr(&mut self, expr: &Expr, operand: bool) {
        match expr {
            Expr::Ident(name) => self.push(name),
            Expr::This => self.push("this"),
            Expr::Lit(raw) => self.push(raw),
            Expr::Member(member) => {
                self.expr(&member.object, true);
                self.push(if member.optional { "?." } else { "." });
                self.push(&member.property);
            }
            Expr::Call(call) => {
                self.expr(&call.callee, true);
                if call.optional {
                    self.push("?.");
                }
                if let Some(type_args) = &call.type_args {
                    self.push(type_args);
                }
                self.push("(");
                self.separated(&call.args, |this, arg| this.expr(arg, false));
                self.push(")");
            }
            Expr::Await(arg) => {
                self.push("await ");
                self.expr(arg, true);
            }
            Expr::Yield(yield_expr) => {
                if operand {
                    self.push("(");
                }
                self.push(if yield_expr.delegate { "yield*" } else { "yield" });
                if let Some(arg) = &yield_expr.arg {
                    self.push(" ");
                    self.expr(arg, false);
                }
                if operand {
                    self.push(")");
                }
            }
            Expr::Function(function) => self.function(function),
            Expr::Class(class) => self.class(class),
            Expr::Paren(inner) => {
                self.push("(");
                self.expr(inner, false);
                self.push(")");
            }
            Expr::Unary(unary) => {
                self.push(&unary.op);
                if unary.op.chars().all(char::is_alphabetic) {
                    self.push(" ");
                }
                self.expr(&unary.arg, true);
            }
            Expr::Binary(binary) => {
                self.expr(&binary.left, true);
                self.push(" ");
                self.push(&binary.op);
                self.push(" ");
                self.expr(&binary.right, !binary.is_assignment());
            }
            Expr::Verbatim(verbatim) => self.verbatim(verbatim, operand),
        }
    }

    /// Nested expressions of an opaque node are treated as operands
    fn verbatim(&mut self, verbatim: &Verbatim, operand: bool) {
        let operand = operand || !verbatim.is_transparent();
        for part in &verbatim.parts {
            match part {
                VerbatimPart::Text(text) => self.push(text),
                VerbatimPart::Expr(expr) => self.expr(expr, operand),
                VerbatimPart::Stmt(stmt) => self.stmt(stmt),
                VerbatimPart::Group(group) => self.verbatim(group, operand),
            }
        }
    }
}
