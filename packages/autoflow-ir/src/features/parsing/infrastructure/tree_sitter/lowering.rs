//! Concrete syntax tree → shared syntax tree
//!
//! Kinds the rewrite needs to see structurally get their own variant; every
//! other node becomes a `Verbatim` whose text is the exact source slice,
//! split around any statement or expression children so those are still
//! lowered. A node whose expected fields are missing falls back to
//! `Verbatim` too, so lowering itself never fails.
//!
//! Comments inside a structured node are attached to the neighbouring
//! child (a `Modifier::Comment`, a parameter's trailing comments, or a
//! commented expression). A node with a comment that has no such neighbour
//! is lowered as `Verbatim` instead.

use std::sync::Arc;

use tree_sitter::Node;

use super::languages::typescript::{
    is_class_declaration, is_expression_kind, is_function_value, is_literal_kind,
    is_statement_kind, node_kinds,
};
use crate::shared::models::{
    BinaryExpr, CallExpr, ClassDecl, ClassMember, Decorator, Expr, Function, FunctionBody,
    FunctionKind, IfStmt, ImportClause, ImportDecl, ImportSpecifier, MemberExpr, MethodDecl,
    MethodKind, Modifier, ModifierKeyword, Param, PropertyDecl, PropertyMarker, Stmt, UnaryExpr,
    VarDecl, VarDeclarator, VarKind, Verbatim, VerbatimPart, YieldExpr,
};

pub(super) struct Lowering<'s> {
    source: &'s str,
}

impl<'s> Lowering<'s> {
    pub fn new(source: &'s str) -> Self {
        Self { source }
    }

    fn text(&self, node: Node) -> &'s str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    fn field_text(&self, node: Node, field: &str) -> Option<String> {
        node.child_by_field_name(field)
            .map(|child| self.text(child).to_string())
    }

    /// Top-level statements of a `program` node
    pub fn program(&self, root: Node) -> Vec<Stmt> {
        self.statement_list(root)
    }

    fn statement_list(&self, node: Node) -> Vec<Stmt> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .map(|child| self.stmt(child))
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    fn stmt(&self, node: Node) -> Stmt {
        self.structured_stmt(node)
            .unwrap_or_else(|| Stmt::Verbatim(Arc::new(self.verbatim(node))))
    }

    fn structured_stmt(&self, node: Node) -> Option<Stmt> {
        match node.kind() {
            node_kinds::IMPORT_STATEMENT => self.import(node).map(|i| Stmt::Import(Arc::new(i))),
            kind if is_class_declaration(kind) => {
                self.class(node, Vec::new()).map(|c| Stmt::Class(Arc::new(c)))
            }
            node_kinds::EXPORT_STATEMENT => self.exported_class(node),
            node_kinds::FUNCTION_DECLARATION | node_kinds::GENERATOR_FUNCTION_DECLARATION => self
                .function(node, FunctionKind::Declaration)
                .map(|f| Stmt::Function(Arc::new(f))),
            node_kinds::LEXICAL_DECLARATION | node_kinds::VARIABLE_DECLARATION => {
                self.var(node).map(|v| Stmt::Var(Arc::new(v)))
            }
            node_kinds::EXPRESSION_STATEMENT => self.expression_stmt(node),
            node_kinds::RETURN_STATEMENT => {
                let arg = self.first_named(node);
                if !comments_anchored(node, arg.as_slice()) {
                    return None;
                }
                Some(Stmt::Return(arg.map(|expr| self.commented(expr))))
            }
            node_kinds::THROW_STATEMENT => {
                let arg = self.first_named(node)?;
                if !comments_anchored(node, &[arg]) {
                    return None;
                }
                Some(Stmt::Throw(self.commented(arg)))
            }
            node_kinds::IF_STATEMENT if !has_extra_child(node) => {
                self.if_stmt(node).map(|i| Stmt::If(Arc::new(i)))
            }
            node_kinds::STATEMENT_BLOCK => Some(Stmt::Block(self.statement_list(node).into())),
            node_kinds::COMMENT | node_kinds::HASH_BANG_LINE => Some(Stmt::Verbatim(Arc::new(
                Verbatim::text(node.kind(), self.text(node)),
            ))),
            _ => None,
        }
    }

    /// A statement ending without `;` (`namespace N {}` and anything relying
    /// on automatic semicolon insertion) keeps its text
    fn expression_stmt(&self, node: Node) -> Option<Stmt> {
        let expr = self.first_named(node)?;
        if !has_token(node, ";") || !comments_anchored(node, &[expr]) {
            return None;
        }
        Some(Stmt::Expr(self.commented(expr)))
    }

    fn import(&self, node: Node) -> Option<ImportDecl> {
        if has_extra_descendant(node) {
            return None;
        }
        let source = node.child_by_field_name("source")?;
        let mut clause = ImportClause::default();
        let mut type_only = false;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "type" if !child.is_named() => type_only = true,
                node_kinds::IMPORT_CLAUSE => clause = self.import_clause(child)?,
                "import" | "from" | ";" => {}
                _ if child.id() == source.id() => {}
                // import x = require(...), import attributes, ...
                _ => return None,
            }
        }

        Some(ImportDecl {
            type_only,
            clause,
            source: unquote(self.text(source)).to_string(),
        })
    }

    fn import_clause(&self, node: Node) -> Option<ImportClause> {
        let mut clause = ImportClause::default();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                node_kinds::IDENTIFIER => clause.default = Some(self.text(child).to_string()),
                node_kinds::NAMESPACE_IMPORT => {
                    clause.namespace = Some(self.text(self.first_named(child)?).to_string())
                }
                node_kinds::NAMED_IMPORTS => {
                    let mut specifiers = Vec::new();
                    let mut inner = child.walk();
                    for spec in child.named_children(&mut inner) {
                        if spec.kind() != node_kinds::IMPORT_SPECIFIER {
                            continue;
                        }
                        // `import { type A }` has no structured form
                        if has_token(spec, "type") {
                            return None;
                        }
                        specifiers.push(ImportSpecifier {
                            name: self.field_text(spec, "name")?,
                            alias: self.field_text(spec, "alias"),
                        });
                    }
                    clause.named = Some(specifiers);
                }
                _ => return None,
            }
        }
        Some(clause)
    }

    /// `[@dec] export [default] class ...`, named or anonymous; other
    /// exports stay verbatim
    fn exported_class(&self, node: Node) -> Option<Stmt> {
        let declaration = node
            .child_by_field_name("declaration")
            .or_else(|| node.child_by_field_name("value"))?;
        let kind = declaration.kind();
        if !is_class_declaration(kind) && kind != node_kinds::CLASS {
            return None;
        }

        let mut modifiers = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.id() == declaration.id() {
                break;
            }
            match child.kind() {
                node_kinds::DECORATOR => modifiers.push(Modifier::Decorator(self.decorator(child))),
                "export" => modifiers.push(Modifier::Keyword(ModifierKeyword::Export)),
                "default" => modifiers.push(Modifier::Keyword(ModifierKeyword::Default)),
                _ if child.is_extra() => modifiers.push(self.comment(child)),
                _ => return None,
            }
        }
        // Only the `;` that may end `export default class {}` follows
        let mut cursor = node.walk();
        let trailing_comment = node
            .children(&mut cursor)
            .any(|child| child.is_extra() && child.start_byte() >= declaration.end_byte());
        if trailing_comment {
            return None;
        }

        self.class(declaration, modifiers)
            .map(|class| Stmt::Class(Arc::new(class)))
    }

    fn var(&self, node: Node) -> Option<VarDecl> {
        if has_extra_child(node) {
            return None;
        }
        let kind = match node.kind() {
            node_kinds::VARIABLE_DECLARATION => VarKind::Var,
            _ => match self.text(node.child_by_field_name("kind")?) {
                "let" => VarKind::Let,
                "const" => VarKind::Const,
                _ => return None,
            },
        };

        let mut declarators = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() != node_kinds::VARIABLE_DECLARATOR {
                continue;
            }
            let value = child.child_by_field_name("value");
            if !comments_anchored(child, value.as_slice()) {
                return None;
            }
            declarators.push(VarDeclarator {
                name: self.field_text(child, "name")?,
                type_ann: node_type_text(self, child, "type"),
                init: value.map(|v| self.commented(v)),
            });
        }

        Some(VarDecl { kind, declarators })
    }

    fn if_stmt(&self, node: Node) -> Option<IfStmt> {
        let condition = node.child_by_field_name("condition")?;
        // The grammar wraps the test in a parenthesized_expression
        let test = if condition.kind() == node_kinds::PARENTHESIZED_EXPRESSION {
            if has_extra_child(condition) {
                return None;
            }
            self.first_named(condition)?
        } else {
            condition
        };
        let consequent = node.child_by_field_name("consequence")?;
        let alternate = match node.child_by_field_name("alternative") {
            Some(alt) if alt.kind() == node_kinds::ELSE_CLAUSE => {
                if has_extra_child(alt) {
                    return None;
                }
                Some(self.stmt(self.first_named(alt)?))
            }
            Some(alt) => Some(self.stmt(alt)),
            None => None,
        };

        Some(IfStmt {
            test: self.expr(test),
            consequent: self.stmt(consequent),
            alternate,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Classes
    // ═══════════════════════════════════════════════════════════════════════

    fn class(&self, node: Node, mut modifiers: Vec<Modifier>) -> Option<ClassDecl> {
        let body = node.child_by_field_name("body")?;

        let mut in_header = true;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.id() == body.id() {
                break;
            }
            match child.kind() {
                // Comments between the name and the body have no slot
                _ if !in_header => {
                    if child.is_extra() {
                        return None;
                    }
                }
                "class" if !child.is_named() => in_header = false,
                _ if child.is_extra() => modifiers.push(self.comment(child)),
                node_kinds::DECORATOR => modifiers.push(Modifier::Decorator(self.decorator(child))),
                kind if !child.is_named() => {
                    modifiers.push(Modifier::Keyword(ModifierKeyword::from_keyword(kind)?))
                }
                _ => return None,
            }
        }

        let mut heritage = None;
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == node_kinds::CLASS_HERITAGE {
                heritage = Some(self.text(child).to_string());
            }
        }

        Some(ClassDecl {
            modifiers,
            name: self.field_text(node, "name"),
            type_params: self.field_text(node, "type_parameters"),
            heritage,
            members: self.class_members(body).into(),
        })
    }

    fn class_members(&self, body: Node) -> Vec<ClassMember> {
        let mut members = Vec::new();
        // Method decorators are siblings of the method in the class body
        let mut pending: Vec<Node> = Vec::new();

        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            match child.kind() {
                node_kinds::DECORATOR => pending.push(child),
                // A comment after a decorator belongs to the decorated member
                node_kinds::COMMENT if !pending.is_empty() => pending.push(child),
                node_kinds::COMMENT => members.push(ClassMember::Verbatim(Arc::new(
                    Verbatim::text(node_kinds::COMMENT, self.text(child)),
                ))),
                node_kinds::METHOD_DEFINITION => {
                    let outer = std::mem::take(&mut pending);
                    members.push(self.method_member(child, &outer));
                }
                node_kinds::PUBLIC_FIELD_DEFINITION
                    if pending.iter().all(|n| n.kind() == node_kinds::COMMENT) =>
                {
                    let outer = std::mem::take(&mut pending);
                    members.extend(outer.iter().map(|comment| {
                        ClassMember::Verbatim(Arc::new(Verbatim::text(
                            node_kinds::COMMENT,
                            self.text(*comment),
                        )))
                    }));
                    members.push(self.property_member(child));
                }
                _ => {
                    let mut verbatim = self.verbatim(child);
                    self.prepend_outer(&mut verbatim, &std::mem::take(&mut pending));
                    members.push(ClassMember::Verbatim(Arc::new(verbatim)));
                }
            }
        }
        if !pending.is_empty() {
            let mut verbatim = Verbatim {
                kind: node_kinds::DECORATOR.to_string(),
                parts: Vec::new(),
            };
            self.prepend_outer(&mut verbatim, &pending);
            members.push(ClassMember::Verbatim(Arc::new(verbatim)));
        }

        members
    }

    /// Decorators and comments written before a member, each on its own line
    fn prepend_outer(&self, verbatim: &mut Verbatim, outer: &[Node]) {
        for node in outer.iter().rev() {
            verbatim
                .parts
                .insert(0, VerbatimPart::Text(format!("{}\n", self.text(*node))));
        }
    }

    fn method_member(&self, node: Node, outer: &[Node]) -> ClassMember {
        let modifiers = outer
            .iter()
            .map(|n| match n.kind() {
                node_kinds::COMMENT => self.comment(*n),
                _ => Modifier::Decorator(self.decorator(*n)),
            })
            .collect();
        match self.method(node, modifiers) {
            Some(method) => ClassMember::Method(Arc::new(method)),
            None => {
                let mut verbatim = self.verbatim(node);
                self.prepend_outer(&mut verbatim, outer);
                ClassMember::Verbatim(Arc::new(verbatim))
            }
        }
    }

    fn method(&self, node: Node, mut modifiers: Vec<Modifier>) -> Option<MethodDecl> {
        let name = node.child_by_field_name("name")?;
        let mut kind = MethodKind::Method;
        let mut is_generator = false;
        let mut optional = false;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.start_byte() >= name.end_byte() {
                match child.kind() {
                    "?" => optional = true,
                    _ if child.is_extra() => return None,
                    _ => {}
                }
                continue;
            }
            if child.id() == name.id() {
                continue;
            }
            match child.kind() {
                _ if child.is_extra() => modifiers.push(self.comment(child)),
                node_kinds::DECORATOR => modifiers.push(Modifier::Decorator(self.decorator(child))),
                node_kinds::ACCESSIBILITY_MODIFIER | node_kinds::OVERRIDE_MODIFIER => modifiers
                    .push(Modifier::Keyword(ModifierKeyword::from_keyword(self.text(child))?)),
                "get" => kind = MethodKind::Getter,
                "set" => kind = MethodKind::Setter,
                "*" => is_generator = true,
                other => modifiers.push(Modifier::Keyword(ModifierKeyword::from_keyword(other)?)),
            }
        }

        let name = self.text(name).to_string();
        if name == "constructor" {
            kind = MethodKind::Constructor;
        }

        Some(MethodDecl {
            modifiers,
            kind,
            name,
            is_generator,
            optional,
            type_params: self.field_text(node, "type_parameters"),
            params: self.params(node.child_by_field_name("parameters")?)?.into(),
            return_type: node_type_text(self, node, "return_type"),
            body: node
                .child_by_field_name("body")
                .map(|body| self.statement_list(body).into()),
        })
    }

    fn property_member(&self, node: Node) -> ClassMember {
        match self.property(node) {
            Some(prop) => ClassMember::Property(Arc::new(prop)),
            None => ClassMember::Verbatim(Arc::new(self.verbatim(node))),
        }
    }

    fn property(&self, node: Node) -> Option<PropertyDecl> {
        let name = node.child_by_field_name("name")?;
        let value = node.child_by_field_name("value");
        let mut modifiers = Vec::new();
        let mut marker = PropertyMarker::None;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.start_byte() >= name.end_byte() {
                match child.kind() {
                    "?" => marker = PropertyMarker::Optional,
                    "!" => marker = PropertyMarker::Definite,
                    _ => {}
                }
                continue;
            }
            if child.id() == name.id() {
                continue;
            }
            match child.kind() {
                _ if child.is_extra() => modifiers.push(self.comment(child)),
                node_kinds::DECORATOR => modifiers.push(Modifier::Decorator(self.decorator(child))),
                node_kinds::ACCESSIBILITY_MODIFIER | node_kinds::OVERRIDE_MODIFIER => modifiers
                    .push(Modifier::Keyword(ModifierKeyword::from_keyword(self.text(child))?)),
                other => modifiers.push(Modifier::Keyword(ModifierKeyword::from_keyword(other)?)),
            }
        }

        let after_name: Vec<Node> = value.into_iter().collect();
        if !comments_anchored_after(node, name, &after_name) {
            return None;
        }

        Some(PropertyDecl {
            modifiers,
            name: self.text(name).to_string(),
            marker,
            type_ann: node_type_text(self, node, "type"),
            init: value.map(|v| self.commented(v)),
        })
    }

    fn decorator(&self, node: Node) -> Decorator {
        let expr = match self.first_named(node) {
            Some(inner) if !has_extra_child(node) => self.expr(inner),
            _ => Expr::Verbatim(Arc::new(Verbatim::text(
                node.kind(),
                self.text(node).trim_start_matches('@'),
            ))),
        };
        Decorator::new(expr)
    }

    fn comment(&self, node: Node) -> Modifier {
        Modifier::Comment(self.text(node).to_string())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Functions
    // ═══════════════════════════════════════════════════════════════════════

    fn function(&self, node: Node, kind: FunctionKind) -> Option<Function> {
        let body = node.child_by_field_name("body")?;
        let is_block = body.kind() == node_kinds::STATEMENT_BLOCK;
        let anchors: &[Node] = if is_block { &[] } else { std::slice::from_ref(&body) };
        if !comments_anchored(node, anchors) {
            return None;
        }
        let params = match node.child_by_field_name("parameters") {
            Some(params) => self.params(params)?,
            // `x => ...`
            None => vec![Param::named(self.field_text(node, "parameter")?)],
        };
        let body = if is_block {
            FunctionBody::Block(self.statement_list(body).into())
        } else {
            FunctionBody::Expr(self.commented(body))
        };

        Some(Function {
            kind,
            name: self.field_text(node, "name"),
            is_async: has_token(node, "async"),
            is_generator: has_token(node, "*"),
            type_params: self.field_text(node, "type_parameters"),
            params: params.into(),
            return_type: node_type_text(self, node, "return_type"),
            body,
        })
    }

    /// A comment goes to the parameter before it, or before the first one;
    /// `None` for a comment in an empty list
    fn params(&self, node: Node) -> Option<Vec<Param>> {
        let mut params: Vec<Param> = Vec::new();
        let mut leading = Vec::new();
        let mut after_param = false;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.is_extra() {
                let comment = self.text(child).to_string();
                match params.last_mut() {
                    Some(last) if after_param => last.comments.push(comment),
                    _ => leading.push(Modifier::Comment(comment)),
                }
            } else if child.is_named() {
                let mut param = self
                    .param(child)
                    .unwrap_or_else(|| Param::named(self.text(child)));
                let mut modifiers = std::mem::take(&mut leading);
                modifiers.append(&mut param.modifiers);
                param.modifiers = modifiers;
                params.push(param);
                after_param = true;
            } else {
                after_param = false;
            }
        }

        leading.is_empty().then_some(params)
    }

    fn param(&self, node: Node) -> Option<Param> {
        let optional = match node.kind() {
            node_kinds::REQUIRED_PARAMETER => false,
            node_kinds::OPTIONAL_PARAMETER => true,
            _ => return None,
        };
        let pattern = node.child_by_field_name("pattern")?;
        let rest = pattern.kind() == node_kinds::REST_PATTERN;
        let pattern_text = if rest {
            self.text(pattern).trim_start_matches("...").trim_start()
        } else {
            self.text(pattern)
        };

        let mut modifiers = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.start_byte() >= pattern.start_byte() {
                break;
            }
            match child.kind() {
                _ if child.is_extra() => modifiers.push(self.comment(child)),
                node_kinds::DECORATOR => modifiers.push(Modifier::Decorator(self.decorator(child))),
                node_kinds::ACCESSIBILITY_MODIFIER | node_kinds::OVERRIDE_MODIFIER => modifiers
                    .push(Modifier::Keyword(ModifierKeyword::from_keyword(self.text(child))?)),
                other => modifiers.push(Modifier::Keyword(ModifierKeyword::from_keyword(other)?)),
            }
        }
        // The whole parameter stays text when a comment follows its name
        if has_extra_child_after(node, pattern.start_byte()) {
            return None;
        }

        Some(Param {
            modifiers,
            pattern: pattern_text.to_string(),
            optional,
            rest,
            type_ann: node_type_text(self, node, "type"),
            default: node.child_by_field_name("value").map(|v| self.expr(v)),
            comments: Vec::new(),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════════

    fn expr(&self, node: Node) -> Expr {
        self.structured_expr(node)
            .unwrap_or_else(|| Expr::Verbatim(Arc::new(self.verbatim(node))))
    }

    fn structured_expr(&self, node: Node) -> Option<Expr> {
        let kind = node.kind();
        if is_literal_kind(kind) {
            return Some(Expr::Lit(self.text(node).to_string()));
        }
        if kind == node_kinds::CLASS {
            return self.class(node, Vec::new()).map(|c| Expr::Class(Arc::new(c)));
        }
        if is_function_value(kind) {
            let kind = if kind == node_kinds::ARROW_FUNCTION {
                FunctionKind::Arrow
            } else {
                FunctionKind::Expression
            };
            return self.function(node, kind).map(|f| Expr::Function(Arc::new(f)));
        }

        match kind {
            node_kinds::IDENTIFIER => Some(Expr::Ident(self.text(node).to_string())),
            node_kinds::THIS => Some(Expr::This),
            node_kinds::MEMBER_EXPRESSION => {
                let object = node.child_by_field_name("object")?;
                if !comments_anchored(node, &[object]) {
                    return None;
                }
                Some(Expr::Member(Arc::new(MemberExpr {
                    object: self.commented(object),
                    property: self.field_text(node, "property")?,
                    optional: has_optional_chain(node),
                })))
            }
            node_kinds::CALL_EXPRESSION => {
                let callee = node.child_by_field_name("function")?;
                let arguments = node.child_by_field_name("arguments")?;
                // Tagged templates have no argument list
                if arguments.kind() != node_kinds::ARGUMENTS {
                    return None;
                }
                let mut cursor = arguments.walk();
                let args = arguments
                    .named_children(&mut cursor)
                    .filter(|arg| !arg.is_extra())
                    .collect::<Vec<_>>();
                if !comments_anchored(node, &[callee]) || !comments_anchored(arguments, &args) {
                    return None;
                }
                Some(Expr::Call(Arc::new(CallExpr {
                    callee: self.commented(callee),
                    type_args: self.field_text(node, "type_arguments"),
                    args: args.iter().map(|arg| self.commented(*arg)).collect(),
                    optional: has_optional_chain(node),
                })))
            }
            node_kinds::AWAIT_EXPRESSION => {
                let arg = self.first_named(node)?;
                Some(Expr::Await(Arc::new(self.commented(arg))))
            }
            node_kinds::YIELD_EXPRESSION => {
                let arg = self.first_named(node);
                if !comments_anchored(node, arg.as_slice()) {
                    return None;
                }
                Some(Expr::Yield(Arc::new(YieldExpr {
                    delegate: has_token(node, "*"),
                    arg: arg.map(|arg| self.commented(arg)),
                })))
            }
            node_kinds::PARENTHESIZED_EXPRESSION => {
                let inner = self.first_named(node)?;
                // `(x as T)` and friends keep their text
                if node.named_child_count() != 1 || !comments_anchored(node, &[inner]) {
                    return None;
                }
                Some(Expr::Paren(Arc::new(self.commented(inner))))
            }
            node_kinds::BINARY_EXPRESSION
            | node_kinds::AUGMENTED_ASSIGNMENT_EXPRESSION
            | node_kinds::ASSIGNMENT_EXPRESSION => {
                let left = node.child_by_field_name("left")?;
                let right = node.child_by_field_name("right")?;
                if !comments_anchored(node, &[left, right]) {
                    return None;
                }
                let op = match kind {
                    node_kinds::ASSIGNMENT_EXPRESSION => "=".to_string(),
                    _ => self.field_text(node, "operator")?,
                };
                Some(Expr::Binary(Arc::new(BinaryExpr {
                    left: self.commented(left),
                    op,
                    right: self.commented(right),
                })))
            }
            node_kinds::UNARY_EXPRESSION => {
                let arg = node.child_by_field_name("argument")?;
                if !comments_anchored(node, &[arg]) {
                    return None;
                }
                Some(Expr::Unary(Arc::new(UnaryExpr {
                    op: self.field_text(node, "operator")?,
                    arg: self.commented(arg),
                })))
            }
            _ => None,
        }
    }

    /// `node` lowered with the comments attached to it
    fn commented(&self, node: Node) -> Expr {
        Expr::commented(
            &self.leading_comments(node),
            self.expr(node),
            &self.trailing_comments(node),
        )
    }

    /// Comments right before `node`, unless they already trail a named
    /// sibling
    fn leading_comments(&self, node: Node) -> Vec<String> {
        let mut comments = Vec::new();
        let mut prev = node.prev_sibling();
        while let Some(sibling) = prev {
            if !sibling.is_extra() {
                if sibling.is_named() {
                    return Vec::new();
                }
                break;
            }
            comments.push(self.text(sibling).to_string());
            prev = sibling.prev_sibling();
        }
        comments.reverse();
        comments
    }

    fn trailing_comments(&self, node: Node) -> Vec<String> {
        let mut comments = Vec::new();
        let mut next = node.next_sibling();
        while let Some(sibling) = next.filter(Node::is_extra) {
            comments.push(self.text(sibling).to_string());
            next = sibling.next_sibling();
        }
        comments
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Verbatim
    // ═══════════════════════════════════════════════════════════════════════

    fn verbatim(&self, node: Node) -> Verbatim {
        let mut parts = Vec::new();
        let mut offset = node.start_byte();

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.start_byte() > offset {
                push_text(&mut parts, self.slice(offset, child.start_byte()));
            }
            let kind = child.kind();
            if !child.is_named() || child.is_extra() {
                push_text(&mut parts, self.text(child));
            } else if is_statement_kind(kind) {
                parts.push(VerbatimPart::Stmt(self.stmt(child)));
            } else if is_expression_kind(kind) {
                parts.push(VerbatimPart::Expr(self.expr(child)));
            } else if child.child_count() == 0 {
                push_text(&mut parts, self.text(child));
            } else {
                parts.push(VerbatimPart::Group(self.verbatim(child)));
            }
            offset = offset.max(child.end_byte());
        }
        if node.end_byte() > offset {
            push_text(&mut parts, self.slice(offset, node.end_byte()));
        }

        Verbatim {
            kind: node.kind().to_string(),
            parts,
        }
    }

    fn slice(&self, start: usize, end: usize) -> &'s str {
        self.source.get(start..end).unwrap_or("")
    }

    fn first_named<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let first = node
            .named_children(&mut cursor)
            .find(|child| !child.is_extra());
        first
    }
}

/// Whether every comment directly under `node` is picked up by
/// `Lowering::commented` on one of `anchors`
fn comments_anchored(node: Node, anchors: &[Node]) -> bool {
    comments_anchored_after(node, node, anchors)
}

/// `comments_anchored`, for the comments that end after `start` ends
fn comments_anchored_after(node: Node, start: Node, anchors: &[Node]) -> bool {
    let is_anchor = |candidate: &Node| anchors.iter().any(|a| a.id() == candidate.id());
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    let threshold = if start.id() == node.id() { node.start_byte() } else { start.end_byte() };

    children.iter().enumerate().all(|(i, child)| {
        if !child.is_extra() || child.end_byte() <= threshold {
            return true;
        }
        let before = children[..i].iter().rev().find(|c| !c.is_extra());
        let after = children[i + 1..].iter().find(|c| !c.is_extra());
        match before {
            Some(before) if is_anchor(before) => true,
            Some(before) if before.is_named() => false,
            _ => after.is_some_and(|after| is_anchor(after)),
        }
    })
}

fn has_extra_child(node: Node) -> bool {
    has_extra_child_after(node, node.start_byte())
}

fn has_extra_child_after(node: Node, start: usize) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| child.is_extra() && child.start_byte() >= start);
    found
}

fn has_extra_descendant(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| child.is_extra() || has_extra_descendant(child));
    found
}

/// Type annotation text without its leading `:`
fn node_type_text(lowering: &Lowering<'_>, node: Node, field: &str) -> Option<String> {
    let text = lowering.text(node.child_by_field_name(field)?).trim_start();
    Some(text.strip_prefix(':').unwrap_or(text).trim().to_string())
}

/// Whether `node` has an anonymous `token` child
fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

fn has_optional_chain(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| matches!(child.kind(), node_kinds::OPTIONAL_CHAIN | "?."));
    found
}

fn push_text(parts: &mut Vec<VerbatimPart>, text: &str) {
    if text.is_empty() {
        return;
    }
    match parts.last_mut() {
        Some(VerbatimPart::Text(last)) => last.push_str(text),
        _ => parts.push(VerbatimPart::Text(text.to_string())),
    }
}

/// String literal contents without the surrounding quotes
fn unquote(literal: &str) -> &str {
    let trimmed = literal.trim();
    if trimmed.len() >= 2 {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}
