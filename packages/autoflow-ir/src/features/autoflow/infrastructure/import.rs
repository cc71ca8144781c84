//! Import Injector
//!
//! Reserves the unit-scoped namespace identifier and builds the
//! `import * as <id> from "<package>";` statement.

use std::collections::HashSet;
use std::sync::Arc;

use crate::features::autoflow::domain::visit::{
    walk_class, walk_expr, walk_function, walk_member, walk_param, walk_stmt,
};
use crate::features::autoflow::domain::Visit;
use crate::shared::models::{
    ClassDecl, ClassMember, Expr, Function, ImportDecl, Param, SourceUnit, Stmt,
};
use crate::shared::utils::words::{ident_words, is_ident_char};

/// Every identifier-like word appearing anywhere in a unit
#[derive(Default)]
struct WordCollector {
    words: HashSet<String>,
}

impl WordCollector {
    fn add_words(&mut self, text: &str) {
        self.words.extend(ident_words(text).map(str::to_string));
    }

    fn add_opt(&mut self, text: Option<&str>) {
        if let Some(text) = text {
            self.add_words(text);
        }
    }
}

impl Visit for WordCollector {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Import(import) => {
                for name in import.local_names() {
                    self.add_words(name);
                }
            }
            Stmt::Var(var) => {
                for decl in &var.declarators {
                    self.add_words(&decl.name);
                    self.add_opt(decl.type_ann.as_deref());
                }
            }
            _ => {}
        }
        walk_stmt(self, stmt)
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(name) => self.add_words(name),
            Expr::Call(call) => self.add_opt(call.type_args.as_deref()),
            _ => {}
        }
        walk_expr(self, expr)
    }

    fn visit_class(&mut self, class: &ClassDecl) {
        self.add_opt(class.name.as_deref());
        self.add_opt(class.type_params.as_deref());
        self.add_opt(class.heritage.as_deref());
        walk_class(self, class)
    }

    fn visit_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Property(prop) => self.add_opt(prop.type_ann.as_deref()),
            ClassMember::Method(method) => {
                self.add_opt(method.type_params.as_deref());
                self.add_opt(method.return_type.as_deref());
            }
            ClassMember::Verbatim(_) => {}
        }
        walk_member(self, member)
    }

    fn visit_function(&mut self, function: &Function) {
        self.add_opt(function.name.as_deref());
        self.add_opt(function.type_params.as_deref());
        self.add_opt(function.return_type.as_deref());
        walk_function(self, function)
    }

    fn visit_param(&mut self, param: &Param) {
        self.add_words(&param.pattern);
        self.add_opt(param.type_ann.as_deref());
        walk_param(self, param)
    }

    fn visit_text(&mut self, text: &str) {
        self.add_words(text);
    }
}

/// Base of the generated name: the package path reduced to identifier characters
fn identifier_base(package: &str) -> String {
    let mut base: String = package
        .trim_start_matches('@')
        .chars()
        .map(|c| if is_ident_char(c) { c } else { '_' })
        .collect();
    if base.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        base.insert(0, '_');
    }
    base
}

/// Reserve `<package>_<n>` with the smallest `n >= 1` not already used as
/// any identifier-like word in `unit`
pub fn reserve_generated_identifier(unit: &SourceUnit, package: &str) -> String {
    let mut collector = WordCollector::default();
    for stmt in unit.statements.iter() {
        collector.visit_stmt(stmt);
    }

    let base = identifier_base(package);
    (1..)
        .map(|n| format!("{base}_{n}"))
        .find(|candidate| !collector.words.contains(candidate))
        .unwrap_or(base)
}

/// `import * as <local> from "<package>";`
pub fn namespace_import(local: &str, package: &str) -> Stmt {
    Stmt::Import(Arc::new(ImportDecl::namespace(local, package)))
}

/// `import` ahead of every existing top-level statement
pub fn prepend_import(statements: &[Stmt], import: Stmt) -> Vec<Stmt> {
    let mut prepended = Vec::with_capacity(statements.len() + 1);
    prepended.push(import);
    prepended.extend(statements.iter().cloned());
    prepended
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Verbatim, VarDecl, VarDeclarator, VarKind};

    fn var(name: &str) -> Stmt {
        Stmt::Var(Arc::new(VarDecl {
            kind: VarKind::Const,
            declarators: vec![VarDeclarator {
                name: name.to_string(),
                type_ann: None,
                init: None,
            }],
        }))
    }

    #[test]
    fn test_identifier_base() {
        assert_eq!(identifier_base("mobx-keystone"), "mobx_keystone");
        assert_eq!(identifier_base("@scope/pkg"), "scope_pkg");
        assert_eq!(identifier_base("3d"), "_3d");
    }

    #[test]
    fn test_reserved_identifier_avoids_existing_names() {
        let unit = SourceUnit::new(
            "x.ts",
            vec![
                var("mobx_keystone_1"),
                Stmt::Verbatim(Arc::new(Verbatim::text("for_statement", "for (mobx_keystone_2;;) {}"))),
            ],
        );
        assert_eq!(
            reserve_generated_identifier(&unit, "mobx-keystone"),
            "mobx_keystone_3"
        );
    }

    #[test]
    fn test_reserved_identifier_on_empty_unit() {
        let unit = SourceUnit::new("x.ts", vec![]);
        assert_eq!(
            reserve_generated_identifier(&unit, "mobx-keystone"),
            "mobx_keystone_1"
        );
    }

    #[test]
    fn test_prepend_import_goes_first() {
        let statements = vec![var("a"), var("b")];
        let prepended = prepend_import(&statements, namespace_import("ns", "pkg"));
        assert_eq!(prepended.len(), 3);
        assert!(matches!(&prepended[0], Stmt::Import(import) if import.source == "pkg"));
        assert_eq!(&prepended[1..], &statements[..]);
    }
}
