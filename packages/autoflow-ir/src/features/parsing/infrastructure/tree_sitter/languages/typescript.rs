//! TypeScript-specific tree-sitter configuration
//!
//! Node kind names of the tree-sitter-typescript grammar that the lowering
//! gives a dedicated syntax tree variant, plus the kind sets used to decide
//! what a child of an otherwise verbatim node becomes.

use lazy_static::lazy_static;
use std::collections::HashSet;

/// TypeScript tree-sitter node kinds
///
/// These constants match the exact node type names from tree-sitter-typescript grammar.
pub mod node_kinds {
    // Program structure
    pub const PROGRAM: &str = "program";
    pub const COMMENT: &str = "comment";
    pub const HASH_BANG_LINE: &str = "hash_bang_line";

    // Declarations
    pub const CLASS_DECLARATION: &str = "class_declaration";
    pub const ABSTRACT_CLASS_DECLARATION: &str = "abstract_class_declaration";
    /// Class expression (`const A = class {}`, `export default class {}`)
    pub const CLASS: &str = "class";
    pub const FUNCTION_DECLARATION: &str = "function_declaration";
    pub const GENERATOR_FUNCTION_DECLARATION: &str = "generator_function_declaration";
    pub const LEXICAL_DECLARATION: &str = "lexical_declaration";
    pub const VARIABLE_DECLARATION: &str = "variable_declaration";
    pub const VARIABLE_DECLARATOR: &str = "variable_declarator";

    // Class members
    pub const CLASS_BODY: &str = "class_body";
    pub const CLASS_HERITAGE: &str = "class_heritage";
    pub const METHOD_DEFINITION: &str = "method_definition";
    pub const PUBLIC_FIELD_DEFINITION: &str = "public_field_definition";
    pub const DECORATOR: &str = "decorator";
    pub const ACCESSIBILITY_MODIFIER: &str = "accessibility_modifier";
    pub const OVERRIDE_MODIFIER: &str = "override_modifier";

    // Functions
    pub const ARROW_FUNCTION: &str = "arrow_function";
    pub const FUNCTION_EXPRESSION: &str = "function_expression";
    /// Name of `function_expression` in older grammar releases
    pub const FUNCTION: &str = "function";
    pub const GENERATOR_FUNCTION: &str = "generator_function";

    // Parameters
    pub const FORMAL_PARAMETERS: &str = "formal_parameters";
    pub const REQUIRED_PARAMETER: &str = "required_parameter";
    pub const OPTIONAL_PARAMETER: &str = "optional_parameter";
    pub const REST_PATTERN: &str = "rest_pattern";

    // Import
    pub const IMPORT_STATEMENT: &str = "import_statement";
    pub const IMPORT_CLAUSE: &str = "import_clause";
    pub const NAMED_IMPORTS: &str = "named_imports";
    pub const IMPORT_SPECIFIER: &str = "import_specifier";
    pub const NAMESPACE_IMPORT: &str = "namespace_import";
    pub const EXPORT_STATEMENT: &str = "export_statement";

    // Statements
    pub const EXPRESSION_STATEMENT: &str = "expression_statement";
    pub const RETURN_STATEMENT: &str = "return_statement";
    pub const THROW_STATEMENT: &str = "throw_statement";
    pub const IF_STATEMENT: &str = "if_statement";
    pub const ELSE_CLAUSE: &str = "else_clause";
    pub const STATEMENT_BLOCK: &str = "statement_block";

    // Expressions
    pub const IDENTIFIER: &str = "identifier";
    pub const THIS: &str = "this";
    pub const MEMBER_EXPRESSION: &str = "member_expression";
    pub const CALL_EXPRESSION: &str = "call_expression";
    pub const ARGUMENTS: &str = "arguments";
    pub const AWAIT_EXPRESSION: &str = "await_expression";
    pub const YIELD_EXPRESSION: &str = "yield_expression";
    pub const PARENTHESIZED_EXPRESSION: &str = "parenthesized_expression";
    pub const BINARY_EXPRESSION: &str = "binary_expression";
    pub const ASSIGNMENT_EXPRESSION: &str = "assignment_expression";
    pub const AUGMENTED_ASSIGNMENT_EXPRESSION: &str = "augmented_assignment_expression";
    pub const UNARY_EXPRESSION: &str = "unary_expression";
    pub const OPTIONAL_CHAIN: &str = "optional_chain";
    pub const STRING: &str = "string";
}

lazy_static! {
    /// Literal kinds kept as their raw text
    pub static ref LITERAL_KINDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("string");
        set.insert("number");
        set.insert("regex");
        set.insert("true");
        set.insert("false");
        set.insert("null");
        set.insert("undefined");
        set.insert("super");
        set
    };

    /// Kinds that are statements wherever they appear
    pub static ref STATEMENT_KINDS: HashSet<&'static str> = {
        let mut set = HashSet::new();

        set.insert("expression_statement");
        set.insert("lexical_declaration");
        set.insert("variable_declaration");
        set.insert("return_statement");
        set.insert("throw_statement");
        set.insert("if_statement");
        set.insert("statement_block");
        set.insert("class_declaration");
        set.insert("abstract_class_declaration");
        set.insert("function_declaration");
        set.insert("generator_function_declaration");
        set.insert("import_statement");
        set.insert("export_statement");

        // Kept verbatim, but their children are still reached
        set.insert("for_statement");
        set.insert("for_in_statement");
        set.insert("while_statement");
        set.insert("do_statement");
        set.insert("try_statement");
        set.insert("switch_statement");
        set.insert("labeled_statement");
        set.insert("break_statement");
        set.insert("continue_statement");
        set.insert("empty_statement");
        set.insert("debugger_statement");

        set
    };

    /// Kinds that are expressions wherever they appear
    pub static ref EXPRESSION_KINDS: HashSet<&'static str> = {
        let mut set = HashSet::new();

        set.insert("identifier");
        set.insert("this");
        set.insert("member_expression");
        set.insert("call_expression");
        set.insert("await_expression");
        set.insert("yield_expression");
        set.insert("arrow_function");
        set.insert("function_expression");
        set.insert("function");
        set.insert("generator_function");
        set.insert("parenthesized_expression");
        set.insert("binary_expression");
        set.insert("assignment_expression");
        set.insert("augmented_assignment_expression");
        set.insert("unary_expression");

        // Kept verbatim, but their children are still reached
        set.insert("subscript_expression");
        set.insert("new_expression");
        set.insert("update_expression");
        set.insert("ternary_expression");
        set.insert("object");
        set.insert("array");
        set.insert("template_string");
        set.insert("as_expression");
        set.insert("satisfies_expression");
        set.insert("non_null_expression");
        set.insert("type_assertion");
        set.insert("sequence_expression");
        set.insert("spread_element");
        set.insert(node_kinds::CLASS);

        set
    };
}

pub fn is_literal_kind(kind: &str) -> bool {
    LITERAL_KINDS.contains(kind)
}

pub fn is_statement_kind(kind: &str) -> bool {
    STATEMENT_KINDS.contains(kind)
}

pub fn is_expression_kind(kind: &str) -> bool {
    EXPRESSION_KINDS.contains(kind) || is_literal_kind(kind)
}

/// Check if a node kind is a function value (as opposed to a declaration)
pub fn is_function_value(kind: &str) -> bool {
    matches!(
        kind,
        node_kinds::ARROW_FUNCTION
            | node_kinds::FUNCTION_EXPRESSION
            | node_kinds::FUNCTION
            | node_kinds::GENERATOR_FUNCTION
    )
}

/// Check if a node kind declares a class
pub fn is_class_declaration(kind: &str) -> bool {
    matches!(
        kind,
        node_kinds::CLASS_DECLARATION | node_kinds::ABSTRACT_CLASS_DECLARATION
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_sets_are_disjoint() {
        for kind in STATEMENT_KINDS.iter() {
            assert!(!is_expression_kind(kind), "{kind} is in both sets");
        }
    }

    #[test]
    fn test_function_value_predicate() {
        assert!(is_function_value(node_kinds::ARROW_FUNCTION));
        assert!(is_function_value(node_kinds::FUNCTION_EXPRESSION));
        assert!(!is_function_value(node_kinds::FUNCTION_DECLARATION));
    }

    #[test]
    fn test_literals_are_expressions() {
        assert!(is_expression_kind("number"));
        assert!(is_expression_kind("string"));
        assert!(!is_expression_kind("type_identifier"));
    }

    #[test]
    fn test_class_declaration_predicate() {
        assert!(is_class_declaration(node_kinds::ABSTRACT_CLASS_DECLARATION));
        assert!(!is_class_declaration(node_kinds::CLASS));
        assert!(is_expression_kind(node_kinds::CLASS));
    }
}
