//! Semantic classification of TypeScript syntax nodes.
//!
//! Several concrete tree-sitter node kinds stand for one concept (a named
//! function, a method, an arrow function and a function expression are all
//! callables). Rules ask these predicates instead of matching kinds
//! themselves, so every rule agrees on what a function or a class is.

use tree_sitter::Node;

/// The concrete syntactic form of a function-like node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionForm {
    Declaration,
    Generator,
    Expression,
    Arrow,
    Method,
    /// A declaration without a body: overloads, `declare function` and
    /// abstract methods.
    Signature,
}

/// Semantic class of a node, as far as the rules care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Function(FunctionForm),
    Class,
    NumericLiteral,
    AnyType,
    NonNullAssertion,
    Other,
}

/// Classify a node by its kind and immediate shape.
///
/// Anonymous nodes are always `Other`: the `function` and `class`
/// keywords share their kind names with named expression nodes.
pub fn classify(node: Node) -> NodeClass {
    if !node.is_named() {
        return NodeClass::Other;
    }

    match node.kind() {
        "function_declaration" => NodeClass::Function(FunctionForm::Declaration),
        "generator_function_declaration" | "generator_function" => {
            NodeClass::Function(FunctionForm::Generator)
        }
        "function_expression" | "function" => NodeClass::Function(FunctionForm::Expression),
        "arrow_function" => NodeClass::Function(FunctionForm::Arrow),
        "method_definition" => NodeClass::Function(FunctionForm::Method),
        "function_signature" => NodeClass::Function(FunctionForm::Signature),
        "method_signature" | "abstract_method_signature" if is_class_member(node) => {
            NodeClass::Function(FunctionForm::Signature)
        }
        "class_declaration" | "abstract_class_declaration" | "class" => NodeClass::Class,
        "number" => NodeClass::NumericLiteral,
        "predefined_type" if is_any_keyword(node) => NodeClass::AnyType,
        "non_null_expression" => NodeClass::NonNullAssertion,
        _ => NodeClass::Other,
    }
}

/// Named functions, methods, arrow functions and function expressions,
/// including their body-less signatures.
pub fn is_function_like(node: Node) -> bool {
    matches!(classify(node), NodeClass::Function(_))
}

/// Class declarations and class expressions.
pub fn is_class_like(node: Node) -> bool {
    classify(node) == NodeClass::Class
}

/// Whether `parent`, the immediate parent of a literal, names the value:
/// a variable initializer, enum member, object property or class property.
pub fn is_declaration_context(parent: Option<Node>) -> bool {
    parent.is_some_and(|p| {
        matches!(
            p.kind(),
            "variable_declarator" | "enum_assignment" | "pair" | "public_field_definition"
        )
    })
}

/// Method signatures also appear in interfaces and object types, which
/// only describe a shape.
fn is_class_member(node: Node) -> bool {
    node.parent().is_some_and(|p| p.kind() == "class_body")
}

fn is_any_keyword(node: Node) -> bool {
    node.child_count() == 1 && node.child(0).is_some_and(|c| c.kind() == "any")
}
