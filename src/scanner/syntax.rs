//! Tree-sitter front-end for Go sources.
//!
//! Produces the package clause and the top-level function declarations of a
//! file in the parser-neutral shape of [`FuncDecl`].

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use super::decl::{FuncDecl, Param};
use crate::error::ScanError;

const MAX_SNIPPET_LEN: usize = 32;

/// First syntax problem found in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    pub package: Option<String>,
    pub functions: Vec<FuncDecl>,
    pub syntax_issue: Option<SyntaxIssue>,
}

pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self, ScanError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ScanError::language_setup_failed(e.to_string()))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str, path: &Path) -> Result<SourceFile, ScanError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ScanError::parse_failed(path))?;
        Ok(extract(&tree, source.as_bytes()))
    }
}

pub fn extract(tree: &Tree, source: &[u8]) -> SourceFile {
    let root = tree.root_node();
    let mut file = SourceFile::default();

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "package_clause" if file.package.is_none() => {
                file.package = package_name(child, source);
            }
            "function_declaration" => {
                if let Some(decl) = function_decl(child, source) {
                    file.functions.push(decl);
                }
            }
            _ => {}
        }
    }

    if root.has_error() {
        file.syntax_issue = first_issue(root, source);
    }

    file
}

fn package_name(node: Node, source: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let ident = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "package_identifier")?;
    Some(get_node_text(&ident, source))
}

fn function_decl(node: Node, source: &[u8]) -> Option<FuncDecl> {
    let name = node.child_by_field_name("name")?;
    let params = node
        .child_by_field_name("parameters")
        .map(|list| parameters(list, source))
        .unwrap_or_default();
    Some(FuncDecl::new(get_node_text(&name, source), params))
}

fn parameters(list: Node, source: &[u8]) -> Vec<Param> {
    let mut params = Vec::new();
    let mut cursor = list.walk();

    for decl in list.named_children(&mut cursor) {
        let variadic = match decl.kind() {
            "parameter_declaration" => false,
            "variadic_parameter_declaration" => true,
            _ => continue,
        };

        let type_expr = match decl.child_by_field_name("type") {
            Some(ty) if variadic => format!("...{}", type_string(ty, source)),
            Some(ty) => type_string(ty, source),
            None => String::new(),
        };

        let mut name_cursor = decl.walk();
        let names: Vec<String> = decl
            .children_by_field_name("name", &mut name_cursor)
            .map(|n| get_node_text(&n, source))
            .collect();

        if names.is_empty() {
            params.push(Param::new(None, type_expr));
        } else {
            for name in &names {
                params.push(Param::new(Some(name.as_str()), type_expr.clone()));
            }
        }
    }

    params
}

/// Renders a type the way `go/types.ExprString` would: no whitespace inside
/// selectors or pointer stars, so `* testing . T` becomes `*testing.T`.
pub fn type_string(node: Node, source: &[u8]) -> String {
    match node.kind() {
        "pointer_type" => match first_named(node) {
            Some(inner) => format!("*{}", type_string(inner, source)),
            None => collapse_whitespace(&get_node_text(&node, source)),
        },
        "qualified_type" => {
            let package = node.child_by_field_name("package");
            let name = node.child_by_field_name("name");
            match (package, name) {
                (Some(p), Some(n)) => format!(
                    "{}.{}",
                    get_node_text(&p, source),
                    get_node_text(&n, source)
                ),
                _ => collapse_whitespace(&get_node_text(&node, source)),
            }
        }
        "parenthesized_type" => match first_named(node) {
            Some(inner) => format!("({})", type_string(inner, source)),
            None => collapse_whitespace(&get_node_text(&node, source)),
        },
        "slice_type" => match node.child_by_field_name("element") {
            Some(elem) => format!("[]{}", type_string(elem, source)),
            None => collapse_whitespace(&get_node_text(&node, source)),
        },
        "map_type" => {
            let key = node.child_by_field_name("key");
            let value = node.child_by_field_name("value");
            match (key, value) {
                (Some(k), Some(v)) => format!(
                    "map[{}]{}",
                    type_string(k, source),
                    type_string(v, source)
                ),
                _ => collapse_whitespace(&get_node_text(&node, source)),
            }
        }
        _ => collapse_whitespace(&get_node_text(&node, source)),
    }
}

fn first_named(node: Node) -> Option<Node> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment");
    found
}

fn first_issue(node: Node, source: &[u8]) -> Option<SyntaxIssue> {
    if node.is_missing() {
        let pos = node.start_position();
        return Some(SyntaxIssue {
            line: pos.row + 1,
            column: pos.column + 1,
            message: format!("syntax error: missing {}", node.kind()),
        });
    }

    if node.is_error() {
        let pos = node.start_position();
        return Some(SyntaxIssue {
            line: pos.row + 1,
            column: pos.column + 1,
            message: format!(
                "syntax error: unexpected {}",
                snippet(&get_node_text(&node, source))
            ),
        });
    }

    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(issue) = first_issue(child, source) {
            return Some(issue);
        }
    }
    None
}

fn snippet(text: &str) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return "input".to_string();
    }
    let short: String = line.chars().take(MAX_SNIPPET_LEN).collect();
    format!("'{short}'")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn get_node_text(node: &Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or("").to_string()
}
