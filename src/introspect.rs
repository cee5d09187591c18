//! Python source introspection with tree-sitter.
//!
//! Answers two questions about a single module file: which top-level classes
//! it declares, and which methods a given top-level class declares. Only
//! direct children count: nested classes, nested functions, inherited or
//! imported names are never reported. Decorators do not count as nesting, so
//! `@dataclass class X` and `@staticmethod def f` are found.
//!
//! Every call reads and parses the file again. A long-lived caller wanting to
//! reuse trees would key a cache here on (path, modification time).

use std::path::Path;

use tree_sitter::{Language, Node, Parser, Tree};

use crate::errors::CompleteError;

/// Extension of the module files this introspector understands.
pub const SOURCE_EXTENSION: &str = "py";

/// Return the Tree-sitter [`Language`] grammar for Python sources.
fn grammar() -> Language {
    tree_sitter_python::LANGUAGE.into()
}

/// Create a new [`Parser`] configured for Python.
fn get_parser() -> Result<Parser, CompleteError> {
    let mut parser = Parser::new();
    parser.set_language(&grammar())?;
    Ok(parser)
}

/// A parsed module: the tree plus the text its byte ranges refer to.
struct ParsedSource {
    tree: Tree,
    source: String,
}

impl ParsedSource {
    fn text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn name_of(&self, node: Node) -> Option<&str> {
        node.child_by_field_name("name").map(|n| self.text(n))
    }
}

/// Reads class and method declarations out of module files.
#[derive(Debug, Clone, Default)]
pub struct Introspector {
    include_async: bool,
}

impl Introspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also report `async def` members as methods.
    pub fn include_async(mut self, yes: bool) -> Self {
        self.include_async = yes;
        self
    }

    /// Names of top-level classes in `file` starting with `prefix`, in
    /// declaration order.
    pub fn find_class_names(&self, file: &Path, prefix: &str) -> Result<Vec<String>, CompleteError> {
        let parsed = parse_module(file)?;
        let names = top_level_classes(parsed.tree.root_node())
            .into_iter()
            .filter_map(|class| parsed.name_of(class))
            .filter(|name| name.starts_with(prefix))
            .map(str::to_string)
            .collect();
        Ok(names)
    }

    /// Names of methods of the top-level class `class_name` in `file` starting
    /// with `prefix`, in declaration order.
    ///
    /// The class name must match exactly. When several top-level classes share
    /// it, the first one declared is used. An absent class yields no names.
    pub fn find_method_names(
        &self,
        file: &Path,
        class_name: &str,
        prefix: &str,
    ) -> Result<Vec<String>, CompleteError> {
        let parsed = parse_module(file)?;
        let Some(class) = top_level_classes(parsed.tree.root_node())
            .into_iter()
            .find(|&class| parsed.name_of(class) == Some(class_name))
        else {
            tracing::debug!(file = %file.display(), class_name, "class not declared");
            return Ok(Vec::new());
        };

        let Some(body) = class.child_by_field_name("body") else {
            return Ok(Vec::new());
        };
        let mut cursor = body.walk();
        let names = body
            .named_children(&mut cursor)
            .filter_map(unwrap_decorated)
            .filter(|member| member.kind() == "function_definition")
            .filter(|&member| self.include_async || !is_async(member))
            .filter_map(|member| parsed.name_of(member))
            .filter(|name| name.starts_with(prefix))
            .map(str::to_string)
            .collect();
        Ok(names)
    }
}

/// Read and parse `file`, failing on unreadable text or any syntax error.
fn parse_module(file: &Path) -> Result<ParsedSource, CompleteError> {
    let source = std::fs::read_to_string(file).map_err(|source| CompleteError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    let mut parser = get_parser()?;
    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| anyhow::anyhow!("parser produced no tree for {}", file.display()))?;

    if let Some(node) = first_error(tree.root_node()) {
        let pos = node.start_position();
        return Err(CompleteError::Parse {
            path: file.to_path_buf(),
            line: pos.row + 1,
            column: pos.column + 1,
        });
    }
    Ok(ParsedSource { tree, source })
}

/// Find the first `ERROR` or `MISSING` node in document order.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i as u32)
            && let Some(found) = first_error(child)
        {
            return Some(found);
        }
    }
    // `has_error` was set but no child carried it; report the node itself.
    Some(node)
}

/// The class definitions that are direct children of the module.
fn top_level_classes(module: Node) -> Vec<Node> {
    let mut cursor = module.walk();
    module
        .named_children(&mut cursor)
        .filter_map(unwrap_decorated)
        .filter(|node| node.kind() == "class_definition")
        .collect()
}

/// See through `@decorator` wrappers to the definition they decorate.
fn unwrap_decorated(node: Node) -> Option<Node> {
    if node.kind() == "decorated_definition" {
        node.child_by_field_name("definition")
    } else {
        Some(node)
    }
}

/// Whether a `function_definition` node is an `async def`.
fn is_async(function: Node) -> bool {
    function.child(0).is_some_and(|first| first.kind() == "async")
}
