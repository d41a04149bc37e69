//! Parser-independent view of a Go function declaration and the predicate
//! that decides whether a declaration is a test.

/// One declared parameter. `func f(a, b int)` yields two params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Option<String>,
    /// Canonical textual form of the type, e.g. `*testing.T`.
    pub type_expr: String,
}

impl Param {
    pub fn new(name: Option<&str>, type_expr: impl Into<String>) -> Self {
        Self {
            name: name.map(str::to_string),
            type_expr: type_expr.into(),
        }
    }
}

/// A top-level function (methods are never represented).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<Param>,
}

impl FuncDecl {
    pub fn new(name: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

pub trait DeclPredicate: Send + Sync {
    fn matches(&self, decl: &FuncDecl) -> bool;
}

pub const DEFAULT_TEST_PREFIX: &str = "Test";
pub const DEFAULT_PARAM_TYPE: &str = "*testing.T";

/// Name prefix plus exactly one parameter of the given type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSignature {
    pub prefix: String,
    pub param_type: String,
}

impl TestSignature {
    pub fn new(prefix: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            param_type: param_type.into(),
        }
    }
}

impl Default for TestSignature {
    fn default() -> Self {
        Self::new(DEFAULT_TEST_PREFIX, DEFAULT_PARAM_TYPE)
    }
}

impl DeclPredicate for TestSignature {
    fn matches(&self, decl: &FuncDecl) -> bool {
        decl.name.starts_with(&self.prefix)
            && decl.params.len() == 1
            && decl.params[0].type_expr == self.param_type
    }
}
