//! Build context: decides which `.go` files of a directory take part in a
//! build for the configured GOOS/GOARCH and tags.

use std::env;

pub const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

pub const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

pub const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

/// Highest `go1.N` release tag considered satisfied.
pub const GO_RELEASE_MINOR: u32 = 24;

const GO_BUILD_PREFIX: &str = "//go:build";
const PLUS_BUILD_PREFIX: &str = "+build";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub goos: String,
    pub goarch: String,
    pub tags: Vec<String>,
    /// Satisfies the `cgo` tag. On by default for native builds only.
    pub cgo: bool,
}

impl BuildContext {
    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        let goos = goos.into();
        let goarch = goarch.into();
        let cgo = goos == host_goos() && goarch == host_goarch();
        Self {
            goos,
            goarch,
            tags: Vec::new(),
            cgo,
        }
    }

    /// `$GOOS`/`$GOARCH` when set, otherwise the host platform.
    pub fn host() -> Self {
        let goos = env::var("GOOS")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| host_goos().to_string());
        let goarch = env::var("GOARCH")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| host_goarch().to_string());
        Self::new(goos, goarch).with_cgo_from_env()
    }

    /// `CGO_ENABLED=0|1` overrides the native-build default.
    pub fn with_cgo_from_env(self) -> Self {
        match env::var("CGO_ENABLED").as_deref() {
            Ok("1") => self.with_cgo(true),
            Ok("0") => self.with_cgo(false),
            _ => self,
        }
    }

    pub fn with_cgo(mut self, cgo: bool) -> Self {
        self.cgo = cgo;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn match_tag(&self, tag: &str) -> bool {
        if tag == self.goos || tag == self.goarch {
            return true;
        }
        match (self.goos.as_str(), tag) {
            ("android", "linux") | ("illumos", "solaris") | ("ios", "darwin") => return true,
            _ => {}
        }
        if tag == "unix" && UNIX_OS.contains(&self.goos.as_str()) {
            return true;
        }
        if tag == "gc" {
            return true;
        }
        if tag == "cgo" {
            return self.cgo;
        }
        if let Some(minor) = tag.strip_prefix("go1.") {
            if let Ok(minor) = minor.parse::<u32>() {
                return minor <= GO_RELEASE_MINOR;
            }
        }
        self.tags.iter().any(|t| t == tag)
    }

    /// Applies the `_GOOS`, `_GOARCH` and `_GOOS_GOARCH` file name rules.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let stem = file_name.split('.').next().unwrap_or(file_name);
        let Some(idx) = stem.find('_') else {
            return true;
        };
        let rest = &stem[idx..];
        let rest = rest.strip_suffix("_test").unwrap_or(rest);

        let parts: Vec<&str> = rest.split('_').collect();
        let n = parts.len();

        if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.match_tag(parts[n - 2]) && self.match_tag(parts[n - 1]);
        }
        if n >= 1 && (KNOWN_OS.contains(&parts[n - 1]) || KNOWN_ARCH.contains(&parts[n - 1])) {
            return self.match_tag(parts[n - 1]);
        }
        true
    }

    /// Evaluates the constraint comments in the file header. A `//go:build`
    /// line wins over `// +build` lines.
    pub fn matches_source(&self, source: &str) -> Result<bool, String> {
        let header = Header::scan(source)?;

        if let Some(expr) = header.go_build {
            let expr = Expr::parse(&expr)?;
            return Ok(expr.eval(&|tag| self.match_tag(tag)));
        }

        Ok(header
            .plus_build
            .iter()
            .all(|line| self.matches_plus_build_line(line)))
    }

    fn matches_plus_build_line(&self, line: &str) -> bool {
        line.split_whitespace().any(|option| {
            option.split(',').all(|term| match term.strip_prefix('!') {
                Some(tag) => !tag.is_empty() && !self.match_tag(tag),
                None => !term.is_empty() && self.match_tag(term),
            })
        })
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::host()
    }
}

pub fn host_goos() -> &'static str {
    match env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

pub fn host_goarch() -> &'static str {
    match env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        "powerpc" => "ppc",
        "loongarch64" => "loong64",
        "wasm32" => "wasm",
        other => other,
    }
}

#[derive(Debug, Default)]
struct Header {
    go_build: Option<String>,
    plus_build: Vec<String>,
}

impl Header {
    /// Reads the comment block preceding the package clause. `// +build`
    /// lines only count when a blank line follows them.
    fn scan(source: &str) -> Result<Self, String> {
        let mut header = Header::default();
        let mut pending = Vec::new();
        let mut in_block_comment = false;

        for line in source.lines() {
            let line = line.trim();

            if in_block_comment {
                if line.contains("*/") {
                    in_block_comment = false;
                }
                continue;
            }
            if line.is_empty() {
                header.plus_build.append(&mut pending);
                continue;
            }
            if let Some(comment) = line.strip_prefix("//") {
                if let Some(expr) = line.strip_prefix(GO_BUILD_PREFIX) {
                    if expr.is_empty() || expr.starts_with(char::is_whitespace) {
                        if header.go_build.is_some() {
                            return Err("multiple //go:build comments".to_string());
                        }
                        header.go_build = Some(expr.trim().to_string());
                    }
                } else if let Some(args) = comment.trim_start().strip_prefix(PLUS_BUILD_PREFIX) {
                    if args.is_empty() || args.starts_with(char::is_whitespace) {
                        pending.push(args.trim().to_string());
                    }
                }
                continue;
            }
            if line.starts_with("/*") {
                in_block_comment = !line.contains("*/");
                continue;
            }
            break;
        }

        Ok(header)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Tag(String),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn parse(input: &str) -> Result<Self, String> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err("empty //go:build expression".to_string());
        }
        let mut parser = ExprParser { tokens, pos: 0 };
        let expr = parser.or()?;
        if let Some(token) = parser.peek() {
            return Err(format!("unexpected token {token:?}"));
        }
        Ok(expr)
    }

    pub fn eval(&self, matches: &dyn Fn(&str) -> bool) -> bool {
        match self {
            Expr::Tag(tag) => matches(tag),
            Expr::Not(inner) => !inner.eval(matches),
            Expr::And(a, b) => a.eval(matches) && b.eval(matches),
            Expr::Or(a, b) => a.eval(matches) || b.eval(matches),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Not,
    And,
    Or,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '!' => {
                chars.next();
                tokens.push(Token::Not);
            }
            '&' | '|' => {
                chars.next();
                if chars.next() != Some(c) {
                    return Err(format!("unexpected '{c}'"));
                }
                tokens.push(if c == '&' { Token::And } else { Token::Or });
            }
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '.' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident));
            }
            other => return Err(format!("invalid character '{other}'")),
        }
    }

    Ok(tokens)
}

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn or(&mut self) -> Result<Expr, String> {
        let mut left = self.and()?;
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            let right = self.and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Expr, String> {
        let mut left = self.not()?;
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            let right = self.not()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn not(&mut self) -> Result<Expr, String> {
        if self.peek() == Some(&Token::Not) {
            self.pos += 1;
            return Ok(Expr::Not(Box::new(self.not()?)));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Expr, String> {
        match self.advance() {
            Some(Token::Ident(tag)) => Ok(Expr::Tag(tag)),
            Some(Token::LParen) => {
                let expr = self.or()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(expr),
                    _ => Err("missing )".to_string()),
                }
            }
            Some(token) => Err(format!("unexpected token {token:?}")),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}
