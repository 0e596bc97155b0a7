//! The syntax-tree model rules analyze.
//!
//! The engine does not parse source text. A frontend parses each file and
//! hands the engine one [`SourceTree`] per file: an owned, thread-safe
//! extraction of the declarations and expressions the rules care about.
//! Trees are read-only once built.
//!
//! Qualified names are dot-separated (e.g. `app.server.Context`).

/// Identifier of a node within one tree, assigned by the frontend.
///
/// Symbol tables key type lookups off this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Source position of a node (1-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

impl Span {
    /// Creates a span from line and column.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The parsed representation of one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTree {
    /// Declared package identifier of the file (dot-qualified).
    pub package: String,
    /// Top-level items in declaration order.
    pub items: Vec<Item>,
}

impl SourceTree {
    /// Creates an empty tree for the given package.
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            items: Vec::new(),
        }
    }

    /// Appends a top-level item.
    #[must_use]
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Iterates over the function declarations of this file.
    pub fn funcs(&self) -> impl Iterator<Item = &FuncDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Func(decl) => Some(decl),
            Item::Import(_) => None,
        })
    }
}

/// A top-level item of a source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// An import of another package.
    Import(Import),
    /// A function or method declaration.
    Func(FuncDecl),
}

/// An import statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    /// Imported package path (dot-qualified).
    pub path: String,
    /// Position of the import.
    pub span: Span,
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    /// Function name.
    pub name: String,
    /// Receiver type name, present for method declarations.
    pub receiver: Option<String>,
    /// Declared parameters, in order. The receiver is not a parameter.
    pub params: Vec<Param>,
    /// Statement expressions of the body, in order.
    pub body: Vec<Expr>,
    /// Position of the declaration.
    pub span: Span,
}

impl FuncDecl {
    /// Creates a parameterless free function.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            params: Vec::new(),
            body: Vec::new(),
            span,
        }
    }

    /// Sets the receiver type, making this a method declaration.
    #[must_use]
    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            ty: ty.into(),
            span: self.span,
        });
        self
    }

    /// Appends a body expression.
    #[must_use]
    pub fn with_body_expr(mut self, expr: Expr) -> Self {
        self.body.push(expr);
        self
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Declared type (dot-qualified).
    pub ty: String,
    /// Position of the parameter.
    pub span: Span,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// Frontend-assigned node id.
    pub id: NodeId,
    /// Expression kind.
    pub kind: ExprKind,
    /// Position of the expression.
    pub span: Span,
}

impl Expr {
    /// Creates an expression node.
    #[must_use]
    pub fn new(id: NodeId, kind: ExprKind, span: Span) -> Self {
        Self { id, kind, span }
    }
}

/// The kinds of expression the model distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A name reference.
    Name(String),
    /// A literal, carried as its source text.
    Lit(String),
    /// A call with nested argument expressions.
    Call {
        /// Called function (dot-qualified).
        func: String,
        /// Argument expressions, in order.
        args: Vec<Expr>,
    },
}
