//! Context handed to rules during application.

use std::path::Path;

use crate::file::SourceFile;
use crate::package::Package;
use crate::symbols::TypeName;
use crate::syntax::{Expr, SourceTree, Span};
use crate::types::Location;

/// Context provided to per-file rules.
///
/// Carries the file under analysis and a borrow of its owning package, the
/// rule's route to package-level queries (type information, derived caches).
#[derive(Clone, Copy)]
pub struct FileContext<'a> {
    /// The file being analyzed.
    pub file: &'a SourceFile,
    /// The package owning the file.
    pub package: &'a Package,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(file: &'a SourceFile, package: &'a Package) -> Self {
        Self { file, package }
    }

    /// Path of the file being analyzed.
    #[must_use]
    pub fn path(&self) -> &'a Path {
        self.file.path()
    }

    /// Parsed tree of the file being analyzed.
    #[must_use]
    pub fn tree(&self) -> &'a SourceTree {
        self.file.tree()
    }

    /// Resolves the type of an expression via the package's symbol table.
    ///
    /// `None` when type information is unavailable; rules are expected to
    /// degrade, not fail.
    #[must_use]
    pub fn type_of(&self, expr: &Expr) -> Option<TypeName> {
        self.package.type_of(expr)
    }

    /// Builds a [`Location`] in this file from a tree span.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        Location::from_span(self.file.path().to_path_buf(), span)
    }
}
