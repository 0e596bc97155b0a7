//! # lintel-core
//!
//! Core framework of the lintel static-analysis engine.
//!
//! A frontend parses each source file into a [`SourceTree`], groups the
//! files into [`Package`]s sharing one optional [`SymbolTable`], and hands
//! them to a [`Linter`]. The linter runs every configured [`Rule`] against
//! every file, one concurrent worker per file, and streams [`Finding`]s
//! back incrementally.
//!
//! This crate provides:
//!
//! - the [`Package`] / [`SourceFile`] data model with thread-safe,
//!   lazily-computed derived queries (entry-point detection, capability-set
//!   detection)
//! - the [`Rule`] trait and [`FileContext`] for per-file rules
//! - the [`walk`] traversal protocol shared by rules and derived scans
//! - the [`Linter`] session orchestration and its [`Findings`] stream
//!
//! ## Example
//!
//! ```ignore
//! use lintel_core::{Linter, Package, SourceFile};
//!
//! let linter = Linter::builder()
//!     .rule(MyRule::new())
//!     .config(config)
//!     .build();
//!
//! for finding in linter.lint(packages) {
//!     println!("{finding}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
mod file;
mod linter;
mod package;
mod rule;
mod symbols;
mod types;

pub mod syntax;
pub mod utils;
pub mod walk;

pub use config::{Config, ConfigError, RuleArguments, RuleSettings, DEFAULT_CAPABILITY_METHODS};
pub use context::FileContext;
pub use file::{SourceFile, ENTRY_PACKAGE};
pub use linter::{Findings, Linter, LinterBuilder};
pub use package::Package;
pub use rule::{Rule, RuleBox};
pub use symbols::{SymbolTable, TypeName};
pub use syntax::SourceTree;
pub use types::{Finding, FindingDiagnostic, Location};
