//! One source file and its rule-application logic.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;
use tracing::{debug, error};

use crate::config::Config;
use crate::context::FileContext;
use crate::package::Package;
use crate::rule::RuleBox;
use crate::syntax::SourceTree;
use crate::types::Finding;

/// The canonical entry-package identifier.
pub const ENTRY_PACKAGE: &str = "main";

/// One parsed source file owned by a [`Package`].
///
/// The tree is read-only after construction; files are disjoint, so one
/// worker per file can run without sharing any mutable state.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    tree: SourceTree,
}

impl SourceFile {
    /// Creates a source file from its path and parsed tree.
    #[must_use]
    pub fn new(path: PathBuf, tree: SourceTree) -> Self {
        Self { path, tree }
    }

    /// Path of this file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed tree of this file.
    #[must_use]
    pub fn tree(&self) -> &SourceTree {
        &self.tree
    }

    /// Whether this file declares the entry package.
    ///
    /// A pure structural predicate over the immutable tree: true iff the
    /// file's declared package identifier is [`ENTRY_PACKAGE`].
    #[must_use]
    pub fn is_entry_file(&self) -> bool {
        self.tree.package == ENTRY_PACKAGE
    }

    /// Runs every enabled rule against this file, sending findings into `sink`.
    ///
    /// Rules run sequentially and each rule's findings are sent in its own
    /// emission order. A rule that panics is logged and skipped; it cannot
    /// poison the sink or the session's join barrier. Sending stops silently
    /// once the consumer has hung up.
    pub fn apply(
        &self,
        package: &Package,
        rules: &[RuleBox],
        config: &Config,
        sink: &Sender<Finding>,
    ) {
        let ctx = FileContext::new(self, package);

        for rule in rules {
            if !config.is_rule_enabled(rule.name()) {
                debug!("skipping disabled rule {}", rule.name());
                continue;
            }

            let args = config.arguments_for(rule.name());
            match catch_unwind(AssertUnwindSafe(|| rule.apply(&ctx, args))) {
                Ok(findings) => {
                    for finding in findings {
                        if sink.send(finding).is_err() {
                            return;
                        }
                    }
                }
                Err(_) => {
                    error!(
                        "rule {} panicked on {}; skipping it for this file",
                        rule.name(),
                        self.path.display()
                    );
                }
            }
        }
    }
}
