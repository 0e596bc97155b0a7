//! # lintel-rules
//!
//! Built-in lint rules for lintel.
//!
//! Every rule here follows the same template: a unit struct implementing
//! [`lintel_core::Rule`], a walk visitor doing the per-node work, and the
//! rule's own interpretation of its [`lintel_core::RuleArguments`].
//!
//! ## Available Rules
//!
//! | Name | Category | Description |
//! |------|----------|-------------|
//! | `context-first` | `arg-order` | Requires the context parameter to be the first parameter |
//!
//! ## Usage
//!
//! ```ignore
//! use lintel_core::Linter;
//! use lintel_rules::ContextFirst;
//!
//! let linter = Linter::builder()
//!     .rule(ContextFirst::new())
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context_first;

pub use context_first::ContextFirst;

use lintel_core::RuleBox;

/// Returns the default set of rules.
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    vec![Box::new(ContextFirst::new())]
}
