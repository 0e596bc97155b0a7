//! The rule trait rules implement.

use crate::config::RuleArguments;
use crate::context::FileContext;
use crate::types::Finding;

/// A per-file analysis rule.
///
/// Rules are mutually independent and stateless across invocations: any
/// mutable state lives inside one `apply` call. The engine forwards each
/// rule its configured [`RuleArguments`] without interpreting them.
///
/// How many findings one application may emit is a per-rule contract;
/// the engine imposes no cap. Each rule documents its own cardinality.
///
/// # Example
///
/// ```ignore
/// use lintel_core::{Finding, FileContext, Location, Rule, RuleArguments};
/// use lintel_core::walk::{walk_tree, Flow, NodeRef, Visitor};
///
/// pub struct NoEmptyFuncs;
///
/// impl Rule for NoEmptyFuncs {
///     fn name(&self) -> &'static str { "no-empty-funcs" }
///
///     fn apply(&self, ctx: &FileContext<'_>, _args: &RuleArguments) -> Vec<Finding> {
///         let mut visitor = EmptyFuncVisitor { ctx, findings: Vec::new() };
///         walk_tree(&mut visitor, ctx.tree());
///         visitor.findings
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g. `context-first`).
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Applies the rule to one file, returning its findings in emission order.
    fn apply(&self, ctx: &FileContext<'_>, args: &RuleArguments) -> Vec<Finding>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
