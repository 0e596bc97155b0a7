//! Rule requiring the context parameter to come first.
//!
//! # Rationale
//!
//! A context value threads deadlines and request-scoped data through a call
//! chain; by convention it is always the first parameter, so a context
//! buried later in the signature is almost certainly a mistake.
//!
//! # Arguments
//!
//! - `0` (string, optional): the designated context type, overriding the
//!   default `Context`. Matched as a dot-qualified tail, so `Context` also
//!   matches `app.Context`.
//!
//! # Cardinality
//!
//! At most one finding per function declaration: scanning stops at the
//! first misplaced context parameter, however many there are.

use lintel_core::utils::type_matches;
use lintel_core::walk::{walk_tree, Flow, NodeRef, Visitor};
use lintel_core::{FileContext, Finding, Rule, RuleArguments};
use tracing::debug;

/// Rule name for context-first.
pub const NAME: &str = "context-first";

/// Category attached to findings of this rule.
pub const CATEGORY: &str = "arg-order";

/// Documentation reference attached to findings of this rule.
pub const REFERENCE: &str = "https://lintel-rs.github.io/rules/context-first";

const DEFAULT_CONTEXT_TYPE: &str = "Context";
const CONFIDENCE: f64 = 0.9;

/// Requires the designated context-like parameter to be the first parameter
/// of every function that takes more than one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextFirst;

impl ContextFirst {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for ContextFirst {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Requires the context parameter to be the first parameter of a function"
    }

    fn apply(&self, ctx: &FileContext<'_>, args: &RuleArguments) -> Vec<Finding> {
        let context_type = args
            .get(0)
            .and_then(toml::Value::as_str)
            .unwrap_or(DEFAULT_CONTEXT_TYPE)
            .to_owned();
        debug!("applying {} with context type {}", NAME, context_type);

        let mut visitor = ContextFirstVisitor {
            ctx,
            context_type,
            findings: Vec::new(),
        };
        walk_tree(&mut visitor, ctx.tree());
        visitor.findings
    }
}

struct ContextFirstVisitor<'a> {
    ctx: &'a FileContext<'a>,
    context_type: String,
    findings: Vec<Finding>,
}

impl Visitor for ContextFirstVisitor<'_> {
    fn visit(&mut self, node: NodeRef<'_>) -> Flow {
        let NodeRef::Func(decl) = node else {
            return Flow::Descend;
        };
        // Below two parameters the rule is inapplicable.
        if decl.params.len() <= 1 {
            return Flow::Skip;
        }

        // The context should be the first parameter. Flag any that show up
        // after the first.
        for param in &decl.params[1..] {
            if type_matches(&param.ty, &self.context_type) {
                self.findings.push(
                    Finding::new(
                        self.ctx.location(decl.span),
                        CATEGORY,
                        CONFIDENCE,
                        format!(
                            "{} should be the first parameter of {}",
                            self.context_type, decl.name
                        ),
                    )
                    .with_url(REFERENCE),
                );
                break; // only flag one
            }
        }
        Flow::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintel_core::syntax::{FuncDecl, Item, SourceTree, Span};
    use lintel_core::{Package, SourceFile};
    use std::path::PathBuf;

    fn check(decl: FuncDecl) -> Vec<Finding> {
        check_with_args(decl, &RuleArguments::default())
    }

    fn check_with_args(decl: FuncDecl, args: &RuleArguments) -> Vec<Finding> {
        let tree = SourceTree::new("app").with_item(Item::Func(decl));
        let file = SourceFile::new(PathBuf::from("src/server.x"), tree);
        let package = Package::new("app");
        let ctx = FileContext::new(&file, &package);
        ContextFirst::new().apply(&ctx, args)
    }

    #[test]
    fn misplaced_context_yields_one_finding() {
        let decl = FuncDecl::new("f", Span::new(3, 1))
            .with_param("a", "T1")
            .with_param("ctx", "Context")
            .with_param("b", "T2");

        let findings = check(decl);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, CATEGORY);
        assert!(findings[0].message.contains('f'));
        assert_eq!(findings[0].location.line, 3);
        assert_eq!(findings[0].url.as_deref(), Some(REFERENCE));
    }

    #[test]
    fn context_in_first_position_is_clean() {
        let decl = FuncDecl::new("g", Span::new(1, 1))
            .with_param("ctx", "Context")
            .with_param("a", "T1");
        assert!(check(decl).is_empty());
    }

    #[test]
    fn single_parameter_is_inapplicable_regardless_of_type() {
        let decl = FuncDecl::new("h", Span::new(1, 1)).with_param("ctx", "Context");
        assert!(check(decl).is_empty());

        let decl = FuncDecl::new("h2", Span::new(2, 1)).with_param("x", "T1");
        assert!(check(decl).is_empty());
    }

    #[test]
    fn two_misplaced_contexts_still_yield_one_finding() {
        let decl = FuncDecl::new("f", Span::new(1, 1))
            .with_param("a", "T1")
            .with_param("ctx", "Context")
            .with_param("ctx2", "Context");
        assert_eq!(check(decl).len(), 1);
    }

    #[test]
    fn qualified_context_type_matches() {
        let decl = FuncDecl::new("f", Span::new(1, 1))
            .with_param("a", "T1")
            .with_param("ctx", "app.Context");
        assert_eq!(check(decl).len(), 1);
    }

    #[test]
    fn designated_type_is_overridable_via_arguments() {
        let args = RuleArguments::new(vec![toml::Value::from("app.RequestScope")]);

        let decl = FuncDecl::new("f", Span::new(1, 1))
            .with_param("a", "T1")
            .with_param("scope", "app.RequestScope");
        assert_eq!(check_with_args(decl, &args).len(), 1);

        // With the override in place the default name no longer matches.
        let decl = FuncDecl::new("g", Span::new(2, 1))
            .with_param("a", "T1")
            .with_param("ctx", "Context");
        assert!(check_with_args(decl, &args).is_empty());
    }

    #[test]
    fn methods_are_checked_like_functions() {
        let decl = FuncDecl::new("handle", Span::new(1, 1))
            .with_receiver("Server")
            .with_param("a", "T1")
            .with_param("ctx", "Context");
        assert_eq!(check(decl).len(), 1);
    }
}
