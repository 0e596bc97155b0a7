//! Generic depth-first traversal over [`SourceTree`]s.
//!
//! Every tree consumer in the engine dispatches through this one walker:
//! rules and the derived-property scans alike implement [`Visitor`] instead
//! of writing their own recursion.

use crate::syntax::{Expr, ExprKind, FuncDecl, Import, Item, Param, SourceTree};

/// A borrowed view of one node during traversal.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    /// The file root.
    Tree(&'a SourceTree),
    /// An import statement.
    Import(&'a Import),
    /// A function or method declaration.
    Func(&'a FuncDecl),
    /// A declared parameter.
    Param(&'a Param),
    /// An expression.
    Expr(&'a Expr),
}

/// What the walker should do after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Descend into the node's children.
    Descend,
    /// Skip the node's children, continue with its siblings.
    Skip,
}

/// A per-node callback deciding, node by node, whether to descend.
pub trait Visitor {
    /// Visits one node; the return value controls descent into its children.
    fn visit(&mut self, node: NodeRef<'_>) -> Flow;
}

/// Walks an entire file depth-first.
pub fn walk_tree(visitor: &mut dyn Visitor, tree: &SourceTree) {
    walk(visitor, NodeRef::Tree(tree));
}

/// Walks the subtree rooted at `node` depth-first.
///
/// Children are visited in declaration order. A [`Flow::Skip`] prunes the
/// current node's children only; siblings are still visited.
pub fn walk(visitor: &mut dyn Visitor, node: NodeRef<'_>) {
    if visitor.visit(node) == Flow::Skip {
        return;
    }

    match node {
        NodeRef::Tree(tree) => {
            for item in &tree.items {
                match item {
                    Item::Import(import) => walk(visitor, NodeRef::Import(import)),
                    Item::Func(decl) => walk(visitor, NodeRef::Func(decl)),
                }
            }
        }
        NodeRef::Func(decl) => {
            for param in &decl.params {
                walk(visitor, NodeRef::Param(param));
            }
            for expr in &decl.body {
                walk(visitor, NodeRef::Expr(expr));
            }
        }
        NodeRef::Expr(expr) => {
            if let ExprKind::Call { args, .. } = &expr.kind {
                for arg in args {
                    walk(visitor, NodeRef::Expr(arg));
                }
            }
        }
        NodeRef::Import(_) | NodeRef::Param(_) => {}
    }
}
