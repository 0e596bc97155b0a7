//! A compiled package: source files sharing one symbol table, plus the
//! thread-safe lazily-computed derived queries.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use crossbeam_channel::Sender;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::config::Config;
use crate::file::SourceFile;
use crate::rule::RuleBox;
use crate::symbols::{SymbolTable, TypeName};
use crate::syntax::Expr;
use crate::types::Finding;
use crate::walk::{walk_tree, Flow, NodeRef, Visitor};

/// Accumulator value of a type declaring all three designated methods.
const FULL_CAPABILITY: u8 = 0b111;

/// A lazily-computed boolean cache.
///
/// `Unknown` means not yet computed. Once decided, the value never changes
/// for the rest of the session; a racing recomputation would store the same
/// answer, since the predicate is a pure function of immutable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriState {
    Unknown,
    Yes,
    No,
}

/// The derived caches, guarded together by one lock.
struct Derived {
    entry: TriState,
    capabilities: Option<Arc<HashMap<String, bool>>>,
}

/// A package in the analyzed program: a set of source files sharing one
/// symbol/type table.
///
/// Built once per lint session from frontend output and discarded at session
/// end. Derived queries are populated before the per-file workers launch and
/// are read-only afterwards.
pub struct Package {
    id: String,
    files: HashMap<PathBuf, SourceFile>,
    symbols: Option<Arc<dyn SymbolTable>>,
    derived: RwLock<Derived>,
}

impl Package {
    /// Creates an empty package with the given compiler-assigned identity.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            files: HashMap::new(),
            symbols: None,
            derived: RwLock::new(Derived {
                entry: TriState::Unknown,
                capabilities: None,
            }),
        }
    }

    /// Attaches the externally-supplied symbol table.
    #[must_use]
    pub fn with_symbols(mut self, symbols: Arc<dyn SymbolTable>) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Adds a source file, keyed by its path. A file at an already-known
    /// path replaces the previous one.
    #[must_use]
    pub fn with_file(mut self, file: SourceFile) -> Self {
        self.files.insert(file.path().to_path_buf(), file);
        self
    }

    /// The package identity.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The package's files, keyed by path.
    #[must_use]
    pub fn files(&self) -> &HashMap<PathBuf, SourceFile> {
        &self.files
    }

    /// The externally-supplied symbol table, when present.
    #[must_use]
    pub fn symbols(&self) -> Option<&Arc<dyn SymbolTable>> {
        self.symbols.as_ref()
    }

    /// Whether this package is the program's executable entry point.
    ///
    /// True iff at least one owned file declares the entry package. The
    /// first call scans the files and caches the answer; later calls return
    /// the cached value through the shared-lock fast path.
    #[must_use]
    pub fn is_entry_unit(&self) -> bool {
        match self.derived.read().entry {
            TriState::Yes => return true,
            TriState::No => return false,
            TriState::Unknown => {}
        }

        let mut derived = self.derived.write();
        // Recheck: another writer may have decided while we waited.
        if derived.entry == TriState::Unknown {
            derived.entry = if self.files.values().any(SourceFile::is_entry_file) {
                TriState::Yes
            } else {
                TriState::No
            };
        }
        derived.entry == TriState::Yes
    }

    /// The types of this package declaring all three designated methods.
    ///
    /// Each designated name owns one bit; every method declaration whose
    /// name is designated ORs its bit into a per-receiver-type accumulator,
    /// and a type is a member iff its accumulator has all three bits. The
    /// scan is order-independent and tolerant of duplicate declarations; it
    /// matches names only, not signatures, trading precision for recall.
    ///
    /// Computed once per session with the first caller's method names and
    /// cached; the published map is immutable for the rest of the session.
    #[must_use]
    pub fn capability_set(&self, methods: &[&str; 3]) -> Arc<HashMap<String, bool>> {
        if let Some(set) = &self.derived.read().capabilities {
            return Arc::clone(set);
        }

        let mut derived = self.derived.write();
        if let Some(set) = &derived.capabilities {
            return Arc::clone(set);
        }

        let mut scan = CapabilityScan::new(methods);
        for file in self.files.values() {
            walk_tree(&mut scan, file.tree());
        }
        let set = Arc::new(scan.finish());
        derived.capabilities = Some(Arc::clone(&set));
        set
    }

    /// Resolves the type of an expression via the symbol table.
    ///
    /// `None` when the table is absent or does not know the expression.
    /// An unexpected panic inside the external resolver is caught here and
    /// degraded to `None`; it never aborts the session.
    #[must_use]
    pub fn type_of(&self, expr: &Expr) -> Option<TypeName> {
        let symbols = self.symbols.as_ref()?;
        match catch_unwind(AssertUnwindSafe(|| symbols.type_of(expr))) {
            Ok(resolved) => resolved,
            Err(_) => {
                warn!(
                    "type resolution panicked for node {:?} in package {}; treating as unavailable",
                    expr.id, self.id
                );
                None
            }
        }
    }

    /// Lints every file of this package, sending findings into `sink`.
    ///
    /// Both derived caches are populated synchronously first, so no worker
    /// observes a partially populated cache; then one scoped worker runs per
    /// file, and the scope exit is the join barrier. Fan-out is sized to the
    /// file count.
    pub fn lint(&self, rules: &[RuleBox], config: &Config, sink: &Sender<Finding>) {
        let entry = self.is_entry_unit();
        let capabilities = self.capability_set(&config.capability_method_names());
        debug!(
            "package {}: entry={}, {} capability types, {} files",
            self.id,
            entry,
            capabilities.len(),
            self.files.len()
        );

        std::thread::scope(|scope| {
            for file in self.files.values() {
                scope.spawn(move || file.apply(self, rules, config, sink));
            }
        });
    }
}

/// Walk visitor accumulating one capability bit per designated method name.
struct CapabilityScan<'a> {
    bits: HashMap<&'a str, u8>,
    has: HashMap<String, u8>,
}

impl<'a> CapabilityScan<'a> {
    fn new(methods: &[&'a str; 3]) -> Self {
        let bits = methods
            .iter()
            .enumerate()
            .map(|(index, name)| (*name, 1 << index))
            .collect();
        Self {
            bits,
            has: HashMap::new(),
        }
    }

    fn finish(self) -> HashMap<String, bool> {
        self.has
            .into_iter()
            .filter(|&(_, bits)| bits == FULL_CAPABILITY)
            .map(|(ty, _)| (ty, true))
            .collect()
    }
}

impl Visitor for CapabilityScan<'_> {
    fn visit(&mut self, node: NodeRef<'_>) -> Flow {
        if let NodeRef::Func(decl) = node {
            if let Some(receiver) = &decl.receiver {
                if let Some(bit) = self.bits.get(decl.name.as_str()) {
                    *self.has.entry(receiver.clone()).or_insert(0) |= bit;
                }
            }
            // Declarations do not nest; nothing of interest below a method.
            return Flow::Skip;
        }
        Flow::Descend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{FuncDecl, Item, NodeId, SourceTree, Span};

    const METHODS: [&str; 3] = ["len", "less", "swap"];

    fn method(receiver: &str, name: &str) -> Item {
        Item::Func(FuncDecl::new(name, Span::new(1, 1)).with_receiver(receiver))
    }

    fn file(path: &str, tree: SourceTree) -> SourceFile {
        SourceFile::new(PathBuf::from(path), tree)
    }

    #[test]
    fn all_three_methods_in_any_order_make_a_member() {
        let package = Package::new("sortutil")
            .with_file(file(
                "a.x",
                SourceTree::new("sortutil")
                    .with_item(method("byLen", "swap"))
                    .with_item(method("byLen", "len")),
            ))
            .with_file(file(
                "b.x",
                SourceTree::new("sortutil")
                    .with_item(method("byLen", "less"))
                    // Duplicate declaration; OR is idempotent.
                    .with_item(method("byLen", "len")),
            ));

        let set = package.capability_set(&METHODS);
        assert_eq!(set.get("byLen"), Some(&true));
    }

    #[test]
    fn two_of_three_methods_is_not_a_member() {
        let package = Package::new("sortutil").with_file(file(
            "a.x",
            SourceTree::new("sortutil")
                .with_item(method("partial", "len"))
                .with_item(method("partial", "less"))
                .with_item(method("partial", "less")),
        ));

        let set = package.capability_set(&METHODS);
        assert!(!set.contains_key("partial"));
    }

    #[test]
    fn receiverless_and_undesignated_names_are_ignored() {
        let package = Package::new("app").with_file(file(
            "a.x",
            SourceTree::new("app")
                .with_item(Item::Func(FuncDecl::new("len", Span::new(1, 1))))
                .with_item(method("widget", "render")),
        ));

        let set = package.capability_set(&METHODS);
        assert!(set.is_empty());
    }

    #[test]
    fn capability_set_is_computed_once_per_session() {
        let package = Package::new("sortutil").with_file(file(
            "a.x",
            SourceTree::new("sortutil")
                .with_item(method("byLen", "len"))
                .with_item(method("byLen", "less"))
                .with_item(method("byLen", "swap")),
        ));

        let first = package.capability_set(&METHODS);
        let second = package.capability_set(&["other", "names", "entirely"]);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn entry_unit_iff_some_file_declares_main() {
        let library = Package::new("lib").with_file(file("a.x", SourceTree::new("lib")));
        assert!(!library.is_entry_unit());

        let binary = Package::new("cmd")
            .with_file(file("a.x", SourceTree::new("lib")))
            .with_file(file("b.x", SourceTree::new("main")));
        assert!(binary.is_entry_unit());
    }

    #[test]
    fn is_entry_unit_is_idempotent() {
        let package = Package::new("cmd").with_file(file("a.x", SourceTree::new("main")));
        assert!(package.is_entry_unit());
        assert!(package.is_entry_unit());
        assert!(package.is_entry_unit());
    }

    struct PanickingTable;

    impl SymbolTable for PanickingTable {
        fn type_of(&self, _expr: &Expr) -> Option<TypeName> {
            panic!("resolver bug")
        }
    }

    #[test]
    fn resolver_panic_degrades_to_unavailable() {
        let package = Package::new("app").with_symbols(Arc::new(PanickingTable));
        let expr = Expr::new(
            NodeId(1),
            crate::syntax::ExprKind::Name("conn".into()),
            Span::new(1, 1),
        );
        assert!(package.type_of(&expr).is_none());
    }

    #[test]
    fn absent_table_is_unavailable_not_an_error() {
        let package = Package::new("app");
        let expr = Expr::new(
            NodeId(1),
            crate::syntax::ExprKind::Lit("1".into()),
            Span::new(1, 1),
        );
        assert!(package.type_of(&expr).is_none());
    }
}
