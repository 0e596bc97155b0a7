//! The lint session: orchestration and incremental finding delivery.

use crossbeam_channel::{unbounded, Receiver};
use std::thread::JoinHandle;
use tracing::{error, info};

use crate::config::Config;
use crate::package::Package;
use crate::rule::{Rule, RuleBox};
use crate::types::Finding;

/// Builder for configuring a [`Linter`].
#[derive(Default)]
pub struct LinterBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl LinterBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the linter.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the linter.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the linter.
    #[must_use]
    pub fn build(self) -> Linter {
        Linter {
            rules: self.rules,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// Drives one lint session over a set of packages.
///
/// Use [`Linter::builder()`] to construct an instance. A linter is consumed
/// by [`Linter::lint`]: a session is a finite, non-restartable sequence of
/// findings, and a second run needs a new linter.
pub struct Linter {
    rules: Vec<RuleBox>,
    config: Config,
}

impl Linter {
    /// Creates a new builder for configuring a linter.
    #[must_use]
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Lints the given packages, delivering findings incrementally.
    ///
    /// Packages are processed in order by a session driver thread. For each
    /// package, the derived caches are populated synchronously, then one
    /// worker per file runs every configured rule, all workers writing to
    /// one shared channel; the package's workers are joined before the next
    /// package starts. Findings from different files arrive in no promised
    /// order; findings of one rule application on one file arrive in that
    /// rule's emission order.
    #[must_use]
    pub fn lint(self, packages: Vec<Package>) -> Findings {
        let (sink, findings) = unbounded();
        let Self { rules, config } = self;

        info!(
            "starting lint session: {} packages, {} rules",
            packages.len(),
            rules.len()
        );

        let driver = std::thread::spawn(move || {
            for package in &packages {
                package.lint(&rules, &config, &sink);
            }
            // Dropping the sink closes the stream once all workers are done.
        });

        Findings {
            receiver: findings,
            driver: Some(driver),
        }
    }
}

/// The finding stream of one lint session.
///
/// Iterating blocks until the next finding is available and ends when the
/// session has processed every package. Dropping the stream early is safe;
/// workers notice the closed channel and abandon their remaining work.
pub struct Findings {
    receiver: Receiver<Finding>,
    driver: Option<JoinHandle<()>>,
}

impl Iterator for Findings {
    type Item = Finding;

    fn next(&mut self) -> Option<Finding> {
        match self.receiver.recv() {
            Ok(finding) => Some(finding),
            Err(_) => {
                if let Some(driver) = self.driver.take() {
                    if driver.join().is_err() {
                        error!("lint session driver panicked");
                    }
                }
                None
            }
        }
    }
}
