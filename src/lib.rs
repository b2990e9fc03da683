//! # mdlint
//!
//! A Markdown style checker and lint tool compatible with the
//! [markdownlint](https://github.com/DavidAnson/markdownlint) rule catalog
//! (MD001-MD059), built around a hand-rolled block/inline tokenizer, a
//! configurable rule engine, and a safety-checked fix coordinator.
//!
//! ## Features
//!
//! - **52 built-in rules** enforcing Markdown best practices
//! - **Automatic fixing**, with backup/atomic-write/validation/rollback
//! - **Custom rules** support via the [`Rule`] trait
//! - **Configuration** via JSON, YAML, or TOML, with ordered `extends` chains
//! - **Inline configuration** using HTML comments
//! - **Concurrent dispatch** for rule execution (requires the `async` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdlint::{Config, Linter, LintOptions};
//!
//! let config = Config::new();
//! let linter = Linter::new(&config, None, Vec::new())?;
//! let options = LintOptions {
//!     files: vec!["README.md".to_string()],
//!     ..Default::default()
//! };
//! let results = linter.lint(&options)?;
//! println!("{}", results);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration
//!
//! Configuration can be provided via files or directly in options:
//!
//! ```json
//! {
//!   "default": true,
//!   "MD013": false,
//!   "MD033": {
//!     "allowed_elements": ["br", "img"]
//!   }
//! }
//! ```
//!
//! ## Inline Configuration
//!
//! Rules can be disabled/enabled using HTML comments:
//!
//! ```markdown
//! <!-- markdownlint-disable MD013 -->
//! This line can be as long as you want.
//! <!-- markdownlint-enable MD013 -->
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod fixer;
pub mod formatters;
pub mod helpers;
pub mod lint;
pub mod parser;
pub mod rules;
pub mod types;

// Re-export main types and functions
pub use config::{Config, ConfigParser, RuleConfig};
pub use engine::RuleEngine;
pub use fixer::FixCoordinator;
pub use lint::{apply_fixes, load_config, Linter};
pub use types::{LintError, LintOptions, LintResult, Rule, RuleParams, Violation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the library version
pub fn version() -> &'static str {
    VERSION
}
