//! Tracing configuration for inspecting a resolution run.
//!
//! Supports three output formats controlled by `GENDUMP_LOG_FORMAT`:
//!
//! - `text` (default): standard `tracing-subscriber` flat output
//! - `tree`: hierarchical indented output via `tracing-tree`, one subtree per
//!   artifact pass
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Why did an open type end up with an empty slot?
//! GENDUMP_LOG=debug GENDUMP_LOG_FORMAT=tree gendump --catalog catalog.json
//!
//! # Every candidate the engine looked at
//! GENDUMP_LOG="gendump_solver=trace" gendump --catalog catalog.json
//!
//! # Machine-readable
//! GENDUMP_LOG=debug GENDUMP_LOG_FORMAT=json gendump --catalog catalog.json
//! ```
//!
//! The subscriber is only initialised when `GENDUMP_LOG` (or `RUST_LOG`) is
//! set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "GENDUMP_LOG";
const FALLBACK_LOG_VAR: &str = "RUST_LOG";
const LOG_FORMAT_VAR: &str = "GENDUMP_LOG_FORMAT";

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; anything unrecognised is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var(LOG_FORMAT_VAR).unwrap_or_default())
    }
}

/// Filter directives from `GENDUMP_LOG`, falling back to `RUST_LOG`.
///
/// `lookup` reads one variable; `None` means unset.
fn filter_directives(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    [LOG_VAR, FALLBACK_LOG_VAR].into_iter().find_map(lookup)
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `GENDUMP_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr so it never mixes with `--show-config` on stdout.
pub fn init_tracing() {
    let Some(directives) = filter_directives(|var| std::env::var(var).ok()) else {
        return;
    };
    let filter = EnvFilter::builder().parse_lossy(directives);

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
