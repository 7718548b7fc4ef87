//! Opt-in log output for a collection run.
//!
//! The walker reports each class decision at TRACE level under `xport_solver`.
//! The collector logs cache misses at DEBUG and emits query events under the
//! `xport::query_json` target. [`init_tracing`] routes them to stderr as flat
//! text, an indented tree (`XPORT_LOG_FORMAT=tree`) or JSON lines
//! (`XPORT_LOG_FORMAT=json`):
//!
//! ```bash
//! XPORT_LOG=xport_solver=trace XPORT_LOG_FORMAT=tree my-codegen
//! XPORT_LOG=xport::query_json=trace XPORT_LOG_FORMAT=json my-codegen
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Output format selected by `XPORT_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    /// `tracing-tree` layout, with targets shown.
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to [`LogFormat::Text`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    /// Read from the `XPORT_LOG_FORMAT` environment variable.
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("XPORT_LOG_FORMAT").unwrap_or_default())
    }
}

/// `XPORT_LOG` if set, else `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("XPORT_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install a global subscriber for collection logs, writing to stderr.
///
/// Returns `false` when neither `XPORT_LOG` nor `RUST_LOG` is set, or when the
/// embedding code generator already installed its own subscriber.
pub fn init_tracing() -> bool {
    let has_xport_log = std::env::var("XPORT_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_xport_log && !has_rust_log {
        return false;
    }

    let filter = build_filter();

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);

            Registry::default()
                .with(filter)
                .with(tree_layer)
                .try_init()
                .is_ok()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default()
                .with(filter)
                .with(json_layer)
                .try_init()
                .is_ok()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    }
}
