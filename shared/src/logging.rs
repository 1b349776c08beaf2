//! Shared logging utilities for consistent tracing across the CLI and web surface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use tracing::{error, info};

/// Component label set once at startup
static COMPONENT_ID: OnceLock<ComponentId> = OnceLock::new();

/// Which binary is emitting log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentId {
    /// The `pokedex` command-line tool
    Cli,
    /// The JSON web surface
    WebServer,
    /// Library use without an initialised binary (tests, embedding)
    Library,
}

impl ComponentId {
    pub fn init_cli() -> &'static ComponentId {
        COMPONENT_ID.get_or_init(|| ComponentId::Cli)
    }

    pub fn init_webserver() -> &'static ComponentId {
        COMPONENT_ID.get_or_init(|| ComponentId::WebServer)
    }

    /// The initialised component, or `Library` when no binary set one
    pub fn current() -> &'static ComponentId {
        COMPONENT_ID.get().unwrap_or(&ComponentId::Library)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::Cli => write!(f, "pokedex"),
            ComponentId::WebServer => write!(f, "webserver"),
            ComponentId::Library => write!(f, "catalog"),
        }
    }
}

fn filter_directives(component: ComponentId, base_level: &str) -> String {
    match component {
        ComponentId::Cli | ComponentId::Library => {
            format!("pokedex={base_level},catalog={base_level},shared={base_level},reqwest=warn,hyper=warn")
        }
        ComponentId::WebServer => {
            format!(
                "webserver={base_level},catalog={base_level},shared={base_level},tower_http=debug,axum={base_level},reqwest=warn,hyper=warn"
            )
        }
    }
}

/// Initialize the stdout subscriber for the current component
///
/// `RUST_LOG` wins over the computed directives when it is set.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let component = *ComponentId::current();
    let base_level = log_level.unwrap_or("info");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(component, base_level)));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for component-aware info logging
#[macro_export]
macro_rules! component_info {
    ($component:expr, $($arg:tt)*) => {
        tracing::info!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for component-aware warning logging
#[macro_export]
macro_rules! component_warn {
    ($component:expr, $($arg:tt)*) => {
        tracing::warn!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for component-aware error logging
#[macro_export]
macro_rules! component_error {
    ($component:expr, $($arg:tt)*) => {
        tracing::error!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for component-aware debug logging
#[macro_export]
macro_rules! component_debug {
    ($component:expr, $($arg:tt)*) => {
        tracing::debug!(
            component = %$component,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(component: &ComponentId, details: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(component: &ComponentId, reason: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "🛑 Shutting down: {}",
        reason
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(component: &ComponentId, context: &str, error: &dyn std::fmt::Display) {
    error!(
        component = %component,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(component: &ComponentId, message: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}

/// Contextual logging helper for progress updates
pub fn log_progress(component: &ComponentId, action: &str, details: &str) {
    info!(
        component = %component,
        timestamp = format_timestamp(),
        "📋 {}: {}",
        action,
        details
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_id_display() {
        assert_eq!(ComponentId::Cli.to_string(), "pokedex");
        assert_eq!(ComponentId::WebServer.to_string(), "webserver");
        assert_eq!(ComponentId::Library.to_string(), "catalog");
    }

    #[test]
    fn test_filter_directives_cover_catalog_crate() {
        let directives = filter_directives(ComponentId::WebServer, "debug");
        assert!(directives.contains("catalog=debug"));
        assert!(directives.contains("webserver=debug"));
    }

    #[test]
    fn test_timestamp_format() {
        let timestamp = format_timestamp();
        // HH:MM:SS.mmm
        assert_eq!(timestamp.len(), 12);
        assert_eq!(&timestamp[2..3], ":");
    }
}
