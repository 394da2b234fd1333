//! Application context — unified state passed to every command handler.
//!
//! `AppContext` is constructed once in `Cli::run()` and passed as
//! `&AppContext` to command handlers. Adding a new cross-cutting concern
//! requires only one field change here — zero command signatures change.

use crate::infra::azure::AzCli;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Cloud CLI adapter.
    pub cloud: AzCli<TokioCommandRunner>,
    /// Operator defaults store.
    pub config: YamlConfigStore,
    /// When `true`, never prompt for credentials.
    ///
    /// Set when the `CI` environment variable is present or stdout is not a
    /// terminal.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool, json: bool) -> Self {
        let output = OutputContext::new(no_color, quiet);
        let non_interactive = std::env::var("CI").is_ok() || !output.is_tty;

        let mode = if json { OutputMode::Json } else { OutputMode::Human };

        Self {
            output,
            mode,
            cloud: AzCli::default_runner(),
            config: YamlConfigStore,
            non_interactive,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }
}
