//! Recognized client settings and Fantom-home resolution.

use crate::error::{FanlsError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugLevel {
    Off,
    Messages,
    Verbose,
}

impl DebugLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "off" => Some(DebugLevel::Off),
            "messages" => Some(DebugLevel::Messages),
            "verbose" => Some(DebugLevel::Verbose),
            _ => None,
        }
    }

    /// Lifecycle notices (startup, index loaded) go to the client window
    /// unless debugging is fully off.
    pub fn logs_lifecycle(self) -> bool {
        !matches!(self, DebugLevel::Off)
    }

    /// Per-request log lines are verbose-only; they are chatty enough to
    /// drown the client's output panel otherwise.
    pub fn logs_requests(self) -> bool {
        matches!(self, DebugLevel::Verbose)
    }
}

/// How the Fantom installation directory is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeMode {
    Global,
    Local,
    Custom,
}

impl HomeMode {
    /// An unrecognized mode is a configuration error, which aborts server
    /// startup; it is the one settings mistake that is fatal.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "global" => Ok(HomeMode::Global),
            "local" => Ok(HomeMode::Local),
            "custom" => Ok(HomeMode::Custom),
            other => Err(FanlsError::Config(format!(
                "unrecognized fantom home mode '{other}' (expected global, local, or custom)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub syntax_highlighting: bool,
    pub code_outline: bool,
    pub formatting: bool,
    pub linting: bool,
    pub autocompletion: bool,
    pub hover_docs: bool,
    pub fantom_docs: bool,
    pub debug: DebugLevel,
    pub home_mode: HomeMode,
    pub home_custom: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            syntax_highlighting: true,
            code_outline: true,
            formatting: true,
            linting: true,
            autocompletion: true,
            hover_docs: true,
            fantom_docs: true,
            debug: DebugLevel::Messages,
            home_mode: HomeMode::Global,
            home_custom: None,
        }
    }
}

impl Settings {
    /// Merge recognized keys from a client-supplied settings payload.
    ///
    /// The payload may be the raw object or nested under a `fantom` key.
    /// Unknown keys are ignored; an invalid home mode is an error so that
    /// initialization can fail loudly instead of silently running without
    /// documentation support.
    pub fn merge_value(&mut self, value: &Value) -> Result<()> {
        let root = value.get("fantom").unwrap_or(value);

        // Merge into a scratch copy: a rejected payload must leave the
        // active settings exactly as they were, not half-applied.
        let mut next = self.clone();

        merge_flag(root, "syntaxHighlighting", &mut next.syntax_highlighting);
        merge_flag(root, "codeOutline", &mut next.code_outline);
        merge_flag(root, "formatting", &mut next.formatting);
        merge_flag(root, "linting", &mut next.linting);
        merge_flag(root, "autocompletion", &mut next.autocompletion);
        merge_flag(root, "hoverDocs", &mut next.hover_docs);
        merge_flag(root, "fantomDocs", &mut next.fantom_docs);

        if let Some(level) = root.get("debug").and_then(Value::as_str) {
            match DebugLevel::parse(level) {
                Some(parsed) => next.debug = parsed,
                None => tracing::warn!("ignoring unknown debug level '{level}'"),
            }
        }

        if let Some(home) = root.get("fantomHome") {
            if let Some(mode) = home.get("mode").and_then(Value::as_str) {
                next.home_mode = HomeMode::parse(mode)?;
            }
            if let Some(path) = home.get("path").and_then(Value::as_str) {
                next.home_custom = Some(PathBuf::from(path));
            }
        }

        *self = next;
        Ok(())
    }

    /// Locate the Fantom installation, or `None` when it cannot be found.
    /// Missing installations degrade features; only an invalid mode (already
    /// rejected in `merge_value`) is fatal.
    pub fn resolve_home(&self, workspace_root: Option<&Path>) -> Option<PathBuf> {
        match self.home_mode {
            HomeMode::Custom => {
                let path = self.home_custom.as_deref()?;
                if path.is_dir() {
                    Some(path.to_path_buf())
                } else {
                    tracing::warn!("custom fantom home {} does not exist", path.display());
                    None
                }
            }
            HomeMode::Local => {
                let root = workspace_root?;
                for candidate in [root.to_path_buf(), root.join("fantom")] {
                    if fan_executable(&candidate).is_file() {
                        return Some(candidate);
                    }
                }
                tracing::warn!("no local fantom installation under {}", root.display());
                None
            }
            HomeMode::Global => find_global_home(),
        }
    }
}

/// The `fan` launcher inside an installation.
pub fn fan_executable(home: &Path) -> PathBuf {
    home.join("bin").join("fan")
}

/// Walk PATH looking for a `fan` launcher and take its installation root.
fn find_global_home() -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join("fan");
        if candidate.is_file() {
            // <home>/bin/fan
            if let Some(home) = candidate.parent().and_then(Path::parent) {
                return Some(home.to_path_buf());
            }
        }
    }
    tracing::warn!("no fan executable found on PATH");
    None
}

fn merge_flag(root: &Value, key: &str, target: &mut bool) {
    // Both `"formatting": false` and `"formatting": {"enable": false}` are
    // accepted; clients differ in how they flatten settings sections.
    let value = match root.get(key) {
        Some(Value::Bool(flag)) => Some(*flag),
        Some(section) => section.get("enable").and_then(Value::as_bool),
        None => None,
    };
    if let Some(flag) = value {
        *target = flag;
    }
}
