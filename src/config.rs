use std::env;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::parser::ast::Scale;

/// Knobs that change what the grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Largest scale word accepted. Anything above it is out of range.
    pub max_scale: Scale,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_scale: Scale::Million,
        }
    }
}

impl ParseOptions {
    pub fn with_max_scale(mut self, max_scale: Scale) -> Self {
        self.max_scale = max_scale;
        self
    }

    /// Scale table entries enabled by these options, highest first.
    pub fn scales(&self) -> impl Iterator<Item = Scale> + '_ {
        Scale::TABLE.iter().copied().filter(move |s| *s <= self.max_scale)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub options: ParseOptions,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            options: ParseOptions::default(),
            color: true,
        }
    }
}

impl Config {
    /// Resolution order, later wins:
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/numwords/config)
    /// 3. NUMWORDS_MAX_SCALE / NUMWORDS_COLOR / NO_COLOR environment variables
    ///
    /// Command-line flags are applied on top by the caller.
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = config_file_path() {
            if path.exists() {
                config.apply_file(&path);
            }
        }

        config.apply_env(|key| env::var(key).ok());
        config
    }

    fn apply_file(&mut self, path: &Path) {
        match fs::File::open(path) {
            Ok(file) => {
                tracing::debug!(path = %path.display(), "reading config file");
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    self.apply_line(&line);
                }
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not open config file"),
        }
    }

    /// Applies one `key=value` line. Comments, blanks and unknown keys are skipped.
    pub fn apply_line(&mut self, line: &str) {
        let line = line.trim();
        if line.starts_with('#') || line.is_empty() {
            return;
        }
        let Some((key, value)) = line.split_once('=') else {
            tracing::warn!(line, "ignoring malformed config line");
            return;
        };
        match key.trim() {
            "max_scale" => self.set_max_scale(value),
            "color" => self.set_color(value),
            other => tracing::debug!(key = other, "ignoring unknown config key"),
        }
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("NUMWORDS_MAX_SCALE") {
            self.set_max_scale(&value);
        }
        if let Some(value) = lookup("NUMWORDS_COLOR") {
            self.set_color(&value);
        }
        // https://no-color.org: any non-empty value disables color
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.color = false;
        }
    }

    pub fn set_max_scale(&mut self, value: &str) {
        match value.parse::<Scale>() {
            Ok(scale) => self.options.max_scale = scale,
            Err(e) => tracing::warn!("{}; keeping '{}'", e, self.options.max_scale),
        }
    }

    fn set_color(&mut self, value: &str) {
        match parse_bool(value) {
            Some(color) => self.color = color,
            None => tracing::warn!(value, "expected true/false for color; keeping {}", self.color),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// $XDG_CONFIG_HOME/numwords/config, falling back to $HOME/.config/numwords/config
fn config_file_path() -> Option<PathBuf> {
    let config_dir = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    Some(config_dir.join("numwords").join("config"))
}
