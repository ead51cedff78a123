//! Configuration types for artemis.
//!
//! [`Config::load`] layers an optional TOML file and `ARTEMIS__`-prefixed
//! environment variables on top of the built-in defaults.
//! [`Config::defaults`] returns the defaults without touching the filesystem
//! (useful in tests).

use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[agent]
agent_id = "artemis-agent-unknown"

[linux]
audit_log_path  = "/var/log/audit/audit.log"
mapping_path    = "mappings/standardization_map_lin.json"
hex_fields      = ["proctitle", "comm", "exe", "name"]
exec_syscalls   = ["59", "221", "322"]
file_syscalls   = ["0", "1", "2", "3", "90", "92", "257", "262"]
socket_syscalls = ["41", "42", "43", "49", "50"]

[windows]
records_path = "sysmon_records.jsonl"
mapping_path = "mappings/standardization_map_win.json"
max_events   = 1000

[logging]
level = "info"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub linux: LinuxConfig,
    #[serde(default)]
    pub windows: WindowsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[agent]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_agent_id")]
    pub agent_id: String,
    /// Host name stamped on Linux events whose records carry no `node` field.
    #[serde(default)]
    pub hostname: Option<String>,
}

fn default_agent_id() -> String { "artemis-agent-unknown".to_string() }

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_id: default_agent_id(),
            hostname: None,
        }
    }
}

/// `[linux]` section: audit log location and auditd parser settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LinuxConfig {
    #[serde(default = "default_audit_log_path")]
    pub audit_log_path: PathBuf,
    #[serde(default = "default_linux_mapping_path")]
    pub mapping_path: PathBuf,
    /// Fields whose values auditd may hex-encode.
    #[serde(default = "default_hex_fields")]
    pub hex_fields: BTreeSet<String>,
    #[serde(default = "default_exec_syscalls")]
    pub exec_syscalls: BTreeSet<String>,
    #[serde(default = "default_file_syscalls")]
    pub file_syscalls: BTreeSet<String>,
    #[serde(default = "default_socket_syscalls")]
    pub socket_syscalls: BTreeSet<String>,
}

fn default_audit_log_path() -> PathBuf { PathBuf::from("/var/log/audit/audit.log") }
fn default_linux_mapping_path() -> PathBuf { PathBuf::from("mappings/standardization_map_lin.json") }
fn default_hex_fields() -> BTreeSet<String> { strings(&["proctitle", "comm", "exe", "name"]) }
fn default_exec_syscalls() -> BTreeSet<String> { strings(&["59", "221", "322"]) }
fn default_file_syscalls() -> BTreeSet<String> {
    strings(&["0", "1", "2", "3", "90", "92", "257", "262"])
}
fn default_socket_syscalls() -> BTreeSet<String> { strings(&["41", "42", "43", "49", "50"]) }

impl Default for LinuxConfig {
    fn default() -> Self {
        Self {
            audit_log_path: default_audit_log_path(),
            mapping_path: default_linux_mapping_path(),
            hex_fields: default_hex_fields(),
            exec_syscalls: default_exec_syscalls(),
            file_syscalls: default_file_syscalls(),
            socket_syscalls: default_socket_syscalls(),
        }
    }
}

/// `[windows]` section: flat Sysmon record input.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowsConfig {
    #[serde(default = "default_records_path")]
    pub records_path: PathBuf,
    #[serde(default = "default_windows_mapping_path")]
    pub mapping_path: PathBuf,
    /// Collection stops after this many records.
    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

fn default_records_path() -> PathBuf { PathBuf::from("sysmon_records.jsonl") }
fn default_windows_mapping_path() -> PathBuf { PathBuf::from("mappings/standardization_map_win.json") }
fn default_max_events() -> usize { 1000 }

impl Default for WindowsConfig {
    fn default() -> Self {
        Self {
            records_path: default_records_path(),
            mapping_path: default_windows_mapping_path(),
            max_events: default_max_events(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Append logs to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_level() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the built-in defaults, then `path` (if given and present), then
    /// `ARTEMIS__SECTION__KEY` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder
            .add_source(
                config::Environment::with_prefix("ARTEMIS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("linux.hex_fields")
                    .with_list_parse_key("linux.exec_syscalls")
                    .with_list_parse_key("linux.file_syscalls")
                    .with_list_parse_key("linux.socket_syscalls"),
            )
            .build()?
            .try_deserialize()
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

fn strings(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
