use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cull::priority::PriorityTable;

/// Effective settings for an organize run. Layered in order: built-in
/// defaults, TOML config file, `TRACKCULL_*` environment, CLI flags —
/// later layers win.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub review_root: PathBuf,
    pub dry_run: bool,
    pub copy_instead_of_move: bool,
    pub log_path: Option<PathBuf>,
    pub container_priority: BTreeMap<String, u32>,
}

/// What the CLI layer collected; `None` means "not given on the command
/// line, fall through to the lower layers".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub source_root: Option<PathBuf>,
    pub destination_root: Option<PathBuf>,
    pub review_root: Option<PathBuf>,
    pub dry_run: bool,
    pub copy_instead_of_move: bool,
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    source_root: Option<PathBuf>,
    destination_root: Option<PathBuf>,
    review_root: Option<PathBuf>,
    dry_run: Option<bool>,
    copy_instead_of_move: Option<bool>,
    log_path: Option<PathBuf>,
    container_priority: Option<BTreeMap<String, u32>>,
}

fn env_or_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

fn env_or_bool(var: &str, fallback: bool) -> bool {
    match env::var(var) {
        Ok(v) => match v.trim() {
            "1" | "true" | "TRUE" | "yes" | "on" => true,
            "0" | "false" | "FALSE" | "no" | "off" => false,
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

fn resolve_config_path(cli: &CliOverrides) -> Option<PathBuf> {
    if let Some(path) = &cli.config_path {
        return Some(path.clone());
    }
    if let Ok(custom) = env::var("TRACKCULL_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    let base = dirs::config_dir()?;
    Some(base.join("trackcull").join("config.toml"))
}

fn merge_file_config(base: &mut Config, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed: PartialConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse config {}: {err}", path.display()))?;
    if let Some(v) = parsed.source_root {
        base.source_root = v;
    }
    if let Some(v) = parsed.destination_root {
        base.destination_root = v;
    }
    if let Some(v) = parsed.review_root {
        base.review_root = v;
    }
    if let Some(v) = parsed.dry_run {
        base.dry_run = v;
    }
    if let Some(v) = parsed.copy_instead_of_move {
        base.copy_instead_of_move = v;
    }
    if let Some(v) = parsed.log_path {
        base.log_path = Some(v);
    }
    if let Some(v) = parsed.container_priority {
        base.container_priority = v;
    }
    Ok(())
}

fn validate(cfg: &Config) -> Result<()> {
    for (name, root) in [
        ("source root", &cfg.source_root),
        ("destination root", &cfg.destination_root),
        ("review root", &cfg.review_root),
    ] {
        if root.as_os_str().is_empty() {
            return Err(anyhow!("{name} is not set; pass a flag or config entry"));
        }
    }
    if cfg.source_root == cfg.destination_root
        || cfg.source_root == cfg.review_root
        || cfg.destination_root == cfg.review_root
    {
        return Err(anyhow!(
            "source, destination, and review roots must be distinct directories"
        ));
    }
    // Surfaces a bad [container_priority] table before any file is touched.
    PriorityTable::with_overrides(&cfg.container_priority)?;
    Ok(())
}

/// Load and validate the run configuration.
pub fn load(cli: &CliOverrides) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(path) = resolve_config_path(cli) {
        merge_file_config(&mut cfg, &path)?;
    }

    cfg.source_root = env_or_path("TRACKCULL_SOURCE_ROOT", cfg.source_root);
    cfg.destination_root = env_or_path("TRACKCULL_DESTINATION_ROOT", cfg.destination_root);
    cfg.review_root = env_or_path("TRACKCULL_REVIEW_ROOT", cfg.review_root);
    cfg.dry_run = env_or_bool("TRACKCULL_DRY_RUN", cfg.dry_run);
    cfg.copy_instead_of_move = env_or_bool("TRACKCULL_COPY", cfg.copy_instead_of_move);
    if let Ok(v) = env::var("TRACKCULL_LOG_PATH") {
        if !v.trim().is_empty() {
            cfg.log_path = Some(PathBuf::from(v.trim()));
        }
    }

    if let Some(v) = &cli.source_root {
        cfg.source_root = v.clone();
    }
    if let Some(v) = &cli.destination_root {
        cfg.destination_root = v.clone();
    }
    if let Some(v) = &cli.review_root {
        cfg.review_root = v.clone();
    }
    if cli.dry_run {
        cfg.dry_run = true;
    }
    if cli.copy_instead_of_move {
        cfg.copy_instead_of_move = true;
    }
    if let Some(v) = &cli.log_path {
        cfg.log_path = Some(v.clone());
    }

    validate(&cfg)?;
    Ok(cfg)
}

impl Config {
    pub fn priority_table(&self) -> Result<PriorityTable> {
        PriorityTable::with_overrides(&self.container_priority)
    }
}
