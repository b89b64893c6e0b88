// src/config/compute.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const ENV_CONFIG_PATH: &str = "CONFIDENCE_CONFIG_PATH";
pub const ENV_STEP_DELAY_MS: &str = "CONFIDENCE_STEP_DELAY_MS";
pub const ENV_MAX_VERTICES: &str = "CONFIDENCE_MAX_VERTICES";

pub const DEFAULT_TOML_PATH: &str = "config/confidence.toml";
pub const DEFAULT_JSON_PATH: &str = "config/confidence.json";

const HISTORY_CAPACITY_LIMIT: usize = 10_000;
/// Largest vertex bound accepted from files or env; every round is O(n²).
const MAX_VERTICES_LIMIT: usize = 256;

fn default_vertex_count() -> usize {
    7
}
fn default_step_delay_ms() -> u64 {
    300
}
fn default_max_vertices() -> usize {
    64
}
fn default_history_capacity() -> usize {
    200
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeConfig {
    /// Size of the empty graph handed out when a driver has no input.
    #[serde(default = "default_vertex_count")]
    pub default_vertex_count: usize,
    /// Pause between rounds for drivers that step progressively.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    /// Upper bound on vertices accepted over HTTP.
    #[serde(default = "default_max_vertices")]
    pub max_vertices: usize,
    /// Past computations kept for `/debug/history`.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            default_vertex_count: default_vertex_count(),
            step_delay_ms: default_step_delay_ms(),
            max_vertices: default_max_vertices(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl ComputeConfig {
    /// Load from an explicit path. Supports TOML or JSON formats.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading compute config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg = parse_config(&content, ext.as_str())
            .with_context(|| format!("parsing compute config {}", path.display()))?;
        Ok(cfg.sanitized())
    }

    /// Resolve config using env var + fallbacks, then apply env overrides:
    /// 1) $CONFIDENCE_CONFIG_PATH
    /// 2) config/confidence.toml
    /// 3) config/confidence.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        let base = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else if Path::new(DEFAULT_TOML_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_TOML_PATH))?
        } else if Path::new(DEFAULT_JSON_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_JSON_PATH))?
        } else {
            Self::default()
        };

        let cfg = base.with_env_overrides().sanitized();
        info!(
            default_vertex_count = cfg.default_vertex_count,
            step_delay_ms = cfg.step_delay_ms,
            max_vertices = cfg.max_vertices,
            "compute config loaded"
        );
        Ok(cfg)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(ms) = parse_env::<u64>(ENV_STEP_DELAY_MS) {
            self.step_delay_ms = ms;
        }
        if let Some(n) = parse_env::<usize>(ENV_MAX_VERTICES) {
            self.max_vertices = n;
        }
        self
    }

    fn sanitized(mut self) -> Self {
        if self.max_vertices < 2 {
            warn!(max_vertices = self.max_vertices, "max_vertices below 2, using default");
            self.max_vertices = default_max_vertices();
        }
        if self.max_vertices > MAX_VERTICES_LIMIT {
            warn!(
                max_vertices = self.max_vertices,
                limit = MAX_VERTICES_LIMIT,
                "max_vertices above limit, capping"
            );
            self.max_vertices = MAX_VERTICES_LIMIT;
        }
        if self.default_vertex_count > self.max_vertices {
            self.default_vertex_count = self.max_vertices;
        }
        self.history_capacity = self.history_capacity.min(HISTORY_CAPACITY_LIMIT);
        self
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring unparsable env override");
            None
        }
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<ComputeConfig> {
    // Try TOML first if hinted or the content does not look like JSON.
    let try_toml = hint_ext == "toml" || !s.trim_start().starts_with('{');
    if try_toml {
        if let Ok(v) = toml::from_str::<ComputeConfig>(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = serde_json::from_str::<ComputeConfig>(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = toml::from_str::<ComputeConfig>(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported compute config format"))
}
