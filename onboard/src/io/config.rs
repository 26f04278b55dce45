//! Workflow tuning configuration stored in `onboard.toml`.
//!
//! The provisioning targets (group name, description, policies) are workflow
//! constants in `core::policy`; this file only tunes pacing and delays.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Pacing strategy selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PacingKind {
    FixedDelay,
    TokenBucket,
}

/// Onboard configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to sensible values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OnboardConfig {
    /// Delay after each invite/membership call when pacing is fixed-delay.
    pub item_delay_ms: u64,

    /// Settle delay before the membership stage, bridging the provider's
    /// invitation propagation latency. Tunable because the right value is
    /// empirical and provider-dependent.
    pub settle_delay_secs: u64,

    /// Optional deadline per provider call. Absent means wait indefinitely.
    pub call_timeout_secs: Option<u64>,

    /// Truncate captured provider output beyond this many bytes.
    pub output_limit_bytes: usize,

    pub pacing: PacingKind,

    /// Burst size when pacing is token-bucket.
    pub token_bucket_capacity: u32,

    /// Sustained calls per second when pacing is token-bucket.
    pub token_bucket_refill_per_sec: f64,
}

impl Default for OnboardConfig {
    fn default() -> Self {
        Self {
            item_delay_ms: 2_000,
            settle_delay_secs: 30,
            call_timeout_secs: None,
            output_limit_bytes: 100_000,
            pacing: PacingKind::FixedDelay,
            token_bucket_capacity: 5,
            token_bucket_refill_per_sec: 0.5,
        }
    }
}

impl OnboardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        if let Some(0) = self.call_timeout_secs {
            return Err(anyhow!("call_timeout_secs must be > 0 when set"));
        }
        if self.token_bucket_capacity == 0 {
            return Err(anyhow!("token_bucket_capacity must be > 0"));
        }
        if self.token_bucket_refill_per_sec <= 0.0 || self.token_bucket_refill_per_sec.is_nan() {
            return Err(anyhow!("token_bucket_refill_per_sec must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `OnboardConfig::default()`.
pub fn load_config(path: &Path) -> Result<OnboardConfig> {
    if !path.exists() {
        let cfg = OnboardConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: OnboardConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &OnboardConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
