use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::fit::SizeDerivation;

/// Tuning for [`AutoSize`](crate::binding::AutoSize).
///
/// Every key is optional; an empty document yields the defaults, which match
/// the behavior of a bare binding: literal size derivation, no query timeout.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AutoSizeConfig {
    /// How the preview height is derived from the chosen ratio.
    pub size_derivation: SizeDerivation,
    /// Give up on the capability query after this long. `None` waits forever.
    #[serde(with = "humantime_serde")]
    pub query_timeout: Option<Duration>,
    /// Drop the supported ratio list when the camera handle goes away.
    pub clear_on_disconnect: bool,
}

impl AutoSizeConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(s).context("parsing autosize config")?;
        cfg.validated()
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml_str(&s)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        if let Some(timeout) = self.query_timeout {
            ensure!(!timeout.is_zero(), "query-timeout must be greater than zero");
        }
        Ok(self)
    }
}

impl Default for AutoSizeConfig {
    fn default() -> Self {
        Self {
            size_derivation: SizeDerivation::default(),
            query_timeout: None,
            clear_on_disconnect: true,
        }
    }
}
