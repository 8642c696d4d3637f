use std::path::Path;

use anyhow::Context as _;

use crate::animation::ease::EaseOut;
use crate::foundation::error::{SegueError, SegueResult};

/// Options controlling broker behavior.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrokerOpts {
    /// Per-frame progress stepper.
    pub easing: EaseOut,
    /// Compensate captured rectangles for host scrolling between capture and arming.
    pub scroll_correction: bool,
}

impl Default for BrokerOpts {
    fn default() -> Self {
        Self {
            easing: EaseOut::default(),
            scroll_correction: true,
        }
    }
}

impl BrokerOpts {
    /// Validate option invariants.
    pub fn validate(&self) -> SegueResult<()> {
        self.easing.validate()
    }

    /// Parse and validate options from JSON.
    pub fn from_json_str(s: &str) -> SegueResult<Self> {
        let opts: Self = serde_json::from_str(s).map_err(|e| SegueError::serde(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read, parse and validate options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SegueResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read broker options '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/broker/opts.rs"]
mod tests;
