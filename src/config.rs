use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::animation::driver::MountOptions;
use crate::animation::options::{AnimationOptions, AnimationOverrides};
use crate::foundation::error::{HitsujunError, HitsujunResult};

/// Player settings loaded from a JSON file.
///
/// ```json
/// { "svg_dir": "kanji", "metadata_path": "kanji.json", "autoplay": true,
///   "animation": { "draw_duration_ms": 1000 } }
/// ```
///
/// Relative paths are resolved against the directory holding the config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Directory of `<codepoint>.svg` stroke files.
    pub svg_dir: PathBuf,
    /// JSON metadata dictionary, if any.
    pub metadata_path: Option<PathBuf>,
    /// Start drawing as soon as a glyph is mounted.
    pub autoplay: bool,
    /// Animation settings; unset fields follow [`PlayerConfig::animation_options`].
    pub animation: AnimationOverrides,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            svg_dir: PathBuf::from("svg"),
            metadata_path: None,
            autoplay: false,
            animation: AnimationOverrides::default(),
        }
    }
}

impl PlayerConfig {
    /// Parse and validate a config document.
    pub fn from_json(json: &str) -> HitsujunResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load, validate and resolve relative paths against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> HitsujunResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg = Self::from_json(&json)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.svg_dir = base.join(&cfg.svg_dir);
        cfg.metadata_path = cfg.metadata_path.map(|p| base.join(p));
        Ok(cfg)
    }

    /// Reject an empty `svg_dir` and invalid animation options.
    pub fn validate(&self) -> HitsujunResult<()> {
        if self.svg_dir.as_os_str().is_empty() {
            return Err(HitsujunError::validation("svg_dir must not be empty"));
        }
        self.animation_options().validate()
    }

    /// Resolved animation options: the autoplay lead-in applies unless the file sets a delay.
    pub fn animation_options(&self) -> AnimationOptions {
        let base = if self.autoplay {
            AnimationOptions::autoplay()
        } else {
            AnimationOptions::default()
        };
        self.animation.resolve(&base)
    }

    /// Mount options implied by this config.
    pub fn mount_options(&self) -> MountOptions {
        MountOptions {
            autoplay: self.autoplay,
            animation: self.animation_options(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
