// src/config.rs

//! Configuration loading utilities.
//!
//! Both the parameters and the presets file are required; any problem with
//! either is reported before the first request is made.

use std::path::Path;

use crate::error::Result;
use crate::models::{Config, Presets};
use crate::services::EstateSelectors;

/// Load and validate parameters and presets.
pub fn load_all(config_path: &Path, presets_path: &Path) -> Result<(Config, Presets)> {
    let config = Config::load(config_path)?;
    config.validate()?;

    let presets = Presets::load(presets_path)?;
    presets.validate()?;
    // Surface unusable class names now rather than on the first page.
    EstateSelectors::from_presets(&presets)?;

    log::debug!(
        "Loaded parameters from {} and presets from {}",
        config_path.display(),
        presets_path.display()
    );

    Ok((config, presets))
}
