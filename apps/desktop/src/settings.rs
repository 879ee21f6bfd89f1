use std::path::{Path, PathBuf};

use staffdrill_domain::DrillSettings;
use tracing::warn;

pub fn settings_path() -> Option<PathBuf> {
    let base = dirs::config_dir()?;
    let dir = base.join("staffdrill");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join("settings.json"))
}

pub fn save_settings_to(path: &Path, data: &DrillSettings) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<DrillSettings> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn save_settings(data: &DrillSettings) -> anyhow::Result<()> {
    if let Some(path) = settings_path() {
        save_settings_to(&path, data)?;
    }
    Ok(())
}

/// Stored preferences, or defaults when there is no readable file.
pub fn load_settings() -> DrillSettings {
    let Some(path) = settings_path() else {
        return DrillSettings::default();
    };
    if !path.exists() {
        return DrillSettings::default();
    }
    load_settings_from(&path).unwrap_or_else(|err| {
        warn!(%err, path = %path.display(), "could not read settings, using defaults");
        DrillSettings::default()
    })
}
