use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::settings::Settings;

/// Error type for settings I/O
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse settings: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not serialize settings: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read settings. A missing file is not an error and yields defaults.
pub fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => {
            return Err(SettingsError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    Ok(toml::from_str(&text)?)
}

/// Startup variant of [`read_settings`]: any failure is logged and
/// replaced by defaults.
pub fn load_settings(path: &Path) -> Settings {
    match read_settings(path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "using default settings");
            Settings::default()
        }
    }
}

/// Write settings atomically (temp file in the same directory, then rename).
pub fn write_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let text = toml::to_string_pretty(settings)?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let write_err = |source| SettingsError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    tracing::debug!(path = %path.display(), "saved settings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::settings::Position;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = read_settings(&tmp.path().join("yellowstrip.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn write_and_read_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("yellowstrip.toml");

        let mut settings = Settings::default();
        settings.position = Position::at(12, 3);
        settings.opacity.opacity = 55;
        settings
            .ui
            .colors
            .insert("text".into(), "#E0E0E0".into());

        write_settings(&path, &settings).unwrap();
        let loaded = read_settings(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn written_file_uses_the_two_scopes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("yellowstrip.toml");
        let mut settings = Settings::default();
        settings.position = Position::at(1, 2);
        write_settings(&path, &settings).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("[position]"));
        assert!(text.contains("[opacity]"));
        assert!(text.contains("opacity = 90"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("yellowstrip.toml");
        fs::write(&path, "[position\nx = ").unwrap();
        assert!(matches!(
            read_settings(&path),
            Err(SettingsError::ParseError(_))
        ));
        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn overwrite_replaces_previous_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("yellowstrip.toml");
        let mut settings = Settings::default();
        settings.opacity.opacity = 40;
        write_settings(&path, &settings).unwrap();
        settings.opacity.opacity = 70;
        write_settings(&path, &settings).unwrap();
        assert_eq!(read_settings(&path).unwrap().opacity.opacity, 70);
    }
}
