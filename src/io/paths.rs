use std::path::{Path, PathBuf};

pub const DB_FILE: &str = "todo_data.db";
pub const SETTINGS_FILE: &str = "yellowstrip.toml";
pub const LOG_FILE: &str = "yellowstrip.log";

/// Where the widget keeps its files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub db: PathBuf,
    pub settings: PathBuf,
    pub log: PathBuf,
}

impl DataPaths {
    /// All files side by side in `dir`
    pub fn in_dir(dir: &Path) -> Self {
        DataPaths {
            db: dir.join(DB_FILE),
            settings: dir.join(SETTINGS_FILE),
            log: dir.join(LOG_FILE),
        }
    }

    /// Use an explicit database path; settings and log live beside it.
    pub fn for_db(db: &Path) -> Self {
        let dir = db.parent().unwrap_or_else(|| Path::new("."));
        DataPaths {
            db: db.to_path_buf(),
            ..DataPaths::in_dir(dir)
        }
    }

    /// Resolve from the `--db` override, or the directory holding the
    /// running executable.
    pub fn resolve(db_override: Option<&Path>) -> std::io::Result<Self> {
        match db_override {
            Some(db) => Ok(DataPaths::for_db(db)),
            None => Ok(DataPaths::in_dir(&executable_dir()?)),
        }
    }
}

/// Directory containing the running executable
pub fn executable_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
