//! Upgrade configuration files written by older versions.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(AppError::Config(format!(
            "{}: top level must be a mapping",
            path.display()
        ))),
        Err(e) => Err(AppError::Config(format!("{}: {e}", path.display()))),
    }
}

fn defaults_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default()) {
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(_) => Err(AppError::Config("default config is not a mapping".into())),
        Err(e) => Err(AppError::Config(e.to_string())),
    }
}

/// Top-level keys present in the current format but absent from `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    Ok(defaults_mapping()?
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add missing keys with their default value. Existing values are never
/// touched. Returns `true` if the file was rewritten.
pub fn run_config_migrations(path: &Path) -> AppResult<bool> {
    if !path.exists() {
        info(format!("No configuration file at {}", path.display()));
        return Ok(false);
    }

    let mut current = read_mapping(path)?;
    let mut added = Vec::new();

    for (k, v) in defaults_mapping()? {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    if added.is_empty() {
        return Ok(false);
    }

    let yaml = serde_yaml::to_string(&current).map_err(|e| AppError::Config(e.to_string()))?;
    fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
    success(format!("Configuration updated, added: {}", added.join(", ")));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn fills_only_missing_keys() {
        let mut path = env::temp_dir();
        path.push("mjledger_config_migrate_test.conf");
        fs::write(&path, "store: /tmp/keep.sqlite\nmin_games: 9\n").unwrap();

        let missing = missing_fields(&path).unwrap();
        assert!(missing.contains(&"rules".to_string()));
        assert!(!missing.contains(&"store".to_string()));

        assert!(run_config_migrations(&path).unwrap());
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.store, "/tmp/keep.sqlite");
        assert_eq!(cfg.min_games, 9);
        assert!(missing_fields(&path).unwrap().is_empty());
        assert!(!run_config_migrations(&path).unwrap());
    }
}
