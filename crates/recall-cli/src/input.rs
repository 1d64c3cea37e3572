// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::io::Read;
use std::io::stdin;
use std::path::Path;

use recall_core::Config;
use recall_core::ErrorKind;
use recall_core::ErrorReport;
use recall_core::Fallible;
use recall_core::Timestamp;
use recall_core::fail;
use serde::de::DeserializeOwned;

/// Reads a file, or standard input if the path is `-`.
pub fn read_input(path: &Path) -> Fallible<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    if !path.exists() {
        return fail(format!("file does not exist: {}", path.display()));
    }
    Ok(read_to_string(path)?)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Fallible<T> {
    let content = read_input(path)?;
    let value = serde_json::from_str(&content).map_err(|e| {
        ErrorReport::with_kind(
            ErrorKind::InvalidState,
            format!("could not parse {}: {e}", path.display()),
        )
    })?;
    Ok(value)
}

pub fn load_config(path: Option<&Path>) -> Fallible<Config> {
    match path {
        None => Ok(Config::default()),
        Some(path) => {
            if !path.exists() {
                return fail("config file does not exist.");
            }
            log::debug!("Loading configuration from {}.", path.display());
            Config::parse(&read_to_string(path)?)
        }
    }
}

pub fn resolve_now(now: Option<String>) -> Fallible<Timestamp> {
    match now {
        Some(now) => Timestamp::parse(&now),
        None => Ok(Timestamp::now()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_config_is_default() -> Fallible<()> {
        assert_eq!(load_config(None)?, Config::default());
        Ok(())
    }

    #[test]
    fn test_nonexistent_config() {
        let err = load_config(Some(Path::new("./derpherp.toml"))).unwrap_err();
        assert_eq!(err.to_string(), "error: config file does not exist.");
    }

    #[test]
    fn test_config_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("recall.toml");
        write(&path, "[scheduler]\nstrategy = \"sm2\"\n")?;
        let config = load_config(Some(&path))?;
        assert_eq!(config.scheduler.strategy, recall_core::Strategy::Sm2);
        Ok(())
    }

    #[test]
    fn test_bad_json() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("card.json");
        write(&path, "{ not json")?;
        let err = read_json::<serde_json::Value>(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        Ok(())
    }

    #[test]
    fn test_resolve_now() -> Fallible<()> {
        let now = resolve_now(Some("2025-01-01T00:00:00Z".to_string()))?;
        assert_eq!(now.to_rfc3339(), "2025-01-01T00:00:00Z");
        assert!(resolve_now(Some("noon".to_string())).is_err());
        Ok(())
    }
}
