//! Serialization utilities with robust error handling.

use crate::error::{IoError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serializes data to compact JSON.
pub fn to_json<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    serde_json::to_string(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

pub fn to_json_pretty<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

/// Deserializes data from a JSON string. Blank input is rejected before
/// parsing.
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if json.trim().is_empty() {
        return Err(IoError::validation("Empty JSON string"));
    }

    serde_json::from_str(json)
        .map_err(|e| IoError::serialization(format!("JSON deserialization failed: {}", e)))
}

/// Writes `contents` next to `path`, then renames it into place so readers
/// never see a half-written file.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("creating {:?}", tmp_path))
        })?;
        let mut writer = BufWriter::new(file);
        writer.write_all(contents)?;
        writer.flush()?;
    }
    std::fs::rename(&tmp_path, path)
        .map_err(|e| IoError::FileSystem(e).with_context(format!("replacing {:?}", path)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use salamandra_data::{Hsl, SalamanderColors};

    #[test]
    fn test_empty_json_fails() {
        let result: Result<SalamanderColors> = from_json("  \n");
        assert!(matches!(result, Err(IoError::Validation(_))));
    }

    #[test]
    fn test_invalid_json_fails() {
        let result: Result<SalamanderColors> = from_json("{ invalid json");
        assert!(matches!(result, Err(IoError::Serialization(_))));
    }

    #[test]
    fn test_fractional_colors_survive() {
        let colors = SalamanderColors {
            primary: Hsl::new(101.123_456_789_012_34, 45.1, 0.1 + 0.2),
            secondary: Hsl::new(359.999_999_999, 33.3, 41.7),
            belly: Hsl::new(72.5, 25.0, 61.000_000_000_1),
        };
        let restored: SalamanderColors = from_json(&to_json(&colors).unwrap()).unwrap();
        assert_eq!(colors, restored);
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let dir = std::env::temp_dir().join(format!("salamandra_ser_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("colors.json");

        write_atomic(&path, b"first").unwrap();
        let json = to_json(&SalamanderColors::albino()).unwrap();
        write_atomic(&path, json.as_bytes()).unwrap();

        assert!(!path.with_extension("tmp").exists());
        let restored: SalamanderColors =
            from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored, SalamanderColors::albino());

        std::fs::remove_dir_all(&dir).ok();
    }
}
