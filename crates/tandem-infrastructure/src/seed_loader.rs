//! Resolves the seed used to initialize the stores.

use std::fs;
use tandem_core::TandemError;
use tandem_core::config::SeedConfig;
use tandem_core::error::Result;
use tandem_core::seed::SeedData;

/// Reads the seed file named in `config`, or the built-in demo seed.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub fn load_seed(config: &SeedConfig) -> Result<SeedData> {
    let Some(path) = &config.path else {
        tracing::debug!("[SeedLoader] Using built-in demo seed");
        return SeedData::demo();
    };

    let content = fs::read_to_string(path).map_err(|e| {
        TandemError::io(format!("failed to read seed {}: {}", path.display(), e))
    })?;
    let seed = SeedData::from_toml_str(&content)?;
    tracing::info!(
        "[SeedLoader] Loaded seed from {} ({} partners, {} threads)",
        path.display(),
        seed.partners.len(),
        seed.threads.len()
    );
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_path_uses_demo() {
        let seed = load_seed(&SeedConfig::default()).unwrap();

        assert_eq!(seed, SeedData::demo().unwrap());
    }

    #[test]
    fn test_custom_seed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seed.toml");
        fs::write(
            &path,
            r#"
[[partners]]
id = "p1"
name = "Ana Costa"
native_language = "Portuguese"
learning_language = "English"
rating = 4.5
availability = "Evenings"
"#,
        )
        .unwrap();

        let seed = load_seed(&SeedConfig { path: Some(path) }).unwrap();

        assert_eq!(seed.partners.len(), 1);
        assert!(seed.threads.is_empty());
    }

    #[test]
    fn test_missing_seed_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = SeedConfig {
            path: Some(temp_dir.path().join("missing.toml")),
        };

        assert!(load_seed(&config).unwrap_err().is_io());
    }
}
