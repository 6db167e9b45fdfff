//! CLI Command Implementations

use std::path::Path;

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::RotConfig;
use crate::error::Result;
use crate::process::process_file;

/// Run the full degradation pipeline over one file.
pub fn degrade(input: &Path, config_path: Option<&Path>, seed: Option<u64>) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            RotConfig::from_json_file(path)?
        }
        None => RotConfig::default(),
    };

    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let output = process_file(input, &config, &mut rng)?;

    println!("Intermediate (pre-corruption): {}", output.intermediate.display());
    println!(
        "Full rot complete! Output: {} (working rate {} Hz, {} byte writes)",
        output.rotted.display(),
        output.working_rate,
        output.bytes_corrupted
    );

    Ok(())
}

/// Emit the default configuration as pretty JSON.
pub fn example_config(path: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(&RotConfig::default())?;

    match path {
        Some(path) => {
            std::fs::write(path, format!("{}\n", text))?;
            println!("Wrote default configuration to {}", path.display());
        }
        None => println!("{}", text),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_example_config_writes_loadable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rot.json");

        example_config(Some(&path)).unwrap();

        let config = RotConfig::from_json_file(&path).unwrap();
        assert!(config.validate().is_ok());
    }
}
