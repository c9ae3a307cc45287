// runtime configuration: threat model and standing user inputs

use std::path::Path;

use serde::Deserialize;

/// threat model converting entropy to crack time
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrackTimeParams {
    /// seconds one attacker machine needs for a single guess
    pub single_guess: f64,
    /// number of machines guessing in parallel
    pub num_attackers: u64,
}

impl Default for CrackTimeParams {
    fn default() -> Self {
        CrackTimeParams {
            single_guess: 0.01,
            num_attackers: 100,
        }
    }
}

/// top-level configuration from .pasforto.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub threat: CrackTimeParams,
    /// standing user-specific words, merged with per-call user inputs
    #[serde(default)]
    pub user_inputs: Vec<String>,
}

pub const CONFIG_FILE: &str = ".pasforto.toml";

/// load the config file from the given directory (if it exists)
pub fn load_config(dir: Option<&Path>) -> Result<ProjectConfig, String> {
    if let Some(dir) = dir {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
            let config: ProjectConfig = toml::from_str(&content)
                .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;
            return Ok(config);
        }
    }
    Ok(ProjectConfig::default())
}
