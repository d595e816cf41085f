use anyhow::{Context, Result};
use jsonc_parser::{parse_to_serde_value, ParseOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Config;

/// Env var naming an extra config file, loaded between global and project.
pub const CONFIG_ENV_VAR: &str = "SMARTDICT_CONFIG";

/// The original deployment's only environment knob; overrides any
/// configured port.
pub const PORT_ENV_VAR: &str = "PORT";

pub struct ConfigLoader {
    config: Config,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn load_from_str(&mut self, content: &str) -> Result<()> {
        let config = parse_jsonc(content).context("Failed to parse config content")?;
        self.config.merge(config);
        Ok(())
    }

    /// Absent files are not an error; a config file is always optional.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let content = substitute_env_vars(&content);

        let config = parse_jsonc(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        self.config.merge(config);
        Ok(())
    }

    pub fn load_global(&mut self) -> Result<()> {
        let global_config_path = global_config_path();

        for ext in &["jsonc", "json"] {
            let path = global_config_path.with_extension(ext);
            if path.exists() {
                self.load_from_file(&path)?;
                break;
            }
        }

        Ok(())
    }

    pub fn load_from_env(&mut self) -> Result<()> {
        if let Ok(config_path) = env::var(CONFIG_ENV_VAR) {
            self.load_from_file(&config_path)?;
        }

        Ok(())
    }

    pub fn load_project<P: AsRef<Path>>(&mut self, project_dir: P) -> Result<()> {
        for name in &["smartdict.jsonc", "smartdict.json"] {
            let path = project_dir.as_ref().join(name);
            if path.exists() {
                self.load_from_file(&path)?;
                break;
            }
        }

        Ok(())
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load all config sources. Merge order: global -> SMARTDICT_CONFIG path ->
/// project file, then the PORT env override on top.
pub fn load_config<P: AsRef<Path>>(project_dir: P) -> Result<Config> {
    let mut loader = ConfigLoader::new();
    loader.load_global()?;
    loader.load_from_env()?;
    loader.load_project(project_dir)?;

    let mut config = loader.into_config();
    apply_port_override(&mut config, env::var(PORT_ENV_VAR).ok().as_deref());
    Ok(config)
}

fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("smartdict")
        .join("smartdict")
}

fn parse_jsonc(content: &str) -> Result<Config> {
    let value = parse_to_serde_value(content, &ParseOptions::default())
        .map_err(|e| anyhow::anyhow!("JSONC parse error: {}", e))?
        .ok_or_else(|| anyhow::anyhow!("Config content is empty"))?;
    Ok(serde_json::from_value(value)?)
}

static ENV_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{env:([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Replace `{env:VAR}` placeholders with the variable's value; unset
/// variables become the empty string.
fn substitute_env_vars(content: &str) -> String {
    ENV_PLACEHOLDER
        .replace_all(content, |caps: &regex::Captures| {
            env::var(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

fn apply_port_override(config: &mut Config, port: Option<&str>) {
    let Some(raw) = port else {
        return;
    };

    match raw.trim().parse::<u16>() {
        Ok(port) => {
            config
                .server
                .get_or_insert_with(Default::default)
                .port = Some(port);
        }
        Err(_) => {
            tracing::warn!(value = raw, "ignoring unparseable PORT override");
        }
    }
}
