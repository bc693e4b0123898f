use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spendsight_finance::{InsightConfig, Provider};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::spendsight_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub insights: InsightsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsSection {
    pub provider: String,
    /// Unset fields fall back to the provider's defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Name of the env var holding the API key; the key itself is never stored here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for InsightsSection {
    fn default() -> Self {
        let provider = Provider::OpenAI;
        Self {
            provider: provider.to_string(),
            model: Some(provider.default_model().to_string()),
            base_url: Some(provider.default_base_url().to_string()),
            api_key_env: Some(provider.default_api_key_env().to_string()),
            temperature: spendsight_finance::insights::DEFAULT_TEMPERATURE,
            max_tokens: spendsight_finance::insights::DEFAULT_MAX_TOKENS,
        }
    }
}

impl InsightsSection {
    pub fn provider(&self) -> spendsight_core::Result<Provider> {
        self.provider.parse()
    }

    pub fn api_key_env(&self) -> spendsight_core::Result<String> {
        let provider = self.provider()?;
        Ok(self
            .api_key_env
            .clone()
            .unwrap_or_else(|| provider.default_api_key_env().to_string()))
    }

    /// Build the client config, reading the key through `lookup`.
    /// Fails before any work is done if the key is missing.
    pub fn resolve(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
        model_override: Option<&str>,
    ) -> spendsight_core::Result<InsightConfig> {
        let provider = self.provider()?;
        let key_env = self.api_key_env()?;

        let api_key = lookup(&key_env)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                spendsight_core::Error::Config(format!(
                    "{key_env} is not set; export your {provider} API key before running analyze"
                ))
            })?;

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(spendsight_core::Error::Config(format!(
                "temperature {} is out of range 0.0..=2.0",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(spendsight_core::Error::Config(
                "max_tokens must be greater than zero".to_string(),
            ));
        }

        let mut cfg = InsightConfig::new(provider, api_key)?;
        if let Some(base_url) = &self.base_url {
            cfg = cfg.with_base_url(base_url.as_str());
        }
        if let Some(model) = model_override.or(self.model.as_deref()) {
            cfg = cfg.with_model(model);
        }
        cfg.temperature = self.temperature;
        cfg.max_tokens = self.max_tokens;
        Ok(cfg)
    }
}

/// Resolving the path never creates the home directory; only saving does
pub fn config_path() -> Result<PathBuf> {
    Ok(spendsight_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    save_config_to(&config_path()?, cfg)
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let p = config_path()?;
    let cfg = load_config()?;
    let source = if p.exists() { "file" } else { "defaults" };
    println!("# {} ({})", p.display(), source);
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendsight_core::Error;

    fn env_with(key: &'static str, value: &'static str) -> impl Fn(&str) -> Option<String> {
        move |name: &str| (name == key).then(|| value.to_string())
    }

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(s.contains("[insights]"));
        assert!(s.contains("OPENAI_API_KEY"));
        let cfg = parse_config(&s).unwrap();
        assert_eq!(cfg.insights.provider, "openai");
        assert_eq!(cfg.insights.max_tokens, 150);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.insights.provider, "openai");
        assert_eq!(cfg.insights.temperature, 0.7);
    }

    #[test]
    fn test_resolve_openai_defaults() {
        let section = InsightsSection::default();
        let cfg = section
            .resolve(env_with("OPENAI_API_KEY", "sk-abc"), None)
            .unwrap();
        assert_eq!(cfg.provider, Provider::OpenAI);
        assert_eq!(cfg.api_key, "sk-abc");
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert_eq!(cfg.base_url, "https://api.openai.com");
        assert_eq!(cfg.max_tokens, 150);
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let section = InsightsSection::default();
        let err = section.resolve(|_| None, None).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("OPENAI_API_KEY")));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let section = InsightsSection::default();
        let err = section
            .resolve(env_with("OPENAI_API_KEY", "   "), None)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_anthropic_section_falls_back_to_provider_defaults() {
        let cfg = parse_config(
            r#"
[insights]
provider = "anthropic"
"#,
        )
        .unwrap();
        let resolved = cfg
            .insights
            .resolve(env_with("ANTHROPIC_API_KEY", "sk-ant-1"), None)
            .unwrap();
        assert_eq!(resolved.provider, Provider::Anthropic);
        assert_eq!(resolved.base_url, "https://api.anthropic.com");
        assert_eq!(resolved.model, Provider::Anthropic.default_model());
    }

    #[test]
    fn test_model_override_wins() {
        let section = InsightsSection::default();
        let cfg = section
            .resolve(env_with("OPENAI_API_KEY", "sk-abc"), Some("gpt-4o"))
            .unwrap();
        assert_eq!(cfg.model, "gpt-4o");
    }

    #[test]
    fn test_custom_key_env() {
        let cfg = parse_config(
            r#"
[insights]
api_key_env = "MY_LLM_KEY"
base_url = "http://localhost:8080/"
"#,
        )
        .unwrap();
        let resolved = cfg
            .insights
            .resolve(env_with("MY_LLM_KEY", "k"), None)
            .unwrap();
        assert_eq!(resolved.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let cfg = parse_config("[insights]\nprovider = \"gemini\"\n").unwrap();
        let err = cfg.insights.resolve(|_| Some("k".into()), None).unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("gemini")));
    }

    #[test]
    fn test_load_missing_config_does_not_create_home() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("spendsight-home");
        let cfg = load_config_from(&home.join("config.toml")).unwrap();
        assert_eq!(cfg.insights.provider, "openai");
        assert!(!home.exists());
    }

    #[test]
    fn test_save_creates_home_then_loads_back() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("spendsight-home").join("config.toml");
        let mut cfg = Config::default();
        cfg.insights.provider = "anthropic".to_string();
        cfg.insights.max_tokens = 300;

        save_config_to(&p, &cfg).unwrap();
        assert!(p.exists());

        let loaded = load_config_from(&p).unwrap();
        assert_eq!(loaded.insights.provider, "anthropic");
        assert_eq!(loaded.insights.max_tokens, 300);
    }

    #[test]
    fn test_bad_temperature_rejected() {
        let section = InsightsSection {
            temperature: 5.0,
            ..InsightsSection::default()
        };
        let err = section
            .resolve(env_with("OPENAI_API_KEY", "sk-abc"), None)
            .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("temperature")));
    }
}
