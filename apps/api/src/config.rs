use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::layout::PageBudget;

/// Application configuration loaded from environment variables.
/// Every variable is optional; startup fails only on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub page_budget: PageBudget,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            page_budget: PageBudget::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let budget = defaults.page_budget;

        let page_budget = PageBudget {
            min_bullets: parse_or("BULLET_MIN", lookup("BULLET_MIN"), budget.min_bullets)?,
            max_bullets: parse_or("BULLET_MAX", lookup("BULLET_MAX"), budget.max_bullets)?,
            max_words_per_bullet: parse_or(
                "BULLET_MAX_WORDS",
                lookup("BULLET_MAX_WORDS"),
                budget.max_words_per_bullet,
            )?,
            max_description_chars: parse_or(
                "EDUCATION_DESCRIPTION_MAX_CHARS",
                lookup("EDUCATION_DESCRIPTION_MAX_CHARS"),
                budget.max_description_chars,
            )?,
        };
        validate_budget(&page_budget)?;

        Ok(Config {
            port: parse_or("PORT", lookup("PORT"), defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            page_budget,
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{value}'")),
        _ => Ok(default),
    }
}

fn validate_budget(budget: &PageBudget) -> Result<()> {
    if budget.min_bullets > budget.max_bullets {
        bail!(
            "BULLET_MIN ({}) cannot exceed BULLET_MAX ({})",
            budget.min_bullets,
            budget.max_bullets
        );
    }
    if budget.max_bullets == 0 || budget.max_words_per_bullet == 0 {
        bail!("BULLET_MAX and BULLET_MAX_WORDS must be positive");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.page_budget, PageBudget::default());
    }

    #[test]
    fn test_budget_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BULLET_MIN", "2"),
            ("BULLET_MAX", " 4 "),
            ("BULLET_MAX_WORDS", "15"),
            ("EDUCATION_DESCRIPTION_MAX_CHARS", "120"),
            ("PORT", "9090"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.page_budget.min_bullets, 2);
        assert_eq!(config.page_budget.max_bullets, 4);
        assert_eq!(config.page_budget.max_words_per_bullet, 15);
        assert_eq!(config.page_budget.max_description_chars, 120);
    }

    #[test]
    fn test_min_above_max_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("BULLET_MIN", "6"), ("BULLET_MAX", "5")]))
            .unwrap_err();
        assert!(err.to_string().contains("BULLET_MIN"));
    }

    #[test]
    fn test_malformed_number_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("BULLET_MAX", "five")])).unwrap_err();
        assert!(err.to_string().contains("BULLET_MAX must be a valid number"));
    }

    #[test]
    fn test_blank_value_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "  ")])).unwrap();
        assert_eq!(config.port, 8080);
    }
}
