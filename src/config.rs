use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::models::RevenueModel;
use crate::services::llm_service::LlmConfig;

/// Process-wide settings, built once at start-up and shared through `AppState`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub allowed_origins: Vec<String>,
    pub revenue: RevenueModel,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let bind_addr = parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8000)))?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?;

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(|| vec!["http://localhost:3000".to_string()]);

        let mut revenue = RevenueModel::default();
        revenue.default_rate = parse_amount(&lookup, "REVENUE_DEFAULT_RATE", revenue.default_rate)?;
        revenue.conversion_factor =
            parse_amount(&lookup, "REVENUE_CONVERSION_FACTOR", revenue.conversion_factor)?;
        if let Some(raw) = lookup("REVENUE_RATES") {
            revenue.rates.extend(parse_rate_table(&raw)?);
        }

        let api_key = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());
        let defaults = LlmConfig::default();
        let llm = LlmConfig {
            enabled: api_key.is_some(),
            api_key,
            model: lookup("LLM_MODEL").unwrap_or(defaults.model),
            temperature: parse_or(&lookup, "LLM_TEMPERATURE", defaults.temperature)?,
            timeout_secs: parse_or(&lookup, "LLM_TIMEOUT_SECS", defaults.timeout_secs)?,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            allowed_origins,
            revenue,
            llm,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

/// Like `parse_or`, but only finite, non-negative values are accepted.
fn parse_amount<F>(lookup: &F, key: &'static str, default: f64) -> Result<f64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_or(lookup, key, default)?;
    if !is_valid_amount(value) {
        return Err(ConfigError::Invalid { key, value: value.to_string() });
    }
    Ok(value)
}

fn is_valid_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Parses `service=rate,service=rate` pairs.
fn parse_rate_table(raw: &str) -> Result<HashMap<String, f64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let invalid = || ConfigError::Invalid { key: "REVENUE_RATES", value: entry.to_string() };
            let (service, rate) = entry.split_once('=').ok_or_else(invalid)?;
            let rate: f64 = rate.trim().parse().map_err(|_| invalid())?;
            if !is_valid_amount(rate) {
                return Err(invalid());
            }
            Ok((service.trim().to_string(), rate))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_requires_database_url() {
        let result = AppConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/q")])).unwrap();
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000".to_string()]);
        assert_eq!(config.revenue.default_rate, 850.0);
        assert_eq!(config.revenue.conversion_factor, 0.3);
        assert_eq!(config.revenue.rate_for(Some("mobile-app")), 8000.0);
        assert!(!config.llm.enabled);
    }

    #[test]
    fn test_revenue_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/q"),
            ("REVENUE_CONVERSION_FACTOR", "0.25"),
            ("REVENUE_RATES", "seo=1800, consulting=1200"),
        ]))
        .unwrap();

        assert_eq!(config.revenue.conversion_factor, 0.25);
        assert_eq!(config.revenue.rate_for(Some("seo")), 1800.0);
        assert_eq!(config.revenue.rate_for(Some("consulting")), 1200.0);
        // untouched built-in rates survive
        assert_eq!(config.revenue.rate_for(Some("branding")), 3000.0);
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/q"),
            ("REVENUE_RATES", "seo:1800"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: "REVENUE_RATES", .. })));

        let result = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/q"),
            ("DATABASE_MAX_CONNECTIONS", "many"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: "DATABASE_MAX_CONNECTIONS", .. })));
    }

    #[test]
    fn test_revenue_amounts_must_be_finite_and_non_negative() {
        for (key, raw) in [
            ("REVENUE_DEFAULT_RATE", "NaN"),
            ("REVENUE_DEFAULT_RATE", "-850"),
            ("REVENUE_CONVERSION_FACTOR", "inf"),
            ("REVENUE_CONVERSION_FACTOR", "-0.3"),
        ] {
            let result = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/q"), (key, raw)]));
            assert!(
                matches!(result, Err(ConfigError::Invalid { key: k, .. }) if k == key),
                "{}={} should be rejected",
                key,
                raw
            );
        }
    }

    #[test]
    fn test_openai_key_enables_llm() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/q"),
            ("OPENAI_API_KEY", "sk-test"),
            ("CORS_ALLOWED_ORIGINS", "https://quantalyze.co.in, https://www.quantalyze.co.in"),
        ]))
        .unwrap();

        assert!(config.llm.enabled);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.allowed_origins.len(), 2);
    }
}
