use crate::errors::ServiceError;
use crate::render::Translations;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub workers: usize,
    pub locale: String,
    pub currency_config_path: Option<PathBuf>, // embedded table when unset
    pub translations: Translations,
}

impl Config {
    pub fn new() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Translations::default();
        let workers = match lookup("DONATE_WORKERS") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|workers| *workers > 0)
                .ok_or_else(|| {
                    ServiceError::ConfigError(format!(
                        "DONATE_WORKERS must be a positive integer, got {:?}",
                        raw
                    ))
                })?,
            None => 4,
        };

        Ok(Self {
            bind_addr: lookup("DONATE_BIND_ADDR").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            workers,
            locale: lookup("DONATE_LOCALE").unwrap_or_else(|| "en_US".to_string()),
            currency_config_path: lookup("DONATE_CURRENCY_CONFIG").map(PathBuf::from),
            translations: Translations {
                per_month: lookup("DONATE_TEXT_PER_MONTH").unwrap_or(defaults.per_month),
                other_amount: lookup("DONATE_TEXT_OTHER_AMOUNT").unwrap_or(defaults.other_amount),
            },
        })
    }
}
