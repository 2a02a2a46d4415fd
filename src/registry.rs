use crate::{
    config::Config,
    currency_data::{CurrencyTable, DEFAULT_CURRENCY_TABLE},
    errors::ServiceError,
    locale::Locale,
    render::Translations,
};
use log::info;
use std::{fs, sync::Arc};

/// Shared, read-only state of the HTTP service.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    pub table: Arc<CurrencyTable>,
    pub locale: Locale,
    pub translations: Translations,
}

impl ServiceRegistry {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let table = match &config.currency_config_path {
            Some(path) => {
                let source = fs::read_to_string(path).map_err(|e| {
                    ServiceError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
                })?;
                info!("Loading currency table from {}", path.display());
                CurrencyTable::from_json(&source)?
            }
            None => DEFAULT_CURRENCY_TABLE.clone(),
        };

        Ok(Self::with_table(
            table,
            Locale::from_attribute(&config.locale),
            config.translations.clone(),
        ))
    }

    pub fn with_table(table: CurrencyTable, locale: Locale, translations: Translations) -> Self {
        Self {
            table: Arc::new(table),
            locale,
            translations,
        }
    }

    /// Locale from a request parameter, or the service default.
    pub fn locale_for(&self, requested: Option<&str>) -> Locale {
        requested
            .map(Locale::from_attribute)
            .unwrap_or_else(|| self.locale.clone())
    }
}
