use crate::errors::WidgetError;
use crate::models::{CurrencyCode, CurrencyConfig, Validate};
use lazy_static::lazy_static;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// Validated mapping from currency code to its donation configuration.
///
/// Built once from the JSON the page embeds and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CurrencyTable {
    currencies: BTreeMap<CurrencyCode, CurrencyConfig>,
}

impl CurrencyTable {
    pub fn from_json(source: &str) -> Result<Self, WidgetError> {
        let currencies: BTreeMap<CurrencyCode, CurrencyConfig> = serde_json::from_str(source)?;
        Self::from_map(currencies)
    }

    pub fn from_map(currencies: BTreeMap<CurrencyCode, CurrencyConfig>) -> Result<Self, WidgetError> {
        if currencies.is_empty() {
            return Err(WidgetError::InvalidConfiguration {
                code: String::new(),
                reason: "table has no currencies".to_string(),
            });
        }

        for (code, config) in &currencies {
            if !code.as_str().eq_ignore_ascii_case(&config.code) {
                return Err(WidgetError::InvalidConfiguration {
                    code: code.to_string(),
                    reason: format!("key does not match code {:?}", config.code),
                });
            }
            config.validate().map_err(|reason| WidgetError::InvalidConfiguration {
                code: code.to_string(),
                reason,
            })?;
        }

        debug!("Loaded currency table with {} currencies", currencies.len());
        Ok(Self { currencies })
    }

    pub fn get(&self, code: &CurrencyCode) -> Option<&CurrencyConfig> {
        self.currencies.get(code)
    }

    /// Lookup for codes that come from the same source as the table; a miss
    /// is a data error.
    pub fn require(&self, code: &CurrencyCode) -> Result<&CurrencyConfig, WidgetError> {
        self.get(code)
            .ok_or_else(|| WidgetError::UnknownCurrency(code.to_string()))
    }

    pub fn codes(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.currencies.keys()
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

lazy_static! {
    pub static ref DEFAULT_CURRENCY_TABLE: CurrencyTable = {
        let data = include_str!("../config/currencies.json");
        CurrencyTable::from_json(data).expect("Failed to parse embedded currency table")
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    const USD_ONLY: &str = r#"{
        "USD": {"code": "usd", "symbol": "$", "minAmount": 1,
                "presets": {"single": [10, 25, 50], "monthly": [5, 10, 20]},
                "disabled": []}
    }"#;

    #[test]
    fn test_from_json() {
        let table = CurrencyTable::from_json(USD_ONLY).unwrap();
        assert_eq!(table.len(), 1);
        let usd = table.get(&CurrencyCode::new("USD")).unwrap();
        assert_eq!(usd.presets.single, vec![10.0, 25.0, 50.0]);
        assert_eq!(usd.min_amount, 1.0);
    }

    #[test]
    fn test_require_unknown_currency() {
        let table = CurrencyTable::from_json(USD_ONLY).unwrap();
        let result = table.require(&CurrencyCode::new("xyz"));
        assert!(matches!(result, Err(WidgetError::UnknownCurrency(code)) if code == "xyz"));
    }

    #[test]
    fn test_malformed_json() {
        let result = CurrencyTable::from_json(r#"{"usd": {"code": "usd"}}"#);
        assert!(matches!(result, Err(WidgetError::MalformedConfiguration(_))));

        let result = CurrencyTable::from_json("not json");
        assert!(matches!(result, Err(WidgetError::MalformedConfiguration(_))));
    }

    #[test]
    fn test_shape_validation() {
        let result = CurrencyTable::from_json("{}");
        assert!(matches!(result, Err(WidgetError::InvalidConfiguration { .. })));

        let mismatched = USD_ONLY.replace("\"code\": \"usd\"", "\"code\": \"eur\"");
        let result = CurrencyTable::from_json(&mismatched);
        assert!(matches!(result, Err(WidgetError::InvalidConfiguration { code, .. }) if code == "USD"));

        let negative_min = USD_ONLY.replace("\"minAmount\": 1", "\"minAmount\": -1");
        assert!(CurrencyTable::from_json(&negative_min).is_err());

        let huge_preset = USD_ONLY.replace("[10, 25, 50]", "[10, 25, 1e20]");
        let result = CurrencyTable::from_json(&huge_preset);
        assert!(matches!(result, Err(WidgetError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_embedded_table() {
        assert!(!DEFAULT_CURRENCY_TABLE.is_empty());
        let jpy = DEFAULT_CURRENCY_TABLE.get(&CurrencyCode::new("jpy")).unwrap();
        assert_eq!(jpy.disabled, vec!["paypal".to_string()]);
    }

    #[test]
    fn test_json_round_trip_keeps_keys() {
        let table = CurrencyTable::from_json(USD_ONLY).unwrap();
        let json = table.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["USD"]["minAmount"], 1.0);
        assert_eq!(CurrencyTable::from_json(&json).unwrap(), table);
    }
}
