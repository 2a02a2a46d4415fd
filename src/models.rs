use crate::amount::{OtherAmountValidity, MAX_OTHER_AMOUNT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape check applied to every configuration entry before it is used.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Key of the currency table, as it appears in the select element's options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-case ISO 4217 form used for formatting.
    pub fn iso(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Donation frequency; each one has its own amount group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Single,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 2] = [Frequency::Single, Frequency::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Single => "single",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Frequency::Single),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(format!("Unsupported frequency: {}", other)),
        }
    }
}

/// Preset amounts per frequency, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presets {
    pub single: Vec<f64>,
    pub monthly: Vec<f64>,
}

impl Presets {
    pub fn for_frequency(&self, frequency: Frequency) -> &[f64] {
        match frequency {
            Frequency::Single => &self.single,
            Frequency::Monthly => &self.monthly,
        }
    }
}

/// One entry of the currency table as the page embeds it.
///
/// `symbol` is only used when the locale has no symbol of its own for the
/// currency. `disabled` lists payment providers that cannot take this
/// currency; each becomes a `<provider>-disabled` class on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyConfig {
    pub code: String,
    pub symbol: String,
    pub min_amount: f64,
    pub presets: Presets,
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Validate for CurrencyConfig {
    fn validate(&self) -> Result<(), String> {
        if self.code.len() != 3 || !self.code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("Currency code must be three letters, got {:?}", self.code));
        }
        if self.symbol.trim().is_empty() {
            return Err("Currency symbol cannot be empty".to_string());
        }
        if !self.min_amount.is_finite() || self.min_amount <= 0.0 {
            return Err(format!("Minimum amount must be greater than 0, got {}", self.min_amount));
        }
        if self.min_amount > MAX_OTHER_AMOUNT {
            return Err(format!(
                "Minimum amount {} exceeds the maximum of {}",
                self.min_amount, MAX_OTHER_AMOUNT
            ));
        }
        for frequency in Frequency::ALL {
            for amount in self.presets.for_frequency(frequency) {
                if !amount.is_finite() || *amount <= 0.0 {
                    return Err(format!("Invalid {} preset amount: {}", frequency, amount));
                }
                if *amount > MAX_OTHER_AMOUNT {
                    return Err(format!(
                        "{} preset amount {} exceeds the maximum of {}",
                        frequency, amount, MAX_OTHER_AMOUNT
                    ));
                }
            }
        }
        for provider in &self.disabled {
            if provider.is_empty() || provider.chars().any(char::is_whitespace) {
                return Err(format!("Invalid disabled provider name: {:?}", provider));
            }
        }
        Ok(())
    }
}

/// One preset radio in an amount group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountChoice {
    pub id: String,
    pub name: String,
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// The trailing "other amount" radio and its numeric input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherAmountControl {
    pub radio_id: String,
    pub input_id: String,
    pub name: String,
    pub label: String,
    pub radio_value: String,
    pub input_value: String,
    pub min: f64,
    pub max: f64,
    pub checked: bool,
}

/// Rendered radio controls of one frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountGroupView {
    pub frequency: Frequency,
    pub choices: Vec<AmountChoice>,
    pub other: OtherAmountControl,
}

impl AmountGroupView {
    /// Number of radio controls, including the "other" radio.
    pub fn control_count(&self) -> usize {
        self.choices.len() + 1
    }

    pub fn checked_count(&self) -> usize {
        self.choices.iter().filter(|choice| choice.checked).count() + usize::from(self.other.checked)
    }
}

/// Everything the page shows for one selected currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyView {
    pub currency: CurrencyCode,
    pub locale: String,
    pub symbol: String,
    pub disabled_classes: Vec<String>,
    pub single: AmountGroupView,
    pub monthly: AmountGroupView,
}

impl CurrencyView {
    pub fn group(&self, frequency: Frequency) -> &AmountGroupView {
        match frequency {
            Frequency::Single => &self.single,
            Frequency::Monthly => &self.monthly,
        }
    }
}

/// Body of `POST /v1/amounts/other`: a raw input value to check.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OtherAmountRequest {
    pub currency: String,
    pub value: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OtherAmountResponse {
    pub currency: CurrencyCode,
    pub valid: bool,
    pub validity: OtherAmountValidity,
    pub radio_value: String, // "0" unless the value is valid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> CurrencyConfig {
        CurrencyConfig {
            code: "usd".to_string(),
            symbol: "$".to_string(),
            min_amount: 1.0,
            presets: Presets {
                single: vec![10.0, 25.0, 50.0],
                monthly: vec![5.0, 10.0, 20.0],
            },
            disabled: vec![],
        }
    }

    #[test]
    fn test_currency_config_deserialize() {
        let config: CurrencyConfig = serde_json::from_str(
            r#"{"code":"usd","symbol":"$","minAmount":1,
                "presets":{"single":[10,25,50],"monthly":[5,10,20]},"disabled":[]}"#,
        )
        .unwrap();
        assert_eq!(config, usd());
    }

    #[test]
    fn test_disabled_defaults_to_empty() {
        let config: CurrencyConfig = serde_json::from_str(
            r#"{"code":"usd","symbol":"$","minAmount":1,"presets":{"single":[],"monthly":[]}}"#,
        )
        .unwrap();
        assert!(config.disabled.is_empty());
    }

    #[test]
    fn test_config_validation() {
        assert!(usd().validate().is_ok());

        let mut config = usd();
        config.min_amount = 0.0;
        assert!(config.validate().is_err());

        let mut config = usd();
        config.min_amount = 20_000_000.0;
        assert!(config.validate().is_err());

        let mut config = usd();
        config.presets.monthly.push(-5.0);
        assert!(config.validate().is_err());

        let mut config = usd();
        config.presets.single.push(1e20);
        assert!(config.validate().is_err());

        let mut config = usd();
        config.presets.single.push(MAX_OTHER_AMOUNT);
        assert!(config.validate().is_ok());

        let mut config = usd();
        config.disabled.push("pay pal".to_string());
        assert!(config.validate().is_err());

        let mut config = usd();
        config.code = "dollar".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("single".parse::<Frequency>(), Ok(Frequency::Single));
        assert_eq!("monthly".parse::<Frequency>(), Ok(Frequency::Monthly));
        assert!("yearly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_currency_code_iso() {
        let code = CurrencyCode::new("usd");
        assert_eq!(code.iso(), "USD");
        assert_eq!(code.to_string(), "usd");
    }
}
