//! Pure computation of what the page shows for one currency.

use crate::amount::{FAIL_CLOSED_VALUE, MAX_OTHER_AMOUNT};
use crate::currency_data::CurrencyTable;
use crate::errors::WidgetError;
use crate::locale::{CurrencyFormatter, Locale};
use crate::models::{
    AmountChoice, AmountGroupView, CurrencyCode, CurrencyConfig, CurrencyView, Frequency,
    OtherAmountControl,
};

/// Suffix of the form-container classes that hide a payment provider.
pub const DISABLED_CLASS_SUFFIX: &str = "-disabled";

/// The two literal strings the amount groups need from the page's
/// translation catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translations {
    pub per_month: String,
    pub other_amount: String,
}

impl Default for Translations {
    fn default() -> Self {
        Self {
            per_month: "per month".to_string(),
            other_amount: "Other amount".to_string(),
        }
    }
}

pub fn disabled_class(provider: &str) -> String {
    format!("{}{}", provider, DISABLED_CLASS_SUFFIX)
}

/// Radio value of a preset: the plain amount, without grouping or symbol.
pub fn preset_value(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", crate::round_to_cents(amount))
    }
}

pub fn render_group(
    frequency: Frequency,
    config: &CurrencyConfig,
    formatter: &CurrencyFormatter,
    translations: &Translations,
) -> AmountGroupView {
    let name = format!("amount-{}", frequency);
    let presets = config.presets.for_frequency(frequency);

    let choices = presets
        .iter()
        .enumerate()
        .map(|(index, amount)| {
            let formatted = formatter.format(*amount);
            let label = match frequency {
                Frequency::Single => formatted,
                Frequency::Monthly => format!("{} {}", formatted, translations.per_month),
            };
            AmountChoice {
                id: format!("{}-{}", name, index),
                name: name.clone(),
                value: preset_value(*amount),
                label,
                checked: index == 0,
            }
        })
        .collect();

    let other = OtherAmountControl {
        radio_id: format!("{}-other", name),
        input_id: format!("{}-other-input", name),
        name,
        label: translations.other_amount.clone(),
        radio_value: FAIL_CLOSED_VALUE.to_string(),
        input_value: String::new(),
        min: config.min_amount,
        max: MAX_OTHER_AMOUNT,
        checked: presets.is_empty(),
    };

    AmountGroupView { frequency, choices, other }
}

pub fn render_currency(
    table: &CurrencyTable,
    locale: &Locale,
    translations: &Translations,
    code: &CurrencyCode,
) -> Result<CurrencyView, WidgetError> {
    let config = table.require(code)?;
    let formatter = CurrencyFormatter::new(locale, &code.iso(), &config.symbol);

    Ok(CurrencyView {
        currency: code.clone(),
        locale: locale.to_string(),
        symbol: formatter.symbol().to_string(),
        disabled_classes: config.disabled.iter().map(|p| disabled_class(p)).collect(),
        single: render_group(Frequency::Single, config, &formatter, translations),
        monthly: render_group(Frequency::Monthly, config, &formatter, translations),
    })
}
