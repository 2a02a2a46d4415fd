use crate::amount::SelectionMode;
use crate::models::{AmountGroupView, Frequency};
use crate::page::PageBoundary;
use std::collections::HashMap;

/// In-memory donation page: one form root, a currency select, a few
/// currency-symbol nodes and hidden currency inputs.
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    pub config_source: Option<String>,
    pub locale: Option<String>,
    pub select_value: Option<String>,
    pub symbol_nodes: Vec<String>,
    pub currency_inputs: Vec<String>,
    pub classes: Vec<String>,
    pub groups: HashMap<Frequency, AmountGroupView>,
    pub render_count: usize,
}

impl MockPage {
    pub fn new(config_source: impl Into<String>, locale: &str, currency: &str) -> Self {
        Self {
            config_source: Some(config_source.into()),
            locale: Some(locale.to_string()),
            select_value: Some(currency.to_string()),
            symbol_nodes: vec![String::new(); 3],
            currency_inputs: vec![String::new(); 2],
            classes: vec!["donate-form".to_string()],
            ..Default::default()
        }
    }

    /// Simulates the user picking another option in the currency select.
    pub fn choose_currency(&mut self, currency: &str) {
        self.select_value = Some(currency.to_string());
    }

    pub fn group(&self, frequency: Frequency) -> Option<&AmountGroupView> {
        self.groups.get(&frequency)
    }

    pub fn other_radio_value(&self, frequency: Frequency) -> Option<&str> {
        self.group(frequency).map(|group| group.other.radio_value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

impl PageBoundary for MockPage {
    fn locale_attribute(&self) -> Option<String> {
        self.locale.clone()
    }

    fn currency_config_source(&self) -> Option<String> {
        self.config_source.clone()
    }

    fn selected_currency(&self) -> Option<String> {
        self.select_value.clone()
    }

    fn render_amount_group(&mut self, view: &AmountGroupView) {
        self.render_count += 1;
        self.groups.insert(view.frequency, view.clone());
    }

    fn set_currency_symbols(&mut self, symbol: &str) {
        for node in &mut self.symbol_nodes {
            *node = symbol.to_string();
        }
    }

    fn set_form_currency(&mut self, code: &str) {
        for input in &mut self.currency_inputs {
            *input = code.to_string();
        }
    }

    fn form_classes(&self) -> Vec<String> {
        self.classes.clone()
    }

    fn add_form_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_form_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    fn check_radio(&mut self, frequency: Frequency, mode: SelectionMode) {
        if let Some(group) = self.groups.get_mut(&frequency) {
            for (index, choice) in group.choices.iter_mut().enumerate() {
                choice.checked = mode == SelectionMode::Preset(index);
            }
            group.other.checked = mode == SelectionMode::Other;
        }
    }

    fn set_other_radio_value(&mut self, frequency: Frequency, value: &str) {
        if let Some(group) = self.groups.get_mut(&frequency) {
            group.other.radio_value = value.to_string();
        }
    }

    fn other_input_value(&self, frequency: Frequency) -> String {
        self.group(frequency)
            .map(|group| group.other.input_value.clone())
            .unwrap_or_default()
    }

    fn set_other_input_value(&mut self, frequency: Frequency, value: &str) {
        if let Some(group) = self.groups.get_mut(&frequency) {
            group.other.input_value = value.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_page_classes() {
        let mut page = MockPage::new("{}", "en_US", "USD");
        page.add_form_class("paypal-disabled");
        page.add_form_class("paypal-disabled");
        assert_eq!(page.form_classes(), vec!["donate-form", "paypal-disabled"]);

        page.remove_form_class("paypal-disabled");
        assert!(!page.has_class("paypal-disabled"));
        assert!(page.has_class("donate-form"));
    }

    #[test]
    fn test_mock_page_updates_every_node() {
        let mut page = MockPage::new("{}", "en_US", "USD");
        page.set_currency_symbols("€");
        page.set_form_currency("EUR");
        assert_eq!(page.symbol_nodes, vec!["€"; 3]);
        assert_eq!(page.currency_inputs, vec!["EUR"; 2]);
    }

    #[test]
    fn test_mock_page_check_radio() {
        let table = crate::test_utils::sample_table();
        let view = crate::render::render_currency(
            &table,
            &crate::locale::Locale::default(),
            &crate::render::Translations::default(),
            &crate::models::CurrencyCode::new("USD"),
        )
        .unwrap();
        let mut page = MockPage::new("{}", "en_US", "USD");
        page.render_amount_group(&view.single);

        page.check_radio(Frequency::Single, SelectionMode::Other);
        let group = page.group(Frequency::Single).unwrap();
        assert!(group.other.checked);
        assert_eq!(group.checked_count(), 1);

        page.check_radio(Frequency::Single, SelectionMode::Preset(2));
        let group = page.group(Frequency::Single).unwrap();
        assert!(group.choices[2].checked);
        assert_eq!(group.checked_count(), 1);
    }
}
