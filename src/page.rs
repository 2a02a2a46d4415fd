use crate::amount::SelectionMode;
use crate::models::{AmountGroupView, Frequency};

/// Everything the currency widget reads from or writes to the donation page.
///
/// A browser binding implements this over the DOM; tests use an in-memory
/// page. The widget never reaches the page any other way.
pub trait PageBoundary {
    /// Locale attribute of the form root, e.g. `en_US`.
    fn locale_attribute(&self) -> Option<String>;

    /// The embedded currency configuration JSON.
    fn currency_config_source(&self) -> Option<String>;

    /// Current value of the currency select.
    fn selected_currency(&self) -> Option<String>;

    /// Replaces the radio controls of one amount group.
    fn render_amount_group(&mut self, view: &AmountGroupView);

    /// Sets the text of every currency-symbol node.
    fn set_currency_symbols(&mut self, symbol: &str);

    /// Sets every hidden "form currency" input.
    fn set_form_currency(&mut self, code: &str);

    fn form_classes(&self) -> Vec<String>;

    fn add_form_class(&mut self, class: &str);

    fn remove_form_class(&mut self, class: &str);

    /// Checks the radio `mode` points at and unchecks the rest of the group.
    fn check_radio(&mut self, frequency: Frequency, mode: SelectionMode);

    fn set_other_radio_value(&mut self, frequency: Frequency, value: &str);

    /// Current value of the "other amount" input, which the browser may
    /// have changed without an input event (autofill, form restore).
    fn other_input_value(&self, frequency: Frequency) -> String;

    fn set_other_input_value(&mut self, frequency: Frequency, value: &str);
}
