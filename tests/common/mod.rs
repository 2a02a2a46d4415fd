#![allow(dead_code)]

use actix_web::web;
use donate_currency::{
    amount::AmountEvent,
    models::Frequency,
    registry::ServiceRegistry,
    render::Translations,
    test_utils::{self, mocks::MockPage},
    CurrencySelect, PageBoundary,
};

pub fn registry_data() -> web::Data<ServiceRegistry> {
    test_utils::test_registry_data()
}

pub fn mount_widget(locale: &str, currency: &str) -> CurrencySelect<MockPage> {
    test_utils::init_test_env();
    let page = MockPage::new(test_utils::sample_config_json(), locale, currency);
    CurrencySelect::new(page, Translations::default()).expect("widget binds to sample page")
}

/// Types into the "other amount" field the way a browser would: the input
/// value changes first, then the change event fires.
pub fn type_other_amount(widget: &mut CurrencySelect<MockPage>, frequency: Frequency, raw: &str) {
    widget.page_mut().set_other_input_value(frequency, raw);
    widget.handle(frequency, AmountEvent::OtherEdited(raw.to_string()));
}
