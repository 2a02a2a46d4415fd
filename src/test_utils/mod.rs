use actix_web::web;
use std::sync::Once;

use crate::currency_data::CurrencyTable;
use crate::locale::Locale;
use crate::registry::ServiceRegistry;
use crate::render::Translations;

pub mod mocks;

static INIT: Once = Once::new();

/// USD as in the reference scenario, EUR with PayPal disabled, GBP with
/// nothing disabled.
pub fn sample_config_json() -> &'static str {
    r#"{
        "USD": {"code": "usd", "symbol": "$", "minAmount": 1,
                "presets": {"single": [10, 25, 50], "monthly": [5, 10, 20]},
                "disabled": []},
        "EUR": {"code": "eur", "symbol": "€", "minAmount": 2,
                "presets": {"single": [10, 20, 30, 60], "monthly": [5, 10, 15]},
                "disabled": ["paypal"]},
        "GBP": {"code": "gbp", "symbol": "£", "minAmount": 2,
                "presets": {"single": [10, 20, 30], "monthly": [5, 10]},
                "disabled": []}
    }"#
}

pub fn sample_table() -> CurrencyTable {
    CurrencyTable::from_json(sample_config_json()).expect("sample table is valid")
}

pub fn init_test_env() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .try_init()
            .ok();
    });
}

pub fn test_registry() -> ServiceRegistry {
    ServiceRegistry::with_table(sample_table(), Locale::default(), Translations::default())
}

pub fn test_registry_data() -> web::Data<ServiceRegistry> {
    init_test_env();
    web::Data::new(test_registry())
}
