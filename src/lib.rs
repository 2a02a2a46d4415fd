pub mod amount;
pub mod config;
pub mod currency_data;
pub mod errors;
pub mod handlers;
pub mod locale;
pub mod models;
pub mod page;
pub mod registry;
pub mod render;
pub mod widget;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use errors::{ErrorResponse, ServiceError, WidgetError};
pub use handlers::health_check;
pub use page::PageBoundary;
pub use widget::CurrencySelect;

/// Rounds a number to two decimal places for currency display
///
/// # Examples
/// ```
/// use donate_currency::round_to_cents;
///
/// assert_eq!(round_to_cents(10.456), 10.46);
/// assert_eq!(round_to_cents(10.454), 10.45);
/// ```
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
