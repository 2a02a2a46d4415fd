//! src/handlers.rs
//! JSON endpoints exposing the currency table and the widget's render

use crate::{
    amount::{check_validity, MAX_OTHER_AMOUNT},
    errors::ServiceError,
    models::{CurrencyCode, Frequency, OtherAmountRequest, OtherAmountResponse},
    registry::ServiceRegistry,
    render::render_currency,
};
use actix_web::{web, HttpResponse};
use log::{debug, info, warn};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

pub async fn health_check() -> actix_web::Result<&'static str> {
    Ok("OK")
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health_check)))
        .service(
            web::scope("/v1")
                .route("/currencies", web::get().to(list_currencies))
                .route("/currencies/{code}", web::get().to(currency_view))
                .route("/currencies/{code}/{frequency}", web::get().to(amount_group))
                .route("/amounts/other", web::post().to(evaluate_other_amount)),
        );
}

/// The configuration table, as the page embeds it.
pub async fn list_currencies(registry: web::Data<ServiceRegistry>) -> HttpResponse {
    debug!("Serving currency table with {} entries", registry.table.len());
    HttpResponse::Ok().json(registry.table.as_ref())
}

pub async fn currency_view(
    registry: web::Data<ServiceRegistry>,
    path: web::Path<String>,
    query: web::Query<LocaleQuery>,
) -> Result<HttpResponse, ServiceError> {
    let code = CurrencyCode::new(path.into_inner());
    let locale = registry.locale_for(query.locale.as_deref());
    debug!("Rendering {} for locale {}", code, locale);

    let view = render_currency(&registry.table, &locale, &registry.translations, &code)?;
    Ok(HttpResponse::Ok().json(view))
}

pub async fn amount_group(
    registry: web::Data<ServiceRegistry>,
    path: web::Path<(String, String)>,
    query: web::Query<LocaleQuery>,
) -> Result<HttpResponse, ServiceError> {
    let (code, frequency) = path.into_inner();
    let frequency = frequency.parse::<Frequency>().map_err(|e| {
        debug!("Rejected frequency: {}", e);
        ServiceError::InvalidFrequency(frequency.clone())
    })?;
    let code = CurrencyCode::new(code);
    let locale = registry.locale_for(query.locale.as_deref());

    let view = render_currency(&registry.table, &locale, &registry.translations, &code)?;
    Ok(HttpResponse::Ok().json(view.group(frequency)))
}

/// Applies the same fail-closed rule the widget uses to a custom amount.
pub async fn evaluate_other_amount(
    registry: web::Data<ServiceRegistry>,
    request: web::Json<OtherAmountRequest>,
) -> Result<HttpResponse, ServiceError> {
    let code = CurrencyCode::new(request.currency.clone());
    let config = registry.table.require(&code)?;

    let validity = check_validity(&request.value, config.min_amount, MAX_OTHER_AMOUNT);
    if validity.is_valid() {
        info!("Accepted other amount {:?} for {}", request.value, code);
    } else {
        warn!("Rejected other amount {:?} for {}: {:?}", request.value, code, validity);
    }

    Ok(HttpResponse::Ok().json(OtherAmountResponse {
        currency: code,
        valid: validity.is_valid(),
        radio_value: validity.radio_value(),
        validity,
    }))
}
