//! The currency select widget of the donation form.

use crate::amount::{AmountEvent, AmountGroup, GroupEffect};
use crate::currency_data::CurrencyTable;
use crate::errors::WidgetError;
use crate::locale::Locale;
use crate::models::{AmountGroupView, CurrencyCode, CurrencyView, Frequency};
use crate::page::PageBoundary;
use crate::render::{render_currency, Translations, DISABLED_CLASS_SUFFIX};
use log::{debug, error, info};

/// Keeps the amount groups, symbols, hidden currency fields and provider
/// classes of a donation form in line with the selected currency.
#[derive(Debug)]
pub struct CurrencySelect<P: PageBoundary> {
    page: P,
    table: CurrencyTable,
    locale: Locale,
    translations: Translations,
    default_currency: CurrencyCode,
    current: CurrencyCode,
    single: AmountGroup,
    monthly: AmountGroup,
}

impl<P: PageBoundary> CurrencySelect<P> {
    /// Reads locale, configuration and initial currency from the page and
    /// performs the first render.
    pub fn new(mut page: P, translations: Translations) -> Result<Self, WidgetError> {
        let locale = page
            .locale_attribute()
            .map(|raw| Locale::from_attribute(&raw))
            .unwrap_or_default();
        let source = page
            .currency_config_source()
            .ok_or(WidgetError::MissingConfiguration)?;
        let table = CurrencyTable::from_json(&source)?;
        let default_currency = page
            .selected_currency()
            .filter(|value| !value.is_empty())
            .map(CurrencyCode::new)
            .ok_or(WidgetError::MissingSelection)?;

        let view = render_currency(&table, &locale, &translations, &default_currency)
            .inspect_err(|e| error!("Initial currency render failed: {}", e))?;
        apply_view(&mut page, &view);
        debug!("Currency select bound with locale {} and default {}", locale, default_currency);

        Ok(Self {
            page,
            table,
            locale,
            translations,
            current: default_currency.clone(),
            default_currency,
            single: group_from_view(&view.single),
            monthly: group_from_view(&view.monthly),
        })
    }

    /// Re-renders the form for `code`. Calling it again with the same code
    /// yields the same page state.
    pub fn select_currency(&mut self, code: &CurrencyCode) -> Result<(), WidgetError> {
        let view = render_currency(&self.table, &self.locale, &self.translations, code)
            .inspect_err(|e| error!("Cannot select currency {}: {}", code, e))?;

        apply_view(&mut self.page, &view);
        self.single = group_from_view(&view.single);
        self.monthly = group_from_view(&view.monthly);
        self.current = code.clone();
        info!("Selected currency {} ({})", code, view.symbol);
        Ok(())
    }

    /// Handler for the select's change event.
    pub fn on_currency_change(&mut self) -> Result<(), WidgetError> {
        let code = self
            .page
            .selected_currency()
            .map(CurrencyCode::new)
            .ok_or(WidgetError::MissingSelection)?;
        self.select_currency(&code)
    }

    /// Feeds one user interaction into an amount group and mirrors the
    /// outcome onto the page. Focusing or choosing "other" re-reads the
    /// input from the page first.
    pub fn handle(&mut self, frequency: Frequency, event: AmountEvent) {
        let preset_chosen = matches!(event, AmountEvent::PresetChosen(_));
        if matches!(event, AmountEvent::OtherChosen | AmountEvent::OtherFocused) {
            let raw = self.page.other_input_value(frequency);
            self.group_mut(frequency).observe_input(raw);
        }
        let effects = self.group_mut(frequency).apply(event);
        self.flush(frequency, effects);

        if preset_chosen {
            for other in Frequency::ALL.into_iter().filter(|f| *f != frequency) {
                let effects: Vec<_> = self.group_mut(other).clear_if_invalid().into_iter().collect();
                self.flush(other, effects);
            }
        }
    }

    pub fn group(&self, frequency: Frequency) -> &AmountGroup {
        match frequency {
            Frequency::Single => &self.single,
            Frequency::Monthly => &self.monthly,
        }
    }

    pub fn selected_amount(&self, frequency: Frequency) -> &str {
        self.group(frequency).selected_amount()
    }

    pub fn current_currency(&self) -> &CurrencyCode {
        &self.current
    }

    pub fn default_currency(&self) -> &CurrencyCode {
        &self.default_currency
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn table(&self) -> &CurrencyTable {
        &self.table
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    fn group_mut(&mut self, frequency: Frequency) -> &mut AmountGroup {
        match frequency {
            Frequency::Single => &mut self.single,
            Frequency::Monthly => &mut self.monthly,
        }
    }

    fn flush(&mut self, frequency: Frequency, effects: Vec<GroupEffect>) {
        for effect in effects {
            match effect {
                GroupEffect::CheckRadio(mode) => self.page.check_radio(frequency, mode),
                GroupEffect::SetOtherRadioValue(value) => {
                    self.page.set_other_radio_value(frequency, &value)
                }
                GroupEffect::ClearOtherInput => self.page.set_other_input_value(frequency, ""),
            }
        }
    }
}

fn group_from_view(view: &AmountGroupView) -> AmountGroup {
    let values = view.choices.iter().map(|choice| choice.value.clone()).collect();
    AmountGroup::new(view.frequency, values, view.other.min)
}

fn apply_view<P: PageBoundary>(page: &mut P, view: &CurrencyView) {
    for frequency in Frequency::ALL {
        page.render_amount_group(view.group(frequency));
    }
    page.set_currency_symbols(&view.symbol);
    page.set_form_currency(view.currency.as_str());

    for class in page.form_classes() {
        if class.ends_with(DISABLED_CLASS_SUFFIX) {
            page.remove_form_class(&class);
        }
    }
    for class in &view.disabled_classes {
        page.add_form_class(class);
    }
}
