//! Amount-group selection state.
//!
//! Each amount group (one-time, monthly) is a small state machine: either a
//! preset radio is checked or the "other amount" radio is. The transition
//! function and the custom-amount validity rules live here, free of any page
//! access, so the widget only has to forward the resulting effects.

use crate::models::Frequency;
use crate::round_to_cents;
use log::debug;
use serde::{Deserialize, Serialize};

/// Upper bound of the "other amount" numeric input.
pub const MAX_OTHER_AMOUNT: f64 = 10_000_000.0;

/// Value the "other" radio carries whenever the custom amount is unusable.
pub const FAIL_CLOSED_VALUE: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OtherAmountValidity {
    Empty,
    Valid(f64),
    BadInput,
    RangeUnderflow,
    RangeOverflow,
}

impl OtherAmountValidity {
    /// Mirrors the native constraint check: an empty optional field has no
    /// violation.
    pub fn is_valid(&self) -> bool {
        matches!(self, OtherAmountValidity::Empty | OtherAmountValidity::Valid(_))
    }

    /// The value the paired "other" radio must carry.
    pub fn radio_value(&self) -> String {
        match self {
            OtherAmountValidity::Valid(amount) => format!("{:.2}", round_to_cents(*amount)),
            _ => FAIL_CLOSED_VALUE.to_string(),
        }
    }
}

/// Parses a number-input value using the HTML "valid floating-point number"
/// grammar: `-?`, digits and/or `.digits`, optional exponent.
pub fn parse_number_input(raw: &str) -> Option<f64> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    let skip_digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    let int_digits = skip_digits(&mut i);
    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        frac_digits = skip_digits(&mut i);
        if frac_digits == 0 {
            return None;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'-') | Some(b'+')) {
            i += 1;
        }
        if skip_digits(&mut i) == 0 {
            return None;
        }
    }
    if i != bytes.len() {
        return None;
    }

    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn check_validity(raw: &str, min: f64, max: f64) -> OtherAmountValidity {
    if raw.is_empty() {
        return OtherAmountValidity::Empty;
    }
    match parse_number_input(raw) {
        None => OtherAmountValidity::BadInput,
        Some(amount) if amount < min => OtherAmountValidity::RangeUnderflow,
        Some(amount) if amount > max => OtherAmountValidity::RangeOverflow,
        Some(amount) => OtherAmountValidity::Valid(amount),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Preset(usize),
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AmountEvent {
    PresetChosen(usize),
    OtherChosen,
    OtherEdited(String),
    OtherFocused,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroupEffect {
    CheckRadio(SelectionMode),
    SetOtherRadioValue(String),
    ClearOtherInput,
}

/// Pure transition of one amount group. Choosing a preset index that does
/// not exist leaves the group where it was.
pub fn transition(mode: SelectionMode, event: &AmountEvent, preset_count: usize) -> SelectionMode {
    match event {
        AmountEvent::PresetChosen(index) if *index < preset_count => SelectionMode::Preset(*index),
        AmountEvent::PresetChosen(_) => mode,
        AmountEvent::OtherChosen | AmountEvent::OtherEdited(_) | AmountEvent::OtherFocused => {
            SelectionMode::Other
        }
    }
}

#[derive(Debug, Clone)]
pub struct AmountGroup {
    frequency: Frequency,
    preset_values: Vec<String>,
    min: f64,
    mode: SelectionMode,
    other_input: String,
    other_radio_value: String,
}

impl AmountGroup {
    pub fn new(frequency: Frequency, preset_values: Vec<String>, min: f64) -> Self {
        let mode = if preset_values.is_empty() {
            SelectionMode::Other
        } else {
            SelectionMode::Preset(0)
        };
        Self {
            frequency,
            preset_values,
            min,
            mode,
            other_input: String::new(),
            other_radio_value: FAIL_CLOSED_VALUE.to_string(),
        }
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn other_input(&self) -> &str {
        &self.other_input
    }

    pub fn other_radio_value(&self) -> &str {
        &self.other_radio_value
    }

    pub fn validity(&self) -> OtherAmountValidity {
        check_validity(&self.other_input, self.min, MAX_OTHER_AMOUNT)
    }

    /// Value of the checked radio.
    pub fn selected_amount(&self) -> &str {
        match self.mode {
            SelectionMode::Preset(index) => &self.preset_values[index],
            SelectionMode::Other => &self.other_radio_value,
        }
    }

    /// Records the input value as the page currently holds it.
    pub fn observe_input(&mut self, raw: String) {
        if raw != self.other_input {
            debug!("{} other amount changed outside input events: {:?}", self.frequency, raw);
            self.other_input = raw;
        }
    }

    pub fn apply(&mut self, event: AmountEvent) -> Vec<GroupEffect> {
        let next = transition(self.mode, &event, self.preset_values.len());
        debug!("{} amount group: {:?} -> {:?} on {:?}", self.frequency, self.mode, next, event);
        let mut effects = Vec::new();
        if next != self.mode {
            self.mode = next;
            effects.push(GroupEffect::CheckRadio(next));
        }

        match event {
            AmountEvent::PresetChosen(_) => effects.extend(self.clear_if_invalid()),
            AmountEvent::OtherEdited(raw) => {
                self.other_input = raw;
                effects.push(self.sync_other_radio());
            }
            AmountEvent::OtherChosen | AmountEvent::OtherFocused => {
                effects.push(self.sync_other_radio());
            }
        }
        effects
    }

    /// Drops a custom value that fails validation so it cannot resurface
    /// when the user switches back to "other". Valid values are kept.
    pub fn clear_if_invalid(&mut self) -> Option<GroupEffect> {
        if self.validity().is_valid() {
            return None;
        }
        debug!("Clearing invalid {} other amount {:?}", self.frequency, self.other_input);
        self.other_input.clear();
        Some(GroupEffect::ClearOtherInput)
    }

    fn sync_other_radio(&mut self) -> GroupEffect {
        self.other_radio_value = self.validity().radio_value();
        GroupEffect::SetOtherRadioValue(self.other_radio_value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> AmountGroup {
        AmountGroup::new(
            Frequency::Single,
            vec!["10".to_string(), "25".to_string(), "50".to_string()],
            1.0,
        )
    }

    #[test]
    fn test_parse_number_input() {
        let test_cases = vec![
            ("10", Some(10.0)),
            ("12.5", Some(12.5)),
            (".5", Some(0.5)),
            ("-3", Some(-3.0)),
            ("1e3", Some(1000.0)),
            ("2E-1", Some(0.2)),
            ("5.", None),
            ("+5", None),
            ("", None),
            ("abc", None),
            ("1,000", None),
            (" 10", None),
            ("1e", None),
            ("1e999", None),
        ];

        for (input, expected) in test_cases {
            assert_eq!(parse_number_input(input), expected, "input {:?}", input);
        }
    }

    #[test]
    fn test_check_validity() {
        assert_eq!(check_validity("", 1.0, MAX_OTHER_AMOUNT), OtherAmountValidity::Empty);
        assert_eq!(check_validity("0.5", 1.0, MAX_OTHER_AMOUNT), OtherAmountValidity::RangeUnderflow);
        assert_eq!(check_validity("10000001", 1.0, MAX_OTHER_AMOUNT), OtherAmountValidity::RangeOverflow);
        assert_eq!(check_validity("10000000", 1.0, MAX_OTHER_AMOUNT), OtherAmountValidity::Valid(10_000_000.0));
        assert_eq!(check_validity("1", 1.0, MAX_OTHER_AMOUNT), OtherAmountValidity::Valid(1.0));
        assert_eq!(check_validity("ten", 1.0, MAX_OTHER_AMOUNT), OtherAmountValidity::BadInput);
    }

    #[test]
    fn test_radio_value_fails_closed() {
        assert_eq!(OtherAmountValidity::Valid(12.346).radio_value(), "12.35");
        assert_eq!(OtherAmountValidity::Valid(7.0).radio_value(), "7.00");
        assert_eq!(OtherAmountValidity::Empty.radio_value(), "0");
        assert_eq!(OtherAmountValidity::BadInput.radio_value(), "0");
        assert_eq!(OtherAmountValidity::RangeUnderflow.radio_value(), "0");
        assert_eq!(OtherAmountValidity::RangeOverflow.radio_value(), "0");
    }

    #[test]
    fn test_transition() {
        let preset = SelectionMode::Preset(0);
        assert_eq!(transition(preset, &AmountEvent::OtherChosen, 3), SelectionMode::Other);
        assert_eq!(transition(preset, &AmountEvent::OtherFocused, 3), SelectionMode::Other);
        assert_eq!(
            transition(preset, &AmountEvent::OtherEdited("5".to_string()), 3),
            SelectionMode::Other
        );
        assert_eq!(
            transition(SelectionMode::Other, &AmountEvent::PresetChosen(2), 3),
            SelectionMode::Preset(2)
        );
        assert_eq!(
            transition(SelectionMode::Other, &AmountEvent::PresetChosen(3), 3),
            SelectionMode::Other
        );
    }

    #[test]
    fn test_new_group_checks_first_preset() {
        let group = group();
        assert_eq!(group.mode(), SelectionMode::Preset(0));
        assert_eq!(group.selected_amount(), "10");

        let empty = AmountGroup::new(Frequency::Monthly, vec![], 1.0);
        assert_eq!(empty.mode(), SelectionMode::Other);
        assert_eq!(empty.selected_amount(), "0");
    }

    #[test]
    fn test_invalid_custom_amount_fails_closed() {
        let mut group = group();
        let effects = group.apply(AmountEvent::OtherEdited("0.5".to_string()));
        assert_eq!(
            effects,
            vec![
                GroupEffect::CheckRadio(SelectionMode::Other),
                GroupEffect::SetOtherRadioValue("0".to_string()),
            ]
        );
        assert_eq!(group.mode(), SelectionMode::Other);
        assert_eq!(group.selected_amount(), "0");
    }

    #[test]
    fn test_valid_custom_amount_is_rounded() {
        let mut group = group();
        let effects = group.apply(AmountEvent::OtherEdited("42.678".to_string()));
        assert_eq!(effects[1], GroupEffect::SetOtherRadioValue("42.68".to_string()));
        assert_eq!(group.selected_amount(), "42.68");

        let effects = group.apply(AmountEvent::OtherFocused);
        assert_eq!(effects, vec![GroupEffect::SetOtherRadioValue("42.68".to_string())]);
    }

    #[test]
    fn test_preset_clears_only_invalid_input() {
        let mut group = group();
        group.apply(AmountEvent::OtherEdited("0.5".to_string()));
        let effects = group.apply(AmountEvent::PresetChosen(1));
        assert_eq!(
            effects,
            vec![
                GroupEffect::CheckRadio(SelectionMode::Preset(1)),
                GroupEffect::ClearOtherInput,
            ]
        );
        assert_eq!(group.other_input(), "");
        assert_eq!(group.selected_amount(), "25");

        group.apply(AmountEvent::OtherEdited("30".to_string()));
        let effects = group.apply(AmountEvent::PresetChosen(0));
        assert_eq!(effects, vec![GroupEffect::CheckRadio(SelectionMode::Preset(0))]);
        assert_eq!(group.other_input(), "30");
    }

    #[test]
    fn test_radio_is_checked_only_on_mode_change() {
        let mut group = group();
        let effects = group.apply(AmountEvent::PresetChosen(0));
        assert!(effects.is_empty());

        group.apply(AmountEvent::OtherFocused);
        let effects = group.apply(AmountEvent::OtherEdited("15".to_string()));
        assert_eq!(effects, vec![GroupEffect::SetOtherRadioValue("15.00".to_string())]);
    }

    #[test]
    fn test_observed_input_replaces_cached_value() {
        let mut group = group();
        group.apply(AmountEvent::OtherEdited("40".to_string()));
        group.observe_input("0.5".to_string());

        let effects = group.apply(AmountEvent::OtherFocused);
        assert_eq!(effects, vec![GroupEffect::SetOtherRadioValue("0".to_string())]);
        assert_eq!(group.selected_amount(), "0");
    }
}
