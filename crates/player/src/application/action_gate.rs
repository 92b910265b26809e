//! Pre-submit gate for the ambassador card exchange.
//!
//! The ambassador UI renders a required-count element (`n_cards`) and one
//! checkbox per offered card, all named `selected_cards`. The exchange keeps
//! exactly `AMBASSADOR_EXCHANGE_COUNT` cards, so any other count is rejected
//! before the form is submitted. On every other page the gate does not apply.

use crate::error::ValidationError;
use crate::ports::outbound::UserNoticePort;

/// Cards an ambassador exchange must keep.
pub const AMBASSADOR_EXCHANGE_COUNT: usize = 2;

/// Input name shared by the card checkboxes.
pub const SELECTED_CARDS_INPUT: &str = "selected_cards";

/// One checkbox-like input on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCheckbox {
    pub name: String,
    pub value: String,
    pub checked: bool,
}

impl CardCheckbox {
    /// A `selected_cards` checkbox.
    pub fn card(value: impl Into<String>, checked: bool) -> Self {
        Self {
            name: SELECTED_CARDS_INPUT.to_string(),
            value: value.into(),
            checked,
        }
    }
}

/// Snapshot of the form state the gate reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionForm {
    /// Count shown by the `n_cards` element; `None` when the element is absent.
    pub required_count: Option<usize>,
    pub inputs: Vec<CardCheckbox>,
}

impl SelectionForm {
    pub fn new(required_count: Option<usize>, inputs: Vec<CardCheckbox>) -> Self {
        Self {
            required_count,
            inputs,
        }
    }

    /// Checked inputs among those named `selected_cards`.
    pub fn checked_count(&self) -> usize {
        self.inputs
            .iter()
            .filter(|input| input.name == SELECTED_CARDS_INPUT && input.checked)
            .count()
    }

    /// Values of the checked `selected_cards` inputs, in page order.
    pub fn selected_values(&self) -> Vec<&str> {
        self.inputs
            .iter()
            .filter(|input| input.name == SELECTED_CARDS_INPUT && input.checked)
            .map(|input| input.value.as_str())
            .collect()
    }
}

/// Result of checking a selection before submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionVerdict {
    /// No ambassador UI on the page; submit proceeds unconditionally.
    NotApplicable,
    /// Wrong number of cards checked; submit must be blocked.
    Invalid(ValidationError),
    Valid,
}

impl SelectionVerdict {
    pub fn allows_submit(&self) -> bool {
        !matches!(self, SelectionVerdict::Invalid(_))
    }
}

/// Check the selection against the fixed exchange count. Pure; no I/O.
pub fn verify_selection(form: &SelectionForm) -> SelectionVerdict {
    if form.required_count.is_none() {
        tracing::debug!("No required-count element; not an ambassador exchange");
        return SelectionVerdict::NotApplicable;
    }

    let selected = form.checked_count();
    if selected != AMBASSADOR_EXCHANGE_COUNT {
        return SelectionVerdict::Invalid(ValidationError {
            selected,
            required: AMBASSADOR_EXCHANGE_COUNT,
        });
    }

    SelectionVerdict::Valid
}

/// Run the gate for a form submission, telling the player why it was blocked.
///
/// Returns whether the submission may proceed.
pub fn gate_submission(form: &SelectionForm, notice: &dyn UserNoticePort) -> bool {
    match verify_selection(form) {
        SelectionVerdict::Invalid(err) => {
            tracing::info!(
                selected = err.selected,
                required = err.required,
                "Blocked ambassador exchange submit"
            );
            notice.alert(&err.to_string());
            false
        }
        SelectionVerdict::NotApplicable | SelectionVerdict::Valid => true,
    }
}
