//! Counters of the payment form interactions, exported through logfire when
//! a token is configured.

use opentelemetry::{KeyValue, metrics::UpDownCounter};
use std::sync::LazyLock;

static FORM_ACTIONS: LazyLock<UpDownCounter<i64>> = LazyLock::new(|| {
    logfire::i64_up_down_counter("loan_payment_form_actions")
        .with_description("Interactions with the loan payment form")
        .with_unit("action")
        .build()
});

/// `action` is one of `field_changed`, `account_type_selected`,
/// `submit_confirmed`, `submit_mismatch` or `dismissed`
pub fn record_form_action(action: &'static str) {
    FORM_ACTIONS.add(1, &[KeyValue::new("form_action", action)]);
}
