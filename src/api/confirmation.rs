use serde::Serialize;

use crate::models::payment_form::{PaymentFormData, PaymentMethodDetails};

pub const CONFIRMATION_TITLE: &str = "Thank you!";
pub const CONFIRMATION_SUBTITLE: &str = "Your payment has been successful:";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

impl SummaryRow {
    fn new(label: &'static str, value: &str) -> Self {
        SummaryRow {
            label,
            value: value.to_string(),
        }
    }
}

/// Read only view of the submitted values
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfirmationSummary {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub rows: Vec<SummaryRow>,
}

pub fn summary(form: &PaymentFormData) -> ConfirmationSummary {
    let mut rows = vec![
        SummaryRow::new("Loan Account Number", &form.loan_account_number),
        SummaryRow::new("Type of Payment Account", form.account_type.label()),
    ];

    match form.selected_details() {
        PaymentMethodDetails::Checking(checking) => rows.extend([
            SummaryRow::new("Routing Number", &checking.routing_number),
            SummaryRow::new("Account Number", &checking.bank_account_number),
        ]),
        PaymentMethodDetails::DebitCard(card) => rows.extend([
            SummaryRow::new("Card Number", &card.card_number),
            SummaryRow::new("Name On Card", &card.name_on_card),
            SummaryRow::new("Expiration Date", &card.expiration_date),
            SummaryRow::new("CVV", &card.cvv),
        ]),
    }

    ConfirmationSummary {
        title: CONFIRMATION_TITLE,
        subtitle: CONFIRMATION_SUBTITLE,
        rows,
    }
}
