//! # Form Layout
//!
//! Decides which inputs the payment form shows for each account type and
//! which helper illustration goes next to them. Everything here is static:
//! the layout is a pure function of [AccountType].
//!
//! The `pattern`, `max_length` and `required` values are handed to the
//! browser as input constraints. They are informational for the server, the
//! only rule checked on submit lives in
//! [validate_submission](crate::models::form_session::validate_submission).

use serde::Serialize;

use crate::models::payment_form::{AccountType, FormField};

const DIGITS_PATTERN: &str = "^[0-9]+$";

/// Describes one input of the form
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: FormField,
    pub label: &'static str,
    pub required: bool,
    pub pattern: Option<&'static str>,
    pub max_length: Option<u8>,
    pub placeholder: Option<&'static str>,
    pub title: Option<&'static str>,
}

impl FieldSpec {
    const fn text(field: FormField, label: &'static str) -> Self {
        FieldSpec {
            field,
            label,
            required: true,
            pattern: None,
            max_length: None,
            placeholder: None,
            title: None,
        }
    }

    const fn pattern(self, pattern: &'static str) -> Self {
        FieldSpec {
            pattern: Some(pattern),
            ..self
        }
    }

    const fn max_length(self, max_length: u8) -> Self {
        FieldSpec {
            max_length: Some(max_length),
            ..self
        }
    }

    const fn placeholder(self, placeholder: &'static str) -> Self {
        FieldSpec {
            placeholder: Some(placeholder),
            ..self
        }
    }

    const fn title(self, title: &'static str) -> Self {
        FieldSpec {
            title: Some(title),
            ..self
        }
    }
}

/// Rendered above the account type selector for every account type
pub const LOAN_ACCOUNT_FIELD: FieldSpec =
    FieldSpec::text(FormField::LoanAccountNumber, "Loan Account Number");

const CHECKING_FIELDS: [FieldSpec; 3] = [
    FieldSpec::text(FormField::RoutingNumber, "Routing Number")
        .pattern("^[0-9]{9}$")
        .max_length(9)
        .title("9 digit number on the left side of a check"),
    FieldSpec::text(FormField::BankAccountNumber, "Bank Account Number")
        .pattern(DIGITS_PATTERN)
        .title("Number following routing number on a check"),
    FieldSpec::text(FormField::ConfirmBankAccountNumber, "Confirm Bank Account Number")
        .pattern(DIGITS_PATTERN),
];

const CARD_FIELDS: [FieldSpec; 4] = [
    FieldSpec::text(FormField::CardNumber, "Card Number").pattern(DIGITS_PATTERN),
    FieldSpec::text(FormField::NameOnCard, "Name On Card"),
    FieldSpec::text(FormField::ExpirationDate, "Expiration Date").placeholder("MM/YY"),
    FieldSpec::text(FormField::Cvv, "CVV")
        .pattern("^[0-9]{3}$")
        .max_length(3)
        .placeholder("XXX")
        .title("3 digit number on back of your card"),
];

/// Ordered inputs of the payment method selected
pub fn visible_fields(account_type: AccountType) -> &'static [FieldSpec] {
    match account_type {
        AccountType::Checking => &CHECKING_FIELDS,
        AccountType::DebitCard => &CARD_FIELDS,
    }
}

/// Illustration shown next to the inputs to help finding the numbers
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct HelperContent {
    pub image_src: &'static str,
    pub text: &'static str,
}

pub fn helper_content(account_type: AccountType) -> HelperContent {
    match account_type {
        AccountType::Checking => HelperContent {
            image_src: "/static/images/check.svg",
            text: "Where can I find the routing and account number?",
        },
        AccountType::DebitCard => HelperContent {
            image_src: "/static/images/cvv.svg",
            text: "Where can I find the CVV number?",
        },
    }
}
