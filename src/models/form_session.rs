//! State machine of one payment form session.
//!
//! A [FormSession] is an immutable snapshot: every user interaction is a
//! [FormMessage] and [FormSession::apply] returns the next snapshot.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use super::payment_form::{
    AccountType, FormField, FormFieldError, PaymentFormData, PaymentMethodDetails,
};

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[display("Bank Account Number and Confirm Bank Account Number must match")]
    ConfirmationMismatch,
}

/// Runs the submit time checks over the selected payment method.
///
/// Only the checking account has a rule: the account number must be typed
/// twice with exactly the same characters. Debit cards are accepted as typed.
pub fn validate_submission(form: &PaymentFormData) -> Result<(), ValidationError> {
    match form.selected_details() {
        PaymentMethodDetails::Checking(checking)
            if checking.bank_account_number != checking.confirm_bank_account_number =>
        {
            Err(ValidationError::ConfirmationMismatch)
        }
        PaymentMethodDetails::Checking(_) | PaymentMethodDetails::DebitCard(_) => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Editing,
    Confirming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    FieldChanged { field: FormField, value: String },
    AccountTypeSelected(AccountType),
    Submit,
    Dismiss,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormSession {
    pub form: PaymentFormData,
    pub error: bool,
    pub stage: Stage,
}

impl FormSession {
    pub fn confirmation_open(&self) -> bool {
        self.stage == Stage::Confirming
    }

    pub fn apply(self, message: FormMessage) -> Result<Self, FormFieldError> {
        let FormSession {
            mut form,
            error,
            stage,
        } = self;

        let next = match message {
            FormMessage::FieldChanged { field, value } => {
                form.set_field(field, value)?;
                FormSession { form, error, stage }
            }
            FormMessage::AccountTypeSelected(account_type) => {
                form.account_type = account_type;
                FormSession { form, error, stage }
            }
            FormMessage::Submit => match validate_submission(&form) {
                Ok(()) => FormSession {
                    form,
                    error: false,
                    stage: Stage::Confirming,
                },
                Err(ValidationError::ConfirmationMismatch) => FormSession {
                    form,
                    error: true,
                    stage: Stage::Editing,
                },
            },
            FormMessage::Dismiss => FormSession {
                form,
                error,
                stage: Stage::Editing,
            },
        };

        Ok(next)
    }

    /// Applies the messages in order, stopping at the first rejected one
    pub fn apply_all(
        self,
        messages: impl IntoIterator<Item = FormMessage>,
    ) -> Result<Self, FormFieldError> {
        messages
            .into_iter()
            .try_fold(self, |session, message| session.apply(message))
    }

    /// Inline error shown under the checking fields, if any
    pub fn error_message(&self) -> Option<String> {
        self.error
            .then(|| ValidationError::ConfirmationMismatch.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(field: FormField, value: &str) -> FormMessage {
        FormMessage::FieldChanged {
            field,
            value: value.to_string(),
        }
    }

    fn checking_session(account: &str, confirm: &str) -> FormSession {
        FormSession::default()
            .apply_all([
                field(FormField::LoanAccountNumber, "LN-77"),
                field(FormField::RoutingNumber, "021000021"),
                field(FormField::BankAccountNumber, account),
                field(FormField::ConfirmBankAccountNumber, confirm),
            ])
            .unwrap()
    }

    #[test]
    fn test_submit_checking_mismatch_raises_error() {
        let editing = checking_session("12345", "54321");

        let submitted = editing.clone().apply(FormMessage::Submit).unwrap();

        assert!(submitted.error);
        assert!(!submitted.confirmation_open());
        assert_eq!(submitted.form, editing.form);
        assert_eq!(
            submitted.error_message().as_deref(),
            Some("Bank Account Number and Confirm Bank Account Number must match")
        );
    }

    #[test]
    fn test_submit_checking_match_opens_confirmation() {
        let submitted = checking_session("12345", "12345")
            .apply(FormMessage::Submit)
            .unwrap();

        assert!(submitted.confirmation_open());
        assert!(!submitted.error);
        assert_eq!(submitted.error_message(), None);
    }

    #[test]
    fn test_resubmit_after_fixing_clears_error() {
        let fixed = checking_session("12345", "54321")
            .apply_all([
                FormMessage::Submit,
                field(FormField::ConfirmBankAccountNumber, "12345"),
            ])
            .unwrap();
        assert!(fixed.error, "editing a field does not revalidate");

        let submitted = fixed.apply(FormMessage::Submit).unwrap();

        assert!(!submitted.error);
        assert!(submitted.confirmation_open());
    }

    #[test]
    fn test_submit_debit_card_always_opens_confirmation() {
        // mismatched checking values are ignored once the card is selected
        let submitted = checking_session("1", "2")
            .apply_all([
                FormMessage::AccountTypeSelected(AccountType::DebitCard),
                field(FormField::CardNumber, "not digits at all"),
                FormMessage::Submit,
            ])
            .unwrap();

        assert!(submitted.confirmation_open());
        assert!(!submitted.error);

        let empty_card = FormSession::default()
            .apply_all([
                FormMessage::AccountTypeSelected(AccountType::DebitCard),
                FormMessage::Submit,
            ])
            .unwrap();
        assert!(empty_card.confirmation_open());
    }

    #[test]
    fn test_account_type_round_trip_keeps_checking_values() {
        let editing = checking_session("12345", "12345");

        let back = editing
            .clone()
            .apply_all([
                FormMessage::AccountTypeSelected(AccountType::DebitCard),
                field(FormField::CardNumber, "4111111111111111"),
                FormMessage::AccountTypeSelected(AccountType::Checking),
            ])
            .unwrap();

        assert_eq!(back.form.checking, editing.form.checking);
        assert_eq!(back.form.card.card_number, "4111111111111111");
    }

    #[test]
    fn test_dismiss_returns_to_editing_without_touching_data() {
        let confirming = checking_session("12345", "12345")
            .apply(FormMessage::Submit)
            .unwrap();

        let dismissed = confirming.clone().apply(FormMessage::Dismiss).unwrap();

        assert!(!dismissed.confirmation_open());
        assert_eq!(dismissed.stage, Stage::Editing);
        assert_eq!(dismissed.form, confirming.form);
        assert_eq!(dismissed.error, confirming.error);
    }

    #[test]
    fn test_dismiss_while_editing_is_a_noop() {
        let editing = checking_session("1", "1");

        assert_eq!(editing.clone().apply(FormMessage::Dismiss).unwrap(), editing);
    }

    #[test]
    fn test_invalid_account_type_field_is_rejected() {
        let result = FormSession::default().apply(field(FormField::AccountType, "Cash"));

        assert_eq!(
            result,
            Err(FormFieldError::InvalidAccountType("Cash".to_string()))
        );
    }

    #[test]
    fn test_validate_submission_is_exact_string_equality() {
        let mut form = PaymentFormData::default();
        assert_eq!(validate_submission(&form), Ok(()));

        form.checking.bank_account_number = "0012".to_string();
        form.checking.confirm_bank_account_number = "12".to_string();
        assert_eq!(
            validate_submission(&form),
            Err(ValidationError::ConfirmationMismatch)
        );

        form.checking.confirm_bank_account_number = "0012 ".to_string();
        assert!(validate_submission(&form).is_err());
    }
}
