use derive_more::{Display, Error};
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

/// Payment method the loan payment is charged to
#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum AccountType {
    #[default]
    #[display("Checking")]
    Checking,
    #[display("DebitCard")]
    #[serde(alias = "Debit Card")]
    DebitCard,
}

impl AccountType {
    pub const ALL: [AccountType; 2] = [AccountType::Checking, AccountType::DebitCard];

    /// Human readable name shown on the radio buttons and the confirmation dialog
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Checking => "Checking",
            AccountType::DebitCard => "Debit Card",
        }
    }
}

impl FromStr for AccountType {
    type Err = FormFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Checking" => Ok(AccountType::Checking),
            "DebitCard" | "Debit Card" => Ok(AccountType::DebitCard),
            other => Err(FormFieldError::InvalidAccountType(other.to_string())),
        }
    }
}

#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum FormFieldError {
    #[display("unknown form field: {_0}")]
    UnknownField(#[error(not(source))] String),
    #[display("invalid account type: {_0}")]
    InvalidAccountType(#[error(not(source))] String),
}

/// Names of the inputs of the payment form, as they travel in form payloads
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    #[display("loanAccountNumber")]
    LoanAccountNumber,
    #[display("accountType")]
    AccountType,
    #[display("routingNumber")]
    RoutingNumber,
    #[display("bankAccountNumber")]
    BankAccountNumber,
    #[display("confirmBankAccountNumber")]
    ConfirmBankAccountNumber,
    #[display("cardNumber")]
    CardNumber,
    #[display("nameOnCard")]
    NameOnCard,
    #[display("expirationDate")]
    ExpirationDate,
    #[display("cvv")]
    Cvv,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::LoanAccountNumber,
        FormField::AccountType,
        FormField::RoutingNumber,
        FormField::BankAccountNumber,
        FormField::ConfirmBankAccountNumber,
        FormField::CardNumber,
        FormField::NameOnCard,
        FormField::ExpirationDate,
        FormField::Cvv,
    ];
}

impl Serialize for FormField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for FormField {
    type Err = FormFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::ALL
            .into_iter()
            .find(|field| field.to_string() == s)
            .ok_or_else(|| FormFieldError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckingDetails {
    pub routing_number: String,
    pub bank_account_number: String,
    pub confirm_bank_account_number: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardDetails {
    pub card_number: String,
    pub name_on_card: String,
    pub expiration_date: String,
    pub cvv: String,
}

/// Details relevant for the selected [AccountType]
#[derive(Debug, PartialEq, Eq)]
pub enum PaymentMethodDetails<'a> {
    Checking(&'a CheckingDetails),
    DebitCard(&'a CardDetails),
}

/// Values typed by the user during one form session.
///
/// Both the checking and the card details are kept while the user switches
/// between account types; only the subset picked by `account_type` is ever
/// displayed or validated, see [PaymentFormData::selected_details].
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentFormData {
    pub loan_account_number: String,
    pub account_type: AccountType,
    pub checking: CheckingDetails,
    pub card: CardDetails,
}

impl PaymentFormData {
    pub fn selected_details(&self) -> PaymentMethodDetails<'_> {
        match self.account_type {
            AccountType::Checking => PaymentMethodDetails::Checking(&self.checking),
            AccountType::DebitCard => PaymentMethodDetails::DebitCard(&self.card),
        }
    }

    /// Updates exactly one field, the rest of the record is left untouched
    pub fn set_field(&mut self, field: FormField, value: String) -> Result<(), FormFieldError> {
        match field {
            FormField::LoanAccountNumber => self.loan_account_number = value,
            FormField::AccountType => self.account_type = value.parse()?,
            FormField::RoutingNumber => self.checking.routing_number = value,
            FormField::BankAccountNumber => self.checking.bank_account_number = value,
            FormField::ConfirmBankAccountNumber => {
                self.checking.confirm_bank_account_number = value
            }
            FormField::CardNumber => self.card.card_number = value,
            FormField::NameOnCard => self.card.name_on_card = value,
            FormField::ExpirationDate => self.card.expiration_date = value,
            FormField::Cvv => self.card.cvv = value,
        }

        Ok(())
    }

    pub fn field_value(&self, field: FormField) -> String {
        match field {
            FormField::LoanAccountNumber => self.loan_account_number.clone(),
            FormField::AccountType => self.account_type.to_string(),
            FormField::RoutingNumber => self.checking.routing_number.clone(),
            FormField::BankAccountNumber => self.checking.bank_account_number.clone(),
            FormField::ConfirmBankAccountNumber => {
                self.checking.confirm_bank_account_number.clone()
            }
            FormField::CardNumber => self.card.card_number.clone(),
            FormField::NameOnCard => self.card.name_on_card.clone(),
            FormField::ExpirationDate => self.card.expiration_date.clone(),
            FormField::Cvv => self.card.cvv.clone(),
        }
    }
}
