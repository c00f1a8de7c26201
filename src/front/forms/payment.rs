use std::collections::BTreeMap;

use crate::models::{
    form_session::FormMessage,
    payment_form::{AccountType, FormField, FormFieldError},
};

/// Raw `name=value` pairs posted by the payment form inputs
pub type FieldsPayload = BTreeMap<String, String>;

#[derive(serde::Deserialize, Debug)]
pub struct AccountTypeForm {
    #[serde(rename = "accountType")]
    pub account_type: AccountType,
}

impl From<AccountTypeForm> for FormMessage {
    fn from(val: AccountTypeForm) -> Self {
        FormMessage::AccountTypeSelected(val.account_type)
    }
}

/// One message per posted input, in field name order
pub fn field_messages(payload: FieldsPayload) -> Result<Vec<FormMessage>, FormFieldError> {
    payload
        .into_iter()
        .map(|(name, value)| -> Result<FormMessage, FormFieldError> {
            match name.parse::<FormField>()? {
                FormField::AccountType => Ok(FormMessage::AccountTypeSelected(value.parse()?)),
                field => Ok(FormMessage::FieldChanged { field, value }),
            }
        })
        .collect()
}

/// Field updates followed by the submit itself
pub fn submit_messages(payload: FieldsPayload) -> Result<Vec<FormMessage>, FormFieldError> {
    let mut messages = field_messages(payload)?;
    messages.push(FormMessage::Submit);

    Ok(messages)
}
