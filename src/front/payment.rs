//! Handlers of the payment form interactions.
//!
//! Each endpoint turns the posted values into [FormMessage]s, dispatches them
//! over the form session kept in the cookie and answers with the re-rendered
//! `#payment-app` fragment for htmx to swap.

use ntex::web;
use serde::Serialize;
use serde_json::json;

use crate::{
    api::{
        confirmation,
        form_layout::{self, FieldSpec},
        payment_form,
    },
    consts,
    front::{errors, forms, middleware, templates},
    models::{
        form_session::{FormMessage, FormSession},
        payment_form::{AccountType, PaymentFormData},
    },
};

#[derive(Serialize)]
struct RenderedField {
    #[serde(flatten)]
    spec: FieldSpec,
    value: String,
}

fn rendered_field(form: &PaymentFormData, spec: &FieldSpec) -> RenderedField {
    RenderedField {
        spec: *spec,
        value: form.field_value(spec.field),
    }
}

/// Template values of the `#payment-app` fragment
pub fn form_context(session: &FormSession) -> tera::Context {
    let form = &session.form;
    let account_type = form.account_type;

    tera::Context::from_value(json!({
        "account_type": account_type,
        "account_types": AccountType::ALL
            .iter()
            .map(|option| json!({
                "value": option,
                "label": option.label(),
                "selected": *option == account_type,
            }))
            .collect::<Vec<_>>(),
        "loan_account": rendered_field(form, &form_layout::LOAN_ACCOUNT_FIELD),
        "fields": form_layout::visible_fields(account_type)
            .iter()
            .map(|spec| rendered_field(form, spec))
            .collect::<Vec<_>>(),
        "helper": form_layout::helper_content(account_type),
        // the mismatch is only meaningful next to the checking inputs
        "error_message": session
            .error_message()
            .filter(|_| account_type == AccountType::Checking),
        "confirmation": session
            .confirmation_open()
            .then(|| confirmation::summary(form)),
        "submit_label": consts::SUBMIT_LABEL,
    }))
    .unwrap_or_default()
}

fn render_payment_app(
    session: &FormSession,
    endpoint: &str,
) -> Result<web::HttpResponse, web::Error> {
    let content = templates::render("payment_form.html", &form_context(session), endpoint)
        .map_err(|e| errors::ServerError::WidgetTemplateError(e.to_string()))?;

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(content))
}

fn dispatch_messages(
    cookie: &ntex_session::Session,
    messages: Vec<FormMessage>,
    endpoint: &str,
) -> Result<FormSession, errors::ServerError> {
    payment_form::dispatch(cookie, messages).map_err(|e| {
        errors::ServerError::WidgetTemplateError(format!(
            "at {endpoint} the form session couldnt be updated: {e:#}"
        ))
    })
}

/// Stores the value of one input, triggered on each input `change` event
#[web::post("/field")]
async fn update_field(
    _: middleware::csrf_token::CsrfToken,
    form: web::types::Form<forms::payment::FieldsPayload>,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let messages = forms::payment::field_messages(form.into_inner())
        .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    dispatch_messages(&cookie, messages, "/payment/field")?;

    Ok(web::HttpResponse::NoContent().finish())
}

/// Switches the visible inputs between checking and debit card
#[web::post("/account-type")]
async fn select_account_type(
    _: middleware::csrf_token::CsrfToken,
    form: web::types::Form<forms::payment::AccountTypeForm>,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let session = dispatch_messages(
        &cookie,
        vec![form.into_inner().into()],
        "/payment/account-type",
    )?;

    render_payment_app(&session, "/payment/account-type")
}

/// Validates the form; answers with the inline error or the confirmation
#[web::post("/submit")]
async fn submit_payment(
    _: middleware::csrf_token::CsrfToken,
    form: web::types::Form<forms::payment::FieldsPayload>,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let messages = forms::payment::submit_messages(form.into_inner())
        .map_err(|e| errors::UserError::FormInputValueError(e.to_string()))?;

    let session = dispatch_messages(&cookie, messages, "/payment/submit")?;

    render_payment_app(&session, "/payment/submit")
}

/// Closes the confirmation dialog, the typed values stay as they were
#[web::post("/dismiss")]
async fn dismiss_confirmation(
    _: middleware::csrf_token::CsrfToken,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let session = dispatch_messages(&cookie, vec![FormMessage::Dismiss], "/payment/dismiss")?;

    render_payment_app(&session, "/payment/dismiss")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payment_form::FormField;

    fn field(field: FormField, value: &str) -> FormMessage {
        FormMessage::FieldChanged {
            field,
            value: value.to_string(),
        }
    }

    fn session(messages: Vec<FormMessage>) -> FormSession {
        FormSession::default().apply_all(messages).unwrap()
    }

    fn render(session: &FormSession) -> String {
        templates::render("payment_form.html", &form_context(session), "test").unwrap()
    }

    #[test]
    fn test_context_checking_fields() {
        let context = form_context(&session(vec![field(FormField::RoutingNumber, "021000021")]))
            .into_json();

        assert_eq!(context["account_type"], "Checking");
        assert_eq!(context["fields"][0]["field"], "routingNumber");
        assert_eq!(context["fields"][0]["value"], "021000021");
        assert_eq!(context["fields"][0]["max_length"], 9);
        assert_eq!(context["account_types"][0]["selected"], true);
        assert!(context["confirmation"].is_null());
        assert!(context["error_message"].is_null());
    }

    #[test]
    fn test_context_hides_mismatch_outside_checking() {
        let mismatch = session(vec![
            field(FormField::BankAccountNumber, "12345"),
            field(FormField::ConfirmBankAccountNumber, "54321"),
            FormMessage::Submit,
        ]);
        assert_eq!(
            form_context(&mismatch).into_json()["error_message"],
            "Bank Account Number and Confirm Bank Account Number must match"
        );

        let switched = mismatch
            .apply(FormMessage::AccountTypeSelected(AccountType::DebitCard))
            .unwrap();
        assert!(form_context(&switched).into_json()["error_message"].is_null());
    }

    #[test]
    fn test_render_mismatch_fragment() {
        let content = render(&session(vec![
            field(FormField::BankAccountNumber, "12345"),
            field(FormField::ConfirmBankAccountNumber, "54321"),
            FormMessage::Submit,
        ]));

        assert!(content.contains("Bank Account Number and Confirm Bank Account Number must match"));
        assert!(content.contains(r#"name="routingNumber""#));
        assert!(!content.contains("Thank you!"));
    }

    #[test]
    fn test_render_card_confirmation_fragment() {
        let content = render(&session(vec![
            FormMessage::AccountTypeSelected(AccountType::DebitCard),
            field(FormField::NameOnCard, "Jane <Doe>"),
            FormMessage::Submit,
        ]));

        assert!(content.contains("Thank you!"));
        assert!(content.contains(">Continue</button>"));
        assert!(content.contains("Where can I find the CVV number?"));
        assert!(content.contains(r#"name="cvv""#));
        assert!(!content.contains(r#"name="routingNumber""#));
        assert!(content.contains("Jane &lt;Doe&gt;"));
    }
}
