//! Handlers not linked to the payment scope

use ntex::web;

use crate::{
    api::payment_form, consts,
    front::{AppState, errors, middleware::csrf_token, payment, templates},
};

/// Return a [UrlNotFound](errors::UserError::UrlNotFound) error for urls not defined
pub async fn serve_not_found() -> Result<web::HttpResponse, web::Error> {
    Err(errors::UserError::UrlNotFound.into())
}

/// Endpoint to render the payment form page.
///
/// Starts a blank form on the first visit and restores the values typed so
/// far otherwise. The csrf pair of the session is reused while it verifies,
/// so reloading in another tab keeps the open ones working.
#[web::get("/")]
async fn index(
    app_state: web::types::State<AppState>,
    cookie: ntex_session::Session,
) -> Result<impl web::Responder, web::Error> {
    let csrf_pair = csrf_token::session_csrf_pair(&app_state.csrf_protec, &cookie)
        .map_err(|e| errors::ServerError::SessionError(format!("at index.html: {e:#}")))?;

    let form_session = payment_form::current_form_session(&cookie);

    let mut context = payment::form_context(&form_session);
    context.insert("csrf_token", &csrf_pair.token_base64);
    context.insert("csrf_header", consts::CSRF_TOKEN_HEADER_NAME);
    context.insert("page_title", consts::PAGE_TITLE);
    context.insert("page_subtitle", consts::PAGE_SUBTITLE);

    Ok(web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(templates::render("index.html", &context, "/")?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form_session::FormSession;

    #[test]
    fn test_index_template_renders_page() {
        let mut context = payment::form_context(&FormSession::default());
        context.insert("csrf_token", "dG9rZW4=");
        context.insert("csrf_header", consts::CSRF_TOKEN_HEADER_NAME);
        context.insert("page_title", consts::PAGE_TITLE);
        context.insert("page_subtitle", consts::PAGE_SUBTITLE);

        let content = templates::render("index.html", &context, "/").unwrap();

        assert!(content.contains("One-time Loan Payment"));
        assert!(content.contains("Make Payment"));
        assert!(content.contains("x-csrf-token"));
        assert!(content.contains(r#"id="payment-app""#));
    }
}
