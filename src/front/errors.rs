use super::templates;
use crate::consts;
use derive_more::{Display, Error};
use log::error;
use ntex::{http, web};

/// Error fragment swapped over `#payment-app` when the failing request came
/// from htmx, the full error pages would be dropped by the browser.
const PAYMENT_APP_ERROR_TEMPLATE: &str = "errors/payment_app_err.html";

fn is_htmx_request(req: &web::HttpRequest) -> bool {
    req.headers().contains_key(consts::HTMX_REQUEST_HEADER_NAME)
}

fn html_response(
    status: http::StatusCode,
    template_name: &str,
    context: &tera::Context,
    fallback: String,
) -> web::HttpResponse {
    web::HttpResponse::build(status)
        .set_header("content-type", "text/html; charset=utf-8")
        .body(
            templates::WEB_TEMPLATES
                .render(template_name, context)
                .unwrap_or(fallback),
        )
}

fn payment_app_error(status: http::StatusCode, msg_details: &str) -> web::HttpResponse {
    let mut context = tera::Context::new();
    context.insert("msg_details", msg_details);

    web::HttpResponse::build(status)
        .set_header("content-type", "text/html; charset=utf-8")
        .set_header("hx-retarget", consts::PAYMENT_APP_TARGET)
        .set_header("hx-reswap", "outerHTML")
        .body(
            templates::WEB_TEMPLATES
                .render(PAYMENT_APP_ERROR_TEMPLATE, &context)
                .unwrap_or(msg_details.to_string()),
        )
}

#[derive(Debug, Display, Error)]
pub enum UserError {
    UrlNotFound,
    FormInputValueError(#[error(not(source))] String),
}

impl UserError {
    /// Message safe to show next to the form
    fn user_message(&self) -> String {
        match self {
            UserError::UrlNotFound => "page not found".to_string(),
            UserError::FormInputValueError(msg) => format!("the form has invalid values: {msg}"),
        }
    }
}

impl web::error::WebResponseError for UserError {
    fn error_response(&self, req: &web::HttpRequest) -> web::HttpResponse {
        error!("{:#?}", self);

        if is_htmx_request(req) {
            return payment_app_error(self.status_code(), &self.user_message());
        }

        let mut context = tera::Context::new();
        context.insert("msg_details", &self.user_message());

        let template_name = match self {
            UserError::UrlNotFound => "errors/url_not_found.html",
            UserError::FormInputValueError(_) => {
                context.insert("form_url", "/");
                "errors/invalid_input_values.html"
            }
        };

        html_response(self.status_code(), template_name, &context, self.to_string())
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            UserError::UrlNotFound => http::StatusCode::NOT_FOUND,
            UserError::FormInputValueError(_) => http::StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Display, Error)]
pub enum ServerError {
    TemplateError(#[error(not(source))] String),
    /// A `#payment-app` fragment couldnt be produced
    WidgetTemplateError(#[error(not(source))] String),
    SessionError(#[error(not(source))] String),
    InvalidCsrfToken,
}

impl ServerError {
    fn get_error_message(&self) -> String {
        match self {
            ServerError::TemplateError(msg) => format!("[TemplateError] {:#?}", msg),
            ServerError::WidgetTemplateError(msg) => format!("[WidgetTemplateError] {:#?}", msg),
            ServerError::SessionError(msg) => format!("[SessionError] {:#?}", msg),
            ServerError::InvalidCsrfToken => "[InvalidCsrfToken]".to_string(),
        }
    }

    /// Message safe to show next to the form, the details only go to the logs
    fn user_message(&self) -> &'static str {
        match self {
            ServerError::InvalidCsrfToken => {
                "Your session has expired, reload the page to keep filling the form."
            }
            _ => "The payment form couldnt be updated, reload the page and try again.",
        }
    }
}

impl web::error::WebResponseError for ServerError {
    fn error_response(&self, req: &web::HttpRequest) -> web::HttpResponse {
        error!("{}", self.get_error_message());

        if is_htmx_request(req) || matches!(self, ServerError::WidgetTemplateError(_)) {
            return payment_app_error(self.status_code(), self.user_message());
        }

        let mut context = tera::Context::new();
        context.insert("msg_details", self.user_message());

        html_response(
            self.status_code(),
            "errors/internal_error.html",
            &context,
            self.to_string(),
        )
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            // success status so htmx swaps the error fragment in
            ServerError::WidgetTemplateError(_) => http::StatusCode::ACCEPTED,
            ServerError::InvalidCsrfToken => http::StatusCode::FORBIDDEN,
            _ => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntex::web::{error::WebResponseError, test::TestRequest};

    fn body_text(response: web::HttpResponse) -> String {
        match response.body().as_ref() {
            Some(ntex::http::body::Body::Bytes(bytes)) => {
                String::from_utf8_lossy(bytes).to_string()
            }
            _ => String::new(),
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            UserError::FormInputValueError("unknown form field: pin".into()).status_code(),
            http::StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UserError::UrlNotFound.status_code(),
            http::StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::InvalidCsrfToken.status_code(),
            http::StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServerError::SessionError("cookie".into()).status_code(),
            http::StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ServerError::WidgetTemplateError("payment_form.html".into()).status_code(),
            http::StatusCode::ACCEPTED
        );
    }

    #[test]
    fn test_htmx_request_gets_payment_app_fragment() {
        let req = TestRequest::post()
            .uri("/payment/field")
            .header(consts::HTMX_REQUEST_HEADER_NAME, "true")
            .to_http_request();

        let response = ServerError::InvalidCsrfToken.error_response(&req);

        assert_eq!(response.status(), http::StatusCode::FORBIDDEN);
        assert_eq!(
            response.headers().get("hx-retarget").unwrap(),
            consts::PAYMENT_APP_TARGET
        );
        assert_eq!(response.headers().get("hx-reswap").unwrap(), "outerHTML");

        let content = body_text(response);
        assert!(content.contains(r#"id="payment-app""#));
        assert!(content.contains("Your session has expired"));
        assert!(!content.contains("<html"));
    }

    #[test]
    fn test_widget_error_swaps_without_htmx_header() {
        let req = TestRequest::post().uri("/payment/submit").to_http_request();

        let response =
            ServerError::WidgetTemplateError("payment_form.html".into()).error_response(&req);

        assert_eq!(response.status(), http::StatusCode::ACCEPTED);
        assert!(body_text(response).contains(r#"id="payment-app""#));
    }

    #[test]
    fn test_plain_request_gets_full_page() {
        let req = TestRequest::post().uri("/payment/field").to_http_request();

        let response =
            UserError::FormInputValueError("unknown form field: pin".into()).error_response(&req);

        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);
        assert!(response.headers().get("hx-retarget").is_none());

        let content = body_text(response);
        assert!(content.contains("<html"));
        assert!(content.contains("unknown form field: pin"));
    }
}
