pub const CSRF_PAIR_SESSION_KEY: &str = "csrf_pair";
pub const CSRF_TOKEN_HEADER_NAME: &str = "x-csrf-token";
pub const HTMX_REQUEST_HEADER_NAME: &str = "hx-request";
pub const PAYMENT_APP_TARGET: &str = "#payment-app";
pub const FORM_SESSION_KEY: &str = "payment_form";
pub const SESSION_COOKIE_NAME: &str = "loan-payment-session";

pub const PAGE_TITLE: &str = "One-time Loan Payment";
pub const PAGE_SUBTITLE: &str = "Fill out the form below to complete your payment.";
pub const SUBMIT_LABEL: &str = "Make Payment";

pub const MAX_AGE_COOKIES: i64 = chrono::TimeDelta::hours(4).num_seconds();
