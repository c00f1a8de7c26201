//! Frontend route configuration module.

use super::payment;
use ntex::web;

/// Configures the payment form interaction routes.
///
/// All of them are htmx requests sent from the page rendered at `GET /`,
/// they require the csrf token header issued with that page.
///
/// # Routes
/// - `POST /payment/field` - Store the value of one input
/// - `POST /payment/account-type` - Switch between checking and debit card
/// - `POST /payment/submit` - Validate and open the confirmation
/// - `POST /payment/dismiss` - Close the confirmation
pub fn payment(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/payment").service((
        payment::update_field,
        payment::select_account_type,
        payment::submit_payment,
        payment::dismiss_confirmation,
    )));
}
