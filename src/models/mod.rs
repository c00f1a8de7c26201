pub mod form_session;
pub mod payment_form;
