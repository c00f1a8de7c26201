//! # API Module
//!
//! Business logic of the loan payment form, independent from the web layer.
//!
//! ## Modules
//!
//! - [`confirmation`] - Read only summary shown once the payment is accepted
//! - [`form_layout`] - Inputs and helper content per account type
//! - [`payment_form`] - Form session loading, dispatching and storing

pub mod confirmation;
pub mod form_layout;
pub mod payment_form;
