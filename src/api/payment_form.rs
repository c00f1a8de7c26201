//! # Payment Form API
//!
//! Loads the form session of the current visitor, runs the user
//! interactions through the [FormSession] state machine and stores the
//! resulting snapshot back.
//!
//! The storage is abstracted by [FormStateStore] so the web layer can keep
//! the snapshot in the cookie session while tests use a mock.

use anyhow::anyhow;
use log::{info, warn};

use crate::{
    consts, metric,
    models::form_session::{FormMessage, FormSession},
};

#[cfg_attr(test, mockall::automock)]
pub trait FormStateStore {
    fn load_form_session(&self) -> anyhow::Result<Option<FormSession>>;

    fn save_form_session(&self, session: &FormSession) -> anyhow::Result<()>;
}

impl FormStateStore for ntex_session::Session {
    fn load_form_session(&self) -> anyhow::Result<Option<FormSession>> {
        self.get::<FormSession>(consts::FORM_SESSION_KEY)
            .map_err(|e| anyhow!("form session cookie could not be deserialized: {e}"))
    }

    fn save_form_session(&self, session: &FormSession) -> anyhow::Result<()> {
        self.set(consts::FORM_SESSION_KEY, session)
            .map_err(|e| anyhow!("form session cookie could not be serialized: {e}"))
    }
}

/// Returns the stored form session, a blank one on the first visit.
///
/// A snapshot that can't be read anymore (e.g. older cookie layout) is
/// replaced by a blank form instead of failing the page.
pub fn current_form_session(store: &dyn FormStateStore) -> FormSession {
    match store.load_form_session() {
        Ok(Some(session)) => session,
        Ok(None) => FormSession::default(),
        Err(e) => {
            warn!("starting a blank payment form: {e:#}");
            FormSession::default()
        }
    }
}

/// Applies `messages` in order over the stored snapshot and saves the result.
///
/// # Errors
/// Returns an error if a message names an invalid value, nothing is saved in
/// that case, or if the snapshot can't be written back.
pub fn dispatch(
    store: &dyn FormStateStore,
    messages: Vec<FormMessage>,
) -> anyhow::Result<FormSession> {
    let actions: Vec<&'static str> = messages.iter().filter_map(action_name).collect();
    let submitted = matches!(messages.last(), Some(FormMessage::Submit));

    let session = current_form_session(store).apply_all(messages)?;
    store.save_form_session(&session)?;

    actions
        .into_iter()
        .for_each(metric::record_form_action);

    if submitted && session.error {
        warn!("payment form submit rejected: confirmation mismatch");
        metric::record_form_action("submit_mismatch");
    } else if submitted {
        info!(
            "payment form confirmed with account type {}",
            session.form.account_type
        );
        metric::record_form_action("submit_confirmed");
    }

    Ok(session)
}

/// Submits are recorded by their outcome
fn action_name(message: &FormMessage) -> Option<&'static str> {
    match message {
        FormMessage::FieldChanged { .. } => Some("field_changed"),
        FormMessage::AccountTypeSelected(_) => Some("account_type_selected"),
        FormMessage::Submit => None,
        FormMessage::Dismiss => Some("dismissed"),
    }
}
