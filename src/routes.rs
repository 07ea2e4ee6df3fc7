//! Route paths of the web product this client fronts.
//!
//! The dashboard and public pages live on the same host as the API; these
//! helpers build the client-side paths the web app uses so the TUI can hand
//! off editor and public links.

use crate::models::Form;

/// Editor page for a form.
pub fn form_editor(form_id: &str) -> String {
    format!("/dashboard/forms/{}", form_id)
}

/// Responses page for a form.
pub fn form_responses(form_id: &str) -> String {
    format!("/dashboard/forms/{}/responses", form_id)
}

/// Public-facing page for a form, preferring its custom slug.
pub fn public_form(form: &Form) -> String {
    format!("/forms/{}", form.public_handle())
}

/// Join a route path onto the configured base URL.
pub fn absolute(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
