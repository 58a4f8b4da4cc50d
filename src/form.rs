//! Aides de formulaire: longueur maximale, postback d'adjunto, soumission
//! de la liste des fournisseurs invités et confirmations.

use std::collections::BTreeMap;

use derive_more::Display;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;
use thiserror::Error;

pub const INVITED_PROVIDERS_FIELD: &str = "lstInvitedProvidersHidden";
pub const DOUBLE_CLICKED: &str = "doubleclicked";
pub const ATTACHMENTS_TARGET: &str = "btnAdjuntos";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Sin adjunto seleccionado")]
    NoAttachment,
}

/// Résultat du contrôle de longueur d'une zone de texte
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaxLength {
    Unchanged,
    Truncated { text: String, notice: String },
}

/// Truncates `text` once it exceeds `max_length - 1` characters.
///
/// The kept text is one character shorter than the advertised maximum;
/// the notice still announces `max_length`.
pub fn enforce_max_length(text: &str, max_length: usize) -> MaxLength {
    let limit = max_length.saturating_sub(1);
    if text.chars().count() <= limit {
        return MaxLength::Unchanged;
    }

    MaxLength::Truncated {
        text: text.chars().take(limit).collect(),
        notice: format!("Debe ingresar hasta un maximo de {max_length} caracteres"),
    }
}

/// Déclenchement côté serveur d'un contrôle de la page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("__doPostBack('{event_target}', '{event_argument}')")]
pub struct Postback {
    pub event_target: String,
    pub event_argument: String,
}

impl Postback {
    pub fn new(event_target: impl Into<String>) -> Self {
        Self {
            event_target: event_target.into(),
            event_argument: String::new(),
        }
    }
}

/// Only posts back the attachments button once a file has been picked.
pub fn attachment_postback(selected_file: &str) -> Result<Postback, FormError> {
    if selected_file.is_empty() {
        warn!("Attachment upload requested without a file");
        return Err(FormError::NoAttachment);
    }
    Ok(Postback::new(ATTACHMENTS_TARGET))
}

/// Champs d'un formulaire de la page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Form {
    fields: BTreeMap<String, String>,
}

impl Form {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn submit(&self) -> Submission {
        Submission {
            fields: self.fields.clone(),
        }
    }
}

/// Soumission native d'un formulaire, figée au moment de l'envoi
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub fields: BTreeMap<String, String>,
}

/// Double-click on the invited providers list: flag it and submit.
pub fn invited_providers_double_click(form: &mut Form) -> Submission {
    form.set(INVITED_PROVIDERS_FIELD, DOUBLE_CLICKED);
    info!("Invited providers list double-clicked, submitting form");
    form.submit()
}

/// Actions sur une licitation qui demandent une confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Confirmation {
    #[display("Suspender licitación")]
    Suspend,
    #[display("Revocar licitación")]
    Revoke,
}

/// Source de la réponse de l'utilisateur à un avertissement
pub trait Confirmer {
    fn confirm(&mut self, warning: &str) -> bool;
}

impl<F> Confirmer for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, warning: &str) -> bool {
        self(warning)
    }
}

pub fn confirm_action<C: Confirmer + ?Sized>(
    action: Confirmation,
    warning: &str,
    confirmer: &mut C,
) -> bool {
    let accepted = confirmer.confirm(warning);
    info!("{action}: {}", if accepted { "confirmed" } else { "cancelled" });
    accepted
}

/// Like [`confirm_action`], but an interrupted prompt is an error rather
/// than a refusal.
pub fn try_confirm_action<E, F>(action: Confirmation, warning: &str, mut ask: F) -> Result<bool, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    let mut failure = None;
    let accepted = confirm_action(action, warning, &mut |warning: &str| match ask(warning) {
        Ok(answer) => answer,
        Err(error) => {
            failure = Some(error);
            false
        }
    });

    match failure {
        Some(error) => {
            warn!("{action}: prompt interrupted");
            Err(error)
        }
        None => Ok(accepted),
    }
}
