//! Annulation de touches dans un champ de saisie, par code de touche.
//!
//! Par exemple `KeyFilter::no_enter()` empêche de valider le formulaire avec Entrée.

use log::debug;
use serde::{Deserialize, Serialize};

pub const ENTER: u32 = 13;

/// Returns false when `keynum` is one of the cancelled key codes.
pub fn allow_key(keynum: u32, cancelled: &[u32]) -> bool {
    !cancelled.contains(&keynum)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyFilter {
    cancelled: Vec<u32>,
}

impl KeyFilter {
    pub fn new(cancelled: impl IntoIterator<Item = u32>) -> Self {
        Self {
            cancelled: cancelled.into_iter().collect(),
        }
    }

    pub fn no_enter() -> Self {
        Self::new([ENTER])
    }

    pub fn allows(&self, keynum: u32) -> bool {
        let allowed = allow_key(keynum, &self.cancelled);
        if !allowed {
            debug!("Key {keynum} cancelled");
        }
        allowed
    }
}
