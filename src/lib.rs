//! Aides de saisie pour le portail d'achats publics
//!
//! Validation des montants et champs numériques, géométrie des popups,
//! placement du tooltip, filtrage des touches et aides de formulaire.

pub mod config;
pub mod form;
pub mod keys;
pub mod popup;
pub mod tooltip;
pub mod utils;
