//! Calculatrice scientifique — bibliothèque
//!
//! - noyau    : moteur d’expressions (jetons -> arbre -> f64 -> affichage)
//! - reglages : fichier TOML (décimales, seuil zéro, infini signé, historique)
//! - session  : entrée courante + historique en mémoire (sans persistance)

pub mod noyau;
pub mod reglages;
pub mod session;

pub use noyau::{evaluate_expression, evaluate_translation};
