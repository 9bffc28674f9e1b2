// src/noyau/format.rs
//
// f64 -> chaîne canonique d’affichage.
//
// Règles (dans l’ordre):
// - NaN                  -> "Error"
// - ±Infinity            -> "Infinity" (ou "-Infinity" si infini_signe)
// - |x| < seuil_zero     -> "0"   (bruit flottant : 0.1 + 0.2 - 0.3)
// - |x| >= 1e21          -> forme exposant minimale ("1e21")
// - sinon écriture minimale ; si plus de `decimales` chiffres après le point :
//   arrondi exact à `decimales` (au plus DECIMALES_MAX), puis écriture minimale

use super::lecture::arrondi_fixe;

/// Seuil à partir duquel on passe en forme exposant.
const SEUIL_EXPOSANT: f64 = 1e21;

/// Garde-fou : au-delà, les décimales d’un f64 ne sont plus significatives.
pub const DECIMALES_MAX: u32 = 15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormatOptions {
    pub decimales: u32,
    pub seuil_zero: f64,
    pub infini_signe: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            decimales: 8,
            seuil_zero: 1e-10,
            infini_signe: false,
        }
    }
}

/// Formatage avec les options par défaut.
pub fn format(value: f64) -> String {
    format_avec(value, &FormatOptions::default())
}

pub fn format_avec(value: f64, opts: &FormatOptions) -> String {
    if value.is_nan() {
        return "Error".to_string();
    }
    if value.is_infinite() {
        return if opts.infini_signe && value < 0.0 {
            "-Infinity".to_string()
        } else {
            "Infinity".to_string()
        };
    }
    if value.abs() < opts.seuil_zero || value == 0.0 {
        return "0".to_string();
    }

    let decimales = opts.decimales.min(DECIMALES_MAX);
    let s = ecriture_minimale(value);
    if decimales_de(&s) <= decimales as usize {
        return s;
    }

    // trop de décimales : arrondi exact, puis relecture
    match arrondi_fixe(value, decimales).and_then(|t| t.parse::<f64>().ok()) {
        Some(r) => ecriture_minimale(r),
        None => s,
    }
}

/// Écriture décimale la plus courte qui relit la même valeur.
/// "-0" n’existe pas à l’affichage.
fn ecriture_minimale(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if x.abs() >= SEUIL_EXPOSANT {
        return format!("{x:e}");
    }
    format!("{x}")
}

/// Nombre de chiffres après le point (0 si forme exposant ou entier).
fn decimales_de(s: &str) -> usize {
    if s.contains('e') {
        return 0;
    }
    s.split_once('.').map_or(0, |(_, frac)| frac.len())
}
