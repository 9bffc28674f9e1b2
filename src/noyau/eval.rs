//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> parse (AST) -> evaluate (f64) -> format (chaîne canonique)
//!
//! La façade ne lève jamais d’erreur : toute défaillance interne devient "Error".
//! Les erreurs détaillées restent disponibles via `calcule` / `eval_detaille`.

use tracing::debug;

use super::analyse::parse;
use super::calcul::evaluate;
use super::contexte::EvalContext;
use super::erreurs::CalcError;
use super::format::{format_avec, FormatOptions};
use super::jetons::{format_tokens, tokenize};

/// Texte affiché pour toute erreur.
pub const TEXTE_ERREUR: &str = "Error";

/// Sentinelle renvoyée par le traducteur externe quand il n’a rien compris.
pub const SENTINELLE_TRADUCTEUR: &str = "ERROR";

#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub arbre: String,
    pub noeuds: usize,
    pub valeur: f64,
    pub note: String,
}

/// Pipeline complet, erreurs typées conservées.
/// Infinity est un résultat valide (pas une erreur).
pub fn calcule(raw: &str) -> Result<f64, CalcError> {
    let ctx = EvalContext::global();
    let jetons = tokenize(raw)?;
    let arbre = parse(&jetons, ctx)?;
    Ok(evaluate(&arbre, ctx)?)
}

/// API publique : évalue une expression et retourne:
/// - l’affichage canonique
/// - la démarche (jetons, arbre lu, valeur brute)
pub fn eval_detaille(raw: &str, opts: &FormatOptions) -> Result<(String, Demarche), CalcError> {
    let ctx = EvalContext::global();

    // 1) Jetons
    let jetons = tokenize(raw)?;
    let jetons_txt = format_tokens(&jetons);

    // 2) AST
    let arbre = parse(&jetons, ctx)?;
    let arbre_txt = arbre.to_string();

    // 3) Valeur
    let valeur = evaluate(&arbre, ctx)?;

    // 4) Affichage
    let affichage = format_avec(valeur, opts);

    let d = Demarche {
        jetons: jetons_txt,
        arbre: arbre_txt,
        noeuds: arbre.taille(),
        valeur,
        note: "Pipeline: jetons → arbre → valeur f64 → affichage.".into(),
    };

    Ok((affichage, d))
}

/// Façade : texte brut -> affichage. Jamais d’erreur : "Error" à la place.
/// Entrée vide -> "0".
pub fn evaluate_expression(raw: &str) -> String {
    evaluate_expression_with(raw, &FormatOptions::default())
}

pub fn evaluate_expression_with(raw: &str, opts: &FormatOptions) -> String {
    match eval_detaille(raw, opts) {
        Ok((affichage, _d)) => {
            debug!(entree = raw, resultat = %affichage, "évaluation");
            affichage
        }
        Err(e) => {
            debug!(entree = raw, etape = e.etape(), erreur = %e, "évaluation refusée");
            TEXTE_ERREUR.to_string()
        }
    }
}

/// Sortie du traducteur langage naturel -> expression.
/// Absente, vide ou sentinelle : "Error" (jamais "0", contrairement au clavier).
pub fn evaluate_translation(candidat: Option<&str>) -> String {
    evaluate_translation_with(candidat, &FormatOptions::default())
}

pub fn evaluate_translation_with(candidat: Option<&str>, opts: &FormatOptions) -> String {
    match candidat.map(str::trim) {
        None => TEXTE_ERREUR.to_string(),
        Some(s) if s.is_empty() || s == SENTINELLE_TRADUCTEUR => {
            debug!(entree = s, "traduction inexploitable");
            TEXTE_ERREUR.to_string()
        }
        Some(s) => evaluate_expression_with(s, opts),
    }
}
