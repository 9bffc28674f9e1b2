//! Noyau scientifique (f64)
//!
//! Organisation interne :
//! - jetons.rs   : tokenisation (glyphes × ÷ − π normalisés)
//! - analyse.rs  : descente récursive -> Expr
//! - expr.rs     : AST (arbre strict)
//! - contexte.rs : table fermée constantes + fonctions
//! - calcul.rs   : parcours de l’arbre en f64
//! - lecture.rs  : arrondi décimal exact
//! - format.rs   : affichage canonique
//! - erreurs.rs  : erreurs par étape
//! - eval.rs     : pipeline complet (façade)
//!
//! Aucun évaluateur générique : seules les opérations de la table sont exécutées.

pub mod analyse;
pub mod calcul;
pub mod contexte;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod lecture;

#[cfg(test)]
mod tests_scientifiques;


// API publique minimale
pub use erreurs::{CalcError, EvalError, LexError, ParseError};
pub use eval::{
    calcule, eval_detaille, evaluate_expression, evaluate_expression_with, evaluate_translation,
    evaluate_translation_with, Demarche,
};
pub use format::FormatOptions;
