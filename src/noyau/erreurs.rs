// src/noyau/erreurs.rs
//
// Erreurs internes, une par étape du pipeline.
// La façade (eval.rs) les efface toutes en "Error" ; on les garde distinctes
// ici pour les tests et la journalisation.

use thiserror::Error;

/// Étape 1 : jetons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("caractère inattendu: '{ch}' (position {pos})")]
    UnexpectedCharacter { ch: char, pos: usize },

    #[error("nombre invalide: '{texte}' (position {pos})")]
    InvalidNumber { texte: String, pos: usize },

    #[error("entrée trop longue: {len} caractères (max {max})")]
    InputTooLong { len: usize, max: usize },
}

/// Étape 2 : analyse (grammaire).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("jeton inattendu: '{found}' (jeton n°{pos})")]
    UnexpectedToken { found: String, pos: usize },

    #[error("fin d’expression inattendue (opérateur en suspens)")]
    UnexpectedEnd,

    #[error("parenthèses non équilibrées")]
    UnbalancedParens,

    #[error("'(' attendue après la fonction {0}")]
    ExpectedOpenParen(String),

    #[error("identifiant inconnu: {0}")]
    UnknownIdentifier(String),

    #[error("parenthèses vides")]
    EmptyParens,

    #[error("imbrication trop profonde (max {0})")]
    TooDeep(usize),
}

/// Étape 3 : calcul.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Le résultat d’une opération n’est pas un nombre (NaN).
    #[error("hors domaine: {op}")]
    Domain { op: String },

    #[error("constante inconnue: {0}")]
    UnknownConstant(String),

    #[error("fonction inconnue: {0}")]
    UnknownFunction(String),
}

/// Erreur du pipeline complet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("jetons: {0}")]
    Lex(#[from] LexError),

    #[error("analyse: {0}")]
    Parse(#[from] ParseError),

    #[error("calcul: {0}")]
    Eval(#[from] EvalError),
}

impl CalcError {
    /// Nom court de l’étape fautive (journalisation).
    pub fn etape(&self) -> &'static str {
        match self {
            CalcError::Lex(_) => "jetons",
            CalcError::Parse(_) => "analyse",
            CalcError::Eval(_) => "calcul",
        }
    }
}
