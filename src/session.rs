//! src/session.rs
//!
//! État de session (sans vue, sans persistance).
//!
//! Rôle : contenir l’entrée courante, le dernier résultat et l’historique
//! en mémoire, et offrir les actions simples du clavier (saisie, ⌫, C, AC, =).
//!
//! Contrats :
//! - Toute évaluation passe par la façade du noyau (jamais d’erreur levée).
//! - Historique : plus récent d’abord, borné (`historique_max`).

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use crate::noyau::erreurs::CalcError;
use crate::noyau::eval::{Demarche, SENTINELLE_TRADUCTEUR, TEXTE_ERREUR};
use crate::noyau::{
    eval_detaille, evaluate_expression_with, evaluate_translation_with, FormatOptions,
};
use crate::reglages::Reglages;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
    pub horodatage_ms: u64,
}

#[derive(Clone, Debug)]
pub struct Session {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sortie ---
    pub resultat: String,

    historique: Vec<EntreeHistorique>,
    historique_max: usize,
    options: FormatOptions,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Reglages::default())
    }
}

impl Session {
    pub fn new(reglages: &Reglages) -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            historique: Vec::new(),
            historique_max: reglages.historique_max.max(1),
            options: reglages.options_format(),
        }
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// Touche du clavier. Un chiffre juste après un résultat démarre une nouvelle entrée.
    pub fn saisir(&mut self, touche: &str) {
        if !self.resultat.is_empty() && touche.parse::<f64>().is_ok() {
            self.entree = touche.to_string();
            self.resultat.clear();
        } else {
            self.entree.push_str(touche);
        }
    }

    /// ⌫ : retire le dernier caractère.
    pub fn effacer_dernier(&mut self) {
        self.entree.pop();
    }

    /// C : efface l’entrée et le résultat (l’historique reste).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.resultat.clear();
    }

    /// AC : remise à zéro totale, historique compris.
    pub fn reset_total(&mut self) {
        self.clear_entree();
        self.historique.clear();
    }

    /// = : évalue l’entrée courante. Entrée vide : rien ne se passe.
    pub fn calculer(&mut self) -> Option<&str> {
        if self.entree.trim().is_empty() {
            return None;
        }
        let res = evaluate_expression_with(&self.entree, &self.options);
        let expression = self.entree.clone();
        self.depose(expression, res);
        Some(&self.resultat)
    }

    /// Raccourci : remplace l’entrée puis évalue.
    pub fn evaluer(&mut self, expr: &str) -> String {
        self.entree = expr.to_string();
        self.calculer()
            .map(str::to_string)
            .unwrap_or_else(|| "0".to_string())
    }

    /// Comme `evaluer`, avec la démarche du même passage (un seul calcul).
    pub fn evaluer_detaille(&mut self, expr: &str) -> (String, Result<Demarche, CalcError>) {
        self.entree = expr.to_string();
        let (res, demarche) = match eval_detaille(expr, &self.options) {
            Ok((affichage, d)) => (affichage, Ok(d)),
            Err(e) => (TEXTE_ERREUR.to_string(), Err(e)),
        };
        if !expr.trim().is_empty() {
            self.depose(expr.to_string(), res.clone());
        }
        (res, demarche)
    }

    /// Résultat du traducteur externe (texte parlé -> expression).
    /// L’historique garde le texte d’origine ; une traduction inexploitable
    /// donne "Error" sans toucher à l’historique.
    pub fn evaluer_traduction(&mut self, texte: &str, candidat: Option<&str>) -> String {
        let res = evaluate_translation_with(candidat, &self.options);
        let utilisable = candidat
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != SENTINELLE_TRADUCTEUR);
        if let Some(expr) = utilisable {
            self.entree = expr.to_string();
            self.depose(texte.to_string(), res.clone());
        }
        res
    }

    pub fn historique(&self) -> &[EntreeHistorique] {
        &self.historique
    }

    /// Rappel d’une ligne d’historique (0 = la plus récente) : entrée et résultat restaurés.
    pub fn rappeler(&mut self, i: usize) -> bool {
        let Some(h) = self.historique.get(i) else {
            return false;
        };
        self.entree = h.expression.clone();
        self.resultat = h.resultat.clone();
        true
    }

    /// Vide l’historique seul ; entrée et résultat restent.
    pub fn effacer_historique(&mut self) {
        self.historique.clear();
    }

    fn depose(&mut self, expression: String, resultat: String) {
        info!(expression = %expression, resultat = %resultat, "calcul");

        self.resultat = resultat.clone();
        self.historique.insert(
            0,
            EntreeHistorique {
                expression,
                resultat,
                horodatage_ms: maintenant_ms(),
            },
        );
        self.historique.truncate(self.historique_max);
    }
}

fn maintenant_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
