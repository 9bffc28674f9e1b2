// src/noyau/contexte.rs
//
// Table fermée des constantes et fonctions unaires.
// Construite une seule fois (OnceLock), jamais modifiée ensuite :
// partageable entre threads sans verrou.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::calcul::factorielle;

#[derive(Clone, Copy, Debug)]
pub enum Valeur {
    Constante(f64),
    Fonction(fn(f64) -> f64),
}

#[derive(Clone, Debug)]
pub struct EvalContext {
    table: HashMap<&'static str, Valeur>,
}

impl EvalContext {
    /// Contexte standard : PI, E + sin cos tan sqrt log ln abs fact.
    pub fn standard() -> Self {
        let mut table: HashMap<&'static str, Valeur> = HashMap::new();

        table.insert("PI", Valeur::Constante(std::f64::consts::PI));
        table.insert("E", Valeur::Constante(std::f64::consts::E));

        // trig en radians (la conversion degrés est à la charge du producteur)
        table.insert("sin", Valeur::Fonction(f64::sin));
        table.insert("cos", Valeur::Fonction(f64::cos));
        table.insert("tan", Valeur::Fonction(f64::tan));

        table.insert("sqrt", Valeur::Fonction(f64::sqrt));
        table.insert("log", Valeur::Fonction(f64::log10));
        table.insert("log10", Valeur::Fonction(f64::log10));
        table.insert("ln", Valeur::Fonction(f64::ln));
        table.insert("abs", Valeur::Fonction(f64::abs));
        table.insert("fact", Valeur::Fonction(factorielle));

        Self { table }
    }

    /// Instance partagée, en lecture seule.
    pub fn global() -> &'static EvalContext {
        static CONTEXTE: OnceLock<EvalContext> = OnceLock::new();
        CONTEXTE.get_or_init(EvalContext::standard)
    }

    pub fn get(&self, name: &str) -> Option<Valeur> {
        self.table.get(name).copied()
    }

    pub fn constante(&self, name: &str) -> Option<f64> {
        match self.get(name) {
            Some(Valeur::Constante(v)) => Some(v),
            _ => None,
        }
    }

    pub fn fonction(&self, name: &str) -> Option<fn(f64) -> f64> {
        match self.get(name) {
            Some(Valeur::Fonction(f)) => Some(f),
            _ => None,
        }
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::standard()
    }
}
