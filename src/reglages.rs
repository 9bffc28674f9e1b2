//! Réglages de la calculatrice (fichier TOML).
//!
//! Emplacement par défaut : `<config>/calculatrice/reglages.toml`.
//! Fichier absent : valeurs par défaut. Fichier illisible : avertissement + défauts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::noyau::format::DECIMALES_MAX;
use crate::noyau::FormatOptions;

/// Bornes (garde-fous).
const SEUIL_ZERO_MAX: f64 = 1e-3;
const HISTORIQUE_MIN: usize = 1;
const HISTORIQUE_MAX: usize = 500;

#[derive(Debug, Error)]
pub enum ReglagesError {
    #[error("lecture/écriture des réglages: {0}")]
    Io(#[from] std::io::Error),

    #[error("réglages invalides: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("sérialisation des réglages: {0}")]
    Serialisation(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    /// Décimales max à l’affichage.
    pub decimales: u32,
    /// En dessous (en valeur absolue), on affiche "0".
    pub seuil_zero: f64,
    /// "-Infinity" distinct de "Infinity".
    pub infini_signe: bool,
    /// Taille max de l’historique de session.
    pub historique_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        let f = FormatOptions::default();
        Self {
            decimales: f.decimales,
            seuil_zero: f.seuil_zero,
            infini_signe: f.infini_signe,
            historique_max: 50,
        }
    }
}

impl Reglages {
    /// Chemin du fichier par défaut.
    pub fn chemin_defaut() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("."))
            })
            .join("calculatrice")
            .join("reglages.toml")
    }

    /// Charge depuis `chemin` (ou le chemin par défaut). N’échoue jamais.
    pub fn charger(chemin: Option<&Path>) -> Self {
        let chemin = chemin
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::chemin_defaut);

        if !chemin.exists() {
            debug!(chemin = %chemin.display(), "pas de réglages, valeurs par défaut");
            return Self::default();
        }

        match Self::charger_depuis(&chemin) {
            Ok(r) => r,
            Err(e) => {
                warn!(chemin = %chemin.display(), erreur = %e, "réglages ignorés");
                Self::default()
            }
        }
    }

    /// Lecture stricte (erreurs remontées).
    pub fn charger_depuis(chemin: &Path) -> Result<Self, ReglagesError> {
        let contenu = fs::read_to_string(chemin)?;
        Self::depuis_toml(&contenu)
    }

    pub fn depuis_toml(contenu: &str) -> Result<Self, ReglagesError> {
        let mut r: Reglages = toml::from_str(contenu)?;
        r.valider();
        Ok(r)
    }

    /// Écrit le fichier (répertoire créé si besoin).
    pub fn enregistrer(&self, chemin: &Path) -> Result<(), ReglagesError> {
        if let Some(parent) = chemin.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(chemin, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Ramène chaque valeur dans sa plage.
    fn valider(&mut self) {
        self.decimales = self.decimales.min(DECIMALES_MAX);

        // NaN ou négatif : on revient au défaut
        if self.seuil_zero.is_nan() || self.seuil_zero < 0.0 {
            self.seuil_zero = FormatOptions::default().seuil_zero;
        }
        self.seuil_zero = self.seuil_zero.min(SEUIL_ZERO_MAX);

        self.historique_max = self.historique_max.clamp(HISTORIQUE_MIN, HISTORIQUE_MAX);
    }

    pub fn options_format(&self) -> FormatOptions {
        FormatOptions {
            decimales: self.decimales,
            seuil_zero: self.seuil_zero,
            infini_signe: self.infini_signe,
        }
    }
}
