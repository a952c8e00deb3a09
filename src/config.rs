// src/config.rs
//
// Réglages (journal + affichage + registre).
//
// Ordre d'application :
//   défauts -> fichier TOML -> variables d'environnement -> options CLI (main.rs)
//
// Fichier par défaut : <config_dir>/calculatrice_rpn/config.toml (ignoré s'il n'existe pas)
//
//   log_file  = "/tmp/calculatrice_rpn.log"
//   log_level = "debug"
//   digits    = 30
//   registre  = "base"

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use calculatrice_rpn::noyau::{registre, Registre};

/// Garde-fou : on borne la précision (le noyau applique la même borne).
pub use calculatrice_rpn::noyau::nombre::DIGITS_MAX;

/// Précision décimale par défaut (développements infinis tronqués).
pub const DIGITS_DEFAUT: usize = 20;

const NIVEAUX: &[&str] = &["trace", "debug", "info", "warn", "error"];

const ENV_LOG_FILE: &str = "CALC_LOG_FILE";
const ENV_LOG_LEVEL: &str = "CALC_LOG_LEVEL";
const ENV_DIGITS: &str = "CALC_DIGITS";

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChoixRegistre {
    #[default]
    Etendu,
    Base,
}

impl ChoixRegistre {
    pub fn construire(self) -> Registre {
        match self {
            ChoixRegistre::Etendu => registre().clone(),
            ChoixRegistre::Base => Registre::de_base(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Reglages {
    pub log_file: PathBuf,
    pub log_level: String,
    pub digits: usize,
    pub registre: ChoixRegistre,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            log_file: std::env::temp_dir().join("calculatrice_rpn.log"),
            log_level: "info".to_string(),
            digits: DIGITS_DEFAUT,
            registre: ChoixRegistre::Etendu,
        }
    }
}

pub fn chemin_par_defaut() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("calculatrice_rpn").join("config.toml"))
}

impl Reglages {
    /// Charge les réglages. Un chemin explicite doit exister ; le chemin
    /// par défaut est facultatif.
    pub fn charger(chemin: Option<&Path>) -> anyhow::Result<Self> {
        let mut r = match chemin {
            Some(p) => Self::depuis_fichier(p)?,
            None => match chemin_par_defaut() {
                Some(p) if p.is_file() => Self::depuis_fichier(&p)?,
                _ => Self::default(),
            },
        };

        r.appliquer_env(|cle| std::env::var(cle).ok());
        r.normaliser();
        Ok(r)
    }

    pub fn depuis_fichier(chemin: &Path) -> anyhow::Result<Self> {
        let texte = std::fs::read_to_string(chemin)
            .with_context(|| format!("lecture des réglages {}", chemin.display()))?;
        Self::depuis_toml(&texte)
            .with_context(|| format!("réglages invalides dans {}", chemin.display()))
    }

    pub fn depuis_toml(texte: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(texte)?)
    }

    /// Surcharges par l'environnement. `lire` est injecté pour les tests.
    pub fn appliquer_env(&mut self, lire: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lire(ENV_LOG_FILE).filter(|v| !v.trim().is_empty()) {
            self.log_file = PathBuf::from(v);
        }
        if let Some(v) = lire(ENV_LOG_LEVEL) {
            self.log_level = v;
        }
        if let Some(d) = lire(ENV_DIGITS).and_then(|v| v.trim().parse().ok()) {
            self.digits = d;
        }
    }

    /// Niveau inconnu => "info" ; digits bornés.
    pub fn normaliser(&mut self) {
        let niveau = self.log_level.trim().to_lowercase();
        self.log_level = if NIVEAUX.contains(&niveau.as_str()) {
            niveau
        } else {
            "info".to_string()
        };
        self.digits = self.digits.min(DIGITS_MAX);
    }
}
