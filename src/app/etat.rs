//! src/app/etat.rs
//!
//! État de la session (sans rendu, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, digits, démarche)
//! et offrir des opérations simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.

use calculatrice_rpn::noyau::Registre;

use crate::config::{DIGITS_DEFAUT, DIGITS_MAX};

#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // rendu décimal du dernier calcul réussi
    pub erreur: String,   // message d’erreur (si parsing/éval échoue)

    // --- démarche (jetons + RPN du dernier calcul) ---
    pub demarche: Demarche,
    pub afficher_demarche: bool,

    // --- paramètres ---
    pub digits: usize,
    pub registre: Registre,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Registre::default(), DIGITS_DEFAUT)
    }
}

impl AppCalc {
    pub fn new(registre: Registre, digits: usize) -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            demarche: Demarche::default(),
            afficher_demarche: false,
            digits: digits.min(DIGITS_MAX),
            registre,
        }
    }

    /* ------------------------ Actions “touches” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + digits par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.digits = DIGITS_DEFAUT;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
    }

    /// Utilitaire : placer une erreur.
    ///
    /// On CONSERVE `resultat` (dernier résultat) pour ne pas “effacer l’écran” sur une faute ;
    /// la démarche, elle, n'est plus fiable.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
    }

    /// Utilitaire : déposer un résultat complet (valeur rendue + démarche).
    pub fn set_resultat(&mut self, resultat: impl Into<String>, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.demarche = demarche;
    }

    /// Garde-fou : limite digits (évite abus / gel plus tard).
    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.min(DIGITS_MAX);
    }

    pub fn en_erreur(&self) -> bool {
        !self.erreur.is_empty()
    }
}
