// src/noyau/erreur.rs
//
// Erreurs du noyau.
// - Syntaxe      : lexer / jeton inconnu / parenthèses
// - Pile         : RPN mal formée (trop ou pas assez d'opérandes)
// - Arithmetique : division par zéro, factorielle invalide

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalc {
    #[error("erreur de syntaxe : {0}")]
    Syntaxe(String),

    #[error("erreur de pile : {0}")]
    Pile(String),

    #[error("erreur arithmétique : {0}")]
    Arithmetique(String),
}

impl ErreurCalc {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub fn pile(msg: impl Into<String>) -> Self {
        Self::Pile(msg.into())
    }

    pub fn arithmetique(msg: impl Into<String>) -> Self {
        Self::Arithmetique(msg.into())
    }

    /// Nom court du genre d'erreur (journal, affichage compact).
    pub fn genre(&self) -> &'static str {
        match self {
            Self::Syntaxe(_) => "syntaxe",
            Self::Pile(_) => "pile",
            Self::Arithmetique(_) => "arithmétique",
        }
    }
}

pub type Resultat<T> = Result<T, ErreurCalc>;
