//! Noyau de calcul
//!
//! Organisation interne :
//! - erreur.rs     : genres d'erreur (syntaxe / pile / arithmétique)
//! - nombre.rs     : rationnels exacts, lecture des littéraux, rendu décimal
//! - operateurs.rs : registre fixe des opérateurs
//! - jetons.rs     : tokenisation + moins unaire
//! - rpn.rs        : shunting-yard + réduction de la RPN
//! - eval.rs       : pipeline complet

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod nombre;
pub mod operateurs;
pub mod rpn;

#[cfg(test)]
mod tests_calcul;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalc;
pub use eval::{evaluate, evaluate_avec, evaluate_detaille, Evaluation};
pub use nombre::{formater, try_parse_number, Nombre};
pub use operateurs::{registre, Operateur, Registre};
