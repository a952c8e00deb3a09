//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN (shunting-yard) -> réduction (pile d'opérandes)
//!
//! Tout est recréé à chaque appel : seul le registre est partagé, en lecture.

use tracing::debug;

use super::erreur::Resultat;
use super::jetons::{format_tokens, tokenize};
use super::nombre::Nombre;
use super::operateurs::{registre, Registre};
use super::rpn::{reduce, to_rpn};

/// Résultat détaillé : la valeur et la démarche (jetons, RPN) en texte.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub valeur: Nombre,
    pub jetons: String,
    pub rpn: String,
}

/// API publique : évalue une expression avec le registre par défaut.
pub fn evaluate(expression: &str) -> Resultat<Nombre> {
    evaluate_avec(expression, registre())
}

/// Évalue avec un registre fourni (ex: `Registre::de_base()`).
pub fn evaluate_avec(expression: &str, registre: &Registre) -> Resultat<Nombre> {
    let jetons = tokenize(expression, registre)?;
    let rpn = to_rpn(&jetons)?;
    debug!(rpn = %format_tokens(&rpn), "postfix");
    reduce(&rpn)
}

/// Comme `evaluate_avec`, en gardant la démarche pour l'affichage.
pub fn evaluate_detaille(expression: &str, registre: &Registre) -> Resultat<Evaluation> {
    let jetons = tokenize(expression, registre)?;
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_tokens(&rpn);
    debug!(rpn = %rpn_txt, "postfix");

    Ok(Evaluation {
        valeur: reduce(&rpn)?,
        jetons: format_tokens(&jetons),
        rpn: rpn_txt,
    })
}
