// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), parenthèses retirées
// - Puis réduire la RPN avec une pile d'opérandes
//
// Règles:
// - un opérateur dépile tant que le sommet a une précédence >= la sienne
//   (arrêt sur '(' ou sur une précédence strictement inférieure) :
//   à précédence égale, on associe à gauche ("8 - 3 - 2" = 3)
// - `neg`, `%`, `!` arrivent déjà APRÈS leur opérande (voir jetons.rs)

use tracing::debug;

use super::erreur::{ErreurCalc, Resultat};
use super::jetons::Tok;
use super::nombre::Nombre;
use super::operateurs::Application;

fn mal_appariees() -> ErreurCalc {
    ErreurCalc::syntaxe("parenthèses mal appariées")
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Op(+), Num(3), Op(*), Num(4)]
///   rpn:    [Num(2), Num(3), Num(4), Op(*), Op(+)]
pub fn to_rpn(tokens: &[Tok]) -> Resultat<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => out.push(tok),

            Tok::LPar => ops.push(tok),

            Tok::RPar => {
                // dépile jusqu’à '(' ; pile vide => ')' orpheline
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err(mal_appariees()),
                    }
                }
            }

            Tok::Op(op) => {
                while let Some(Tok::Op(top)) = ops.last() {
                    if top.precedence < op.precedence {
                        break;
                    }
                    if let Some(top) = ops.pop() {
                        out.push(top);
                    }
                }
                ops.push(Tok::Op(op));
            }
        }
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        if matches!(top, Tok::LPar) {
            return Err(mal_appariees());
        }
        out.push(top);
    }

    Ok(out)
}

fn depiler(st: &mut Vec<Nombre>, symbole: &str) -> Resultat<Nombre> {
    st.pop()
        .ok_or_else(|| ErreurCalc::pile(format!("opérande manquante pour '{symbole}'")))
}

/// Réduit une RPN en une valeur.
///
/// - binaire : sommet = opérande droite, dessous = opérande gauche
/// - à la fin, il doit rester exactement une valeur
pub fn reduce(rpn: &[Tok]) -> Resultat<Nombre> {
    let mut st: Vec<Nombre> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(r) => st.push(r.clone()),

            Tok::Op(op) => {
                let v = match op.application {
                    Application::Unaire(f) => {
                        let x = depiler(&mut st, op.symbole)?;
                        f(&x)?
                    }
                    Application::Binaire(f) => {
                        let b = depiler(&mut st, op.symbole)?;
                        let a = depiler(&mut st, op.symbole)?;
                        f(&a, &b)?
                    }
                    Application::Groupement => {
                        return Err(ErreurCalc::syntaxe("parenthèse inattendue en RPN"))
                    }
                };
                debug!(operateur = op.symbole, resultat = %v, "application");
                st.push(v);
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurCalc::syntaxe("parenthèse inattendue en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        (None, _) => Err(ErreurCalc::pile("aucune valeur à la fin du calcul")),
        (Some(_), false) => Err(ErreurCalc::pile(format!(
            "{} valeurs restent sur la pile",
            st.len() + 1
        ))),
    }
}
