// src/app/vue.rs
//
// Vue (terminal)
// --------------
// - une ligne = une expression, évaluée via le noyau
// - ligne vide = réévaluer l’entrée courante (touche "=")
// - commandes ":" = touches d’action (C / CLR / AC) + réglages
//
// L’invite "> " n’est écrite que si l’entrée standard est un terminal.

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use calculatrice_rpn::noyau::{evaluate_detaille, formater};

use super::etat::{AppCalc, Demarche};

/// Suite à donner après une ligne.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Suite {
    Continuer,
    Quitter,
}

const AIDE: &str = "\
expression  évalue (ex: -(2 + 3) * 4, 50%, 5!)
(vide)      réévalue l’entrée courante
:c          efface l’entrée
:clr        efface résultat + erreur + démarche
:ac         remise à zéro totale
:digits N   décimales affichées (développements infinis)
:demarche   affiche / masque jetons et RPN
:symboles   touches disponibles
:q          quitter";

impl AppCalc {
    /// Traite une ligne saisie. Retourne le texte à afficher (peut être vide).
    pub fn traiter_ligne(&mut self, ligne: &str) -> (Suite, String) {
        let ligne = ligne.trim();

        let Some(commande) = ligne.strip_prefix(':') else {
            if !ligne.is_empty() {
                self.entree = ligne.to_string();
            }
            self.eval_via_noyau();
            return (Suite::Continuer, self.rendu());
        };

        let mut mots = commande.split_whitespace();
        let texte = match (mots.next(), mots.next()) {
            (Some("q"), None) => return (Suite::Quitter, String::new()),
            (Some("c"), None) => {
                self.clear_entree();
                String::new()
            }
            (Some("clr"), None) => {
                self.clear_resultats();
                String::new()
            }
            (Some("ac"), None) => {
                self.reset_total();
                String::new()
            }
            (Some("digits"), Some(n)) => match n.parse::<usize>() {
                Ok(d) => {
                    self.set_digits(d);
                    format!("digits = {}", self.digits)
                }
                Err(_) => format!("digits invalide : {n}"),
            },
            (Some("demarche"), None) => {
                self.afficher_demarche = !self.afficher_demarche;
                let etat = if self.afficher_demarche { "affichée" } else { "masquée" };
                format!("démarche {etat}")
            }
            (Some("symboles"), None) => self.rendu_symboles(),
            _ => AIDE.to_string(),
        };

        (Suite::Continuer, texte)
    }

    /// Évalue l’entrée via le noyau, puis dépose résultat/démarche dans l’état.
    pub fn eval_via_noyau(&mut self) {
        let s = self.entree.trim();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        match evaluate_detaille(s, &self.registre) {
            Ok(e) => {
                let rendu = formater(&e.valeur, self.digits);
                debug!(expression = s, resultat = %rendu, "calcul");
                let d = Demarche {
                    jetons: e.jetons,
                    rpn: e.rpn,
                };
                self.set_resultat(rendu, d);
            }
            Err(err) => {
                info!(expression = s, genre = err.genre(), "calcul refusé: {err}");
                self.set_erreur(err.to_string());
            }
        }
    }

    /// Rendu texte de l’état courant (résultat ou erreur, puis démarche).
    pub fn rendu(&self) -> String {
        if self.en_erreur() {
            return self.erreur.clone();
        }

        let mut out = self.resultat.clone();
        if self.afficher_demarche {
            out.push_str(&format!(
                "\n  jetons : {}\n  RPN    : {}",
                self.demarche.jetons, self.demarche.rpn
            ));
        }
        out
    }

    pub fn rendu_symboles(&self) -> String {
        self.registre.touches().join(" ")
    }
}

/// Session ligne à ligne jusqu’à la fin de l’entrée ou ":q".
pub fn session(
    app: &mut AppCalc,
    entree: impl BufRead,
    mut sortie: impl Write,
    interactif: bool,
) -> io::Result<()> {
    if interactif {
        write!(sortie, "> ")?;
        sortie.flush()?;
    }

    for ligne in entree.lines() {
        let (suite, texte) = app.traiter_ligne(&ligne?);
        if !texte.is_empty() {
            writeln!(sortie, "{texte}")?;
        }
        if suite == Suite::Quitter {
            break;
        }
        if interactif {
            write!(sortie, "> ")?;
            sortie.flush()?;
        }
    }

    sortie.flush()
}
