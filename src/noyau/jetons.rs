// src/noyau/jetons.rs

use tracing::debug;

use super::erreur::{ErreurCalc, Resultat};
use super::nombre::{formater, try_parse_number, Nombre};
use super::operateurs::{Operateur, Registre};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(Nombre),

    // Opérateur du registre (y compris `neg`, produit par le moins unaire)
    Op(Operateur),

    LPar,
    RPar,
}

impl Tok {
    pub fn operateur(&self) -> Option<&Operateur> {
        match self {
            Tok::Op(op) => Some(op),
            _ => None,
        }
    }

    pub fn is_op(&self) -> bool {
        self.operateur().is_some()
    }

    fn is_moins(&self) -> bool {
        matches!(self, Tok::Op(op) if op.symbole == "-")
    }
}

/* ------------------------ Lexer ------------------------ */

/// Fin d'un littéral numérique commençant en `i` : chiffres/points,
/// puis exposant optionnel (e, E, signe facultatif, au moins un chiffre).
fn fin_nombre(b: &[u8], mut i: usize) -> usize {
    while i < b.len() && (b[i].is_ascii_digit() || b[i] == b'.') {
        i += 1;
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        if j < b.len() && b[j].is_ascii_digit() {
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
            return j;
        }
    }

    i
}

/// Découpe brute (espaces ignorés) :
/// - littéraux numériques
/// - mots ASCII [a-zA-Z]+
/// - un caractère de ponctuation ASCII
pub fn lexer(s: &str) -> Resultat<Vec<&str>> {
    let b = s.as_bytes();
    let mut out = Vec::new();
    let mut i: usize = 0;

    while let Some(c) = s[i..].chars().next() {
        if c.is_whitespace() {
            i += c.len_utf8();
            continue;
        }

        let fin = if c.is_ascii_digit() || c == '.' {
            fin_nombre(b, i)
        } else if c.is_ascii_alphabetic() {
            i + b[i..].iter().take_while(|x| x.is_ascii_alphabetic()).count()
        } else if c.is_ascii_punctuation() {
            i + 1
        } else {
            return Err(ErreurCalc::syntaxe(format!("caractère inattendu: '{c}'")));
        };

        out.push(&s[i..fin]);
        i = fin;
    }

    Ok(out)
}

fn classer(brut: &str, registre: &Registre) -> Resultat<Tok> {
    if brut.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return try_parse_number(brut)
            .map(Tok::Num)
            .ok_or_else(|| ErreurCalc::syntaxe(format!("nombre mal formé: '{brut}'")));
    }

    match brut {
        // les parenthèses n'existent que si le registre porte le groupement
        "(" | ")" if !registre.contains("(") => Err(ErreurCalc::syntaxe(format!(
            "jeton inconnu: '{brut}'"
        ))),
        "(" => Ok(Tok::LPar),
        ")" => Ok(Tok::RPar),
        _ => registre
            .get(brut)
            .filter(|op| op.clavier)
            .map(|op| Tok::Op(*op))
            .ok_or_else(|| ErreurCalc::syntaxe(format!("jeton inconnu: '{brut}'"))),
    }
}

/* ------------------------ Moins unaire ------------------------ */

/// Vérifie qu'un jeton est à sa place dans l'alternance valeur / opérateur
/// et retourne si une valeur est attendue ensuite.
/// - valeur attendue : nombre, '(' (ou moins unaire, traité à part)
/// - sinon           : opérateur binaire, postfixé (% !), ')'
fn suite_attendue(tok: &Tok, attend_valeur: bool) -> Resultat<bool> {
    match tok {
        Tok::Num(_) | Tok::LPar if !attend_valeur => Err(ErreurCalc::syntaxe(format!(
            "opérateur manquant avant '{}'",
            format_tokens(std::slice::from_ref(tok))
        ))),
        Tok::Num(_) => Ok(false),
        Tok::LPar => Ok(true),

        Tok::RPar | Tok::Op(_) if attend_valeur => Err(ErreurCalc::syntaxe(format!(
            "opérande manquante avant '{}'",
            format_tokens(std::slice::from_ref(tok))
        ))),
        Tok::RPar => Ok(false),
        Tok::Op(op) => Ok(op.attend_operande()),
    }
}

/// Réécrit chaque moins unaire en `neg` placé APRÈS son opérande :
/// - "-5"      => 5 neg
/// - "-(2+3)"  => ( 2 + 3 ) neg
///
/// Un '-' est unaire quand une valeur est attendue : en tête, après '('
/// ou après un opérateur binaire. Les postfixés (% !) donnent une valeur.
///
/// Une seule passe gauche -> droite (pas de cascade), qui refuse aussi
/// les expressions où valeurs et opérateurs n'alternent pas ("1 2 +", "+ 1 2").
fn resoudre_moins_unaire(jetons: &[Tok], registre: &Registre) -> Resultat<Vec<Tok>> {
    let neg = Tok::Op(
        *registre
            .negation()
            .ok_or_else(|| ErreurCalc::syntaxe("négation absente du registre"))?,
    );

    let mut out = Vec::with_capacity(jetons.len());
    // profondeurs de parenthèses où une négation attend la ')' correspondante
    let mut en_attente: Vec<usize> = Vec::new();
    let mut profondeur: usize = 0;
    let mut attend_valeur = true;

    let mut it = jetons.iter().peekable();
    while let Some(tok) = it.next() {
        if tok.is_moins() && attend_valeur {
            match it.peek().copied() {
                Some(num @ Tok::Num(_)) => {
                    it.next();
                    out.push(num.clone());
                    out.push(neg.clone());
                    attend_valeur = false;
                }
                Some(Tok::LPar) => en_attente.push(profondeur),
                _ => return Err(ErreurCalc::syntaxe("moins unaire sans opérande")),
            }
            continue;
        }

        attend_valeur = suite_attendue(tok, attend_valeur)?;

        out.push(tok.clone());
        match tok {
            Tok::LPar => profondeur += 1,
            Tok::RPar => {
                profondeur = profondeur.saturating_sub(1);
                while en_attente.last() == Some(&profondeur) {
                    en_attente.pop();
                    out.push(neg.clone());
                }
            }
            _ => {}
        }
    }

    // entrée vide : c'est la réduction qui la refuse (aucune valeur)
    if attend_valeur && !jetons.is_empty() {
        return Err(ErreurCalc::syntaxe("expression incomplète"));
    }

    // parenthèse jamais fermée : to_rpn signalera l'erreur
    out.extend(en_attente.iter().map(|_| neg.clone()));

    Ok(out)
}

/* ------------------------ Tokenize ------------------------ */

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 0.1, .5, 1e3)
/// - opérateurs du registre (+ - * / et, en étendu, % !)
/// - parenthèses ( )
/// - moins unaire (réécrit en `neg` postfixé)
pub fn tokenize(s: &str, registre: &Registre) -> Resultat<Vec<Tok>> {
    let mut bruts = Vec::new();
    for brut in lexer(s)? {
        debug!(jeton = brut, "lecture jeton");
        bruts.push(classer(brut, registre)?);
    }

    resoudre_moins_unaire(&bruts, registre)
}

/// Décimales affichées pour un nombre dans la démarche.
const DIGITS_DEMARCHE: usize = 12;

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => formater(r, DIGITS_DEMARCHE),
            Tok::Op(op) => op.symbole.to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
