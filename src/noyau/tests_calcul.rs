//! Tests de calcul (campagne) : propriétés arithmétiques du pipeline complet.
//!
//! - valeurs exactes (rationnels, pas de flottants)
//! - précédence, groupement, associativité à gauche
//! - moins unaire (tête, après opérateur, devant un groupe)
//! - genres d'erreur : syntaxe / pile / arithmétique

use super::erreur::ErreurCalc;
use super::nombre::{formater, try_parse_number, Nombre};
use super::{evaluate, evaluate_avec, Registre};

fn num(s: &str) -> Nombre {
    try_parse_number(s.trim_start_matches('-'))
        .map(|r| if s.starts_with('-') { -r } else { r })
        .unwrap_or_else(|| panic!("littéral invalide {s:?}"))
}

fn assert_vaut(expr: &str, attendu: &str) {
    match evaluate(expr) {
        Ok(v) => assert_eq!(v, num(attendu), "expr={expr:?}"),
        Err(e) => panic!("expr={expr:?} err={e}"),
    }
}

fn assert_syntaxe(expr: &str) {
    let r = evaluate(expr);
    assert!(matches!(r, Err(ErreurCalc::Syntaxe(_))), "expr={expr:?} => {r:?}");
}

fn assert_pile(expr: &str) {
    let r = evaluate(expr);
    assert!(matches!(r, Err(ErreurCalc::Pile(_))), "expr={expr:?} => {r:?}");
}

fn assert_arith(expr: &str) {
    let r = evaluate(expr);
    assert!(
        matches!(r, Err(ErreurCalc::Arithmetique(_))),
        "expr={expr:?} => {r:?}"
    );
}

/* ------------------------ Décimal exact ------------------------ */

#[test]
fn calc_decimal_exact() {
    assert_vaut("0.1 + 0.2", "0.3");
    assert_vaut("1.1 * 1.1", "1.21");
    assert_vaut("0.3 - 0.1", "0.2");
    assert_vaut("1 / 8", "0.125");
    assert_vaut("2.5e2 + 1E-1", "250.1");
}

#[test]
fn calc_tiers_reste_exact() {
    // 1/3 * 3 = 1 exactement (pas 0.999…)
    assert_vaut("1 / 3 * 3", "1");
    let v = evaluate("1 / 3").unwrap();
    assert_eq!(formater(&v, 10), "0.3333333333");
}

/* ------------------------ Précédence / groupement ------------------------ */

#[test]
fn calc_precedence() {
    assert_vaut("2 + 3 * 4", "14");
    assert_vaut("2 * 3 + 4", "10");
    assert_vaut("10 - 6 / 2", "7");
    assert_vaut("6 / 2 * 3", "9");
}

#[test]
fn calc_groupement() {
    assert_vaut("(2 + 3) * 4", "20");
    assert_vaut("((2))", "2");
    assert_vaut("2 * (3 + (4 - 1)) / 3", "4");
}

#[test]
fn calc_associativite_gauche() {
    assert_vaut("8 - 3 - 2", "3");
    assert_vaut("8 - 3 + 2", "7");
    assert_vaut("16 / 4 / 2", "2");
    assert_vaut("1 - 1 - 1 - 1", "-2");
}

/* ------------------------ Moins unaire ------------------------ */

#[test]
fn calc_moins_unaire() {
    assert_vaut("-5 + 3", "-2");
    assert_vaut("3 - -5", "8");
    assert_vaut("-2 * 3", "-6");
    assert_vaut("2 * -3", "-6");
    assert_vaut("2 - -3 * 4", "14");
    assert_vaut("(-5)", "-5");
    assert_vaut("-0.5 * 4", "-2");
}

#[test]
fn calc_moins_unaire_devant_groupe() {
    assert_vaut("-(2 + 3) * 2", "-10");
    assert_vaut("-(-(4))", "4");
    assert_vaut("10 / -(1 + 1)", "-5");
}

/* ------------------------ Pourcentage / factorielle ------------------------ */

#[test]
fn calc_pourcentage_factorielle() {
    assert_vaut("50%", "0.5");
    assert_vaut("200 * 15%", "30");
    assert_vaut("5!", "120");
    assert_vaut("0!", "1");
    assert_vaut("3! + 1", "7");
    assert_vaut("2 * 3!", "12");
    assert_vaut("50% - 3", "-2.5");
}

#[test]
fn calc_factorielle_invalide() {
    assert_arith("(-3)!");
    assert_arith("2.5!");
    assert_arith("100000!");
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn calc_division_par_zero() {
    assert_arith("5 / 0");
    assert_arith("1 / (2 - 2)");
    assert_arith("0 / 0.0");
}

#[test]
fn calc_syntaxe() {
    assert_syntaxe("(2 + 3");
    assert_syntaxe("2 + 3)");
    assert_syntaxe("2 # 3");
    assert_syntaxe("2 ^ 3");
    assert_syntaxe("1..2");
    assert_syntaxe("- -5");
    assert_syntaxe("x + 1");
}

#[test]
fn calc_operateur_pendant() {
    assert_syntaxe("2 + ");
    assert_syntaxe("+ 2");
    assert_syntaxe("2 3");
    assert_syntaxe("2 * / 3");
    // rien à réduire
    assert_pile("");
    assert_pile("   ");
}

#[test]
fn calc_alternance_valeur_operateur() {
    assert_syntaxe("+ 1 2");
    assert_syntaxe("1 2 +");
    assert_syntaxe("* 2 3");
    assert_syntaxe("1 + 2 3 *");
    assert_syntaxe("(2 3 -)");
    assert_syntaxe("2 (3 + 1)");
    assert_syntaxe("(1 + 2) 3");
    assert_syntaxe("5! 2");
    assert_syntaxe("()");
    assert_vaut("(2) - (3)", "-1");
    assert_vaut("5! - 3%", "119.97");
}

#[test]
fn calc_registre_de_base() {
    let base = Registre::de_base();
    assert_eq!(evaluate_avec("-(1 + 2) * 3", &base), Ok(num("-9")));
    assert!(matches!(evaluate_avec("3!", &base), Err(ErreurCalc::Syntaxe(_))));
}

/* ------------------------ Idempotence ------------------------ */

#[test]
fn calc_idempotence() {
    for s in ["0.1 + 0.2", "-(3 - 10) / 4", "5 / 0", "(1", "4!"] {
        assert_eq!(evaluate(s), evaluate(s), "s={s:?}");
    }
}

#[test]
fn calc_concurrent() {
    let fils: Vec<_> = (0..4)
        .map(|k| std::thread::spawn(move || evaluate(&format!("{k} * (1 + 2) - -1"))))
        .collect();
    for (k, f) in fils.into_iter().enumerate() {
        let attendu = num(&(3 * k as i64 + 1).to_string());
        assert_eq!(f.join().unwrap(), Ok(attendu));
    }
}
