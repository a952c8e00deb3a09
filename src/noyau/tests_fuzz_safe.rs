//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - oracle : chaque expression générée porte sa valeur attendue (rationnel exact)
//! - invariant clé : jamais de panique, seulement les genres d'erreur prévus

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use super::erreur::ErreurCalc;
use super::evaluate;
use super::jetons::lexer;
use super::nombre::Nombre;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération avec oracle ------------------------ */

/// Valeur attendue : Some(v), ou None si une division par zéro survient.
type Attendu = Option<Nombre>;

fn gen_feuille(rng: &mut Rng) -> (String, Attendu) {
    // entiers et décimaux simples, zéro inclus (utile pour les divisions)
    let n = rng.pick(10) as i64;
    if rng.pick(4) == 0 {
        let d = rng.pick(10) as i64;
        let v = BigRational::new(BigInt::from(n * 10 + d), BigInt::from(10));
        (format!("{n}.{d}"), Some(v))
    } else {
        (format!("{n}"), Some(BigRational::from_integer(BigInt::from(n))))
    }
}

/// Expression entièrement parenthésée : l'oracle ne dépend pas de la précédence.
fn gen_expr(rng: &mut Rng, profondeur: u32) -> (String, Attendu) {
    if profondeur == 0 || rng.pick(3) == 0 {
        return gen_feuille(rng);
    }

    if rng.pick(6) == 0 {
        let (s, v) = gen_expr(rng, profondeur - 1);
        return (format!("-({s})"), v.map(|x| -x));
    }

    let (sa, va) = gen_expr(rng, profondeur - 1);
    let (sb, vb) = gen_expr(rng, profondeur - 1);
    let (op, v) = match rng.pick(4) {
        0 => ("+", va.zip(vb).map(|(a, b)| a + b)),
        1 => ("-", va.zip(vb).map(|(a, b)| a - b)),
        2 => ("*", va.zip(vb).map(|(a, b)| a * b)),
        _ => (
            "/",
            va.zip(vb).and_then(|(a, b)| (!b.is_zero()).then(|| a / b)),
        ),
    };

    let espace = if rng.coin() { " " } else { "" };
    (format!("({sa}){espace}{op}{espace}({sb})"), v)
}

fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '2', '9', '.', '+', '-', '*', '/', '%', '!', '(', ')', ' ', 'e', '^', 'x',
    ];
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_oracle_parenthese() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0xC0FFEE);

    for _ in 0..400 {
        budget(start, max);

        let (s, attendu) = gen_expr(&mut rng, 4);
        match (evaluate(&s), attendu) {
            (Ok(v), Some(a)) => assert_eq!(v, a, "expr={s:?}"),
            (Err(ErreurCalc::Arithmetique(_)), None) => {}
            (obtenu, attendu) => panic!("expr={s:?} obtenu={obtenu:?} attendu={attendu:?}"),
        }
    }
}

/// Vérification indépendante : valeurs et opérateurs alternent,
/// un '-' là où une valeur est attendue compte comme unaire.
fn alterne(s: &str) -> bool {
    let Ok(morceaux) = lexer(s) else {
        return false;
    };

    let mut attend_valeur = true;
    for m in morceaux {
        match m {
            "(" | "-" if attend_valeur => {}
            "(" => return false,
            ")" | "%" | "!" | "+" | "-" | "*" | "/" if attend_valeur => return false,
            ")" | "%" | "!" => {}
            "+" | "-" | "*" | "/" => attend_valeur = true,
            _ if !attend_valeur => return false,
            _ => attend_valeur = false,
        }
    }
    !attend_valeur
}

#[test]
fn alterne_reconnait_les_cas_connus() {
    assert!(alterne("-(2 + 3) * 4!"));
    assert!(alterne("50% - -1"));
    for s in ["1 2 +", "+ 1 2", "(2 3 -)", "2 +", "", "()"] {
        assert!(!alterne(s), "s={s:?}");
    }
}

#[test]
fn fuzz_bruit_sans_panique() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(42);

    for _ in 0..2000 {
        budget(start, max);

        let longueur = 1 + rng.pick(16) as usize;
        let s = gen_bruit(&mut rng, longueur);

        // toute issue est acceptable sauf la panique ; et le résultat est stable
        let r1 = evaluate(&s);
        let r2 = evaluate(&s);
        assert_eq!(r1, r2, "non déterministe: {s:?}");

        // un résultat n'est possible que si valeurs et opérateurs alternent
        if r1.is_ok() {
            assert!(alterne(&s), "valeur obtenue sans alternance: {s:?}");
        }
    }
}

#[test]
fn fuzz_profondeur_parentheses() {
    let start = Instant::now();
    let max = Duration::from_secs(5);

    for n in [1usize, 10, 100, 1000] {
        budget(start, max);
        let s = format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(evaluate(&s), Ok(BigRational::from_integer(BigInt::from(1))));

        let moins = format!("{}7{}", "-(".repeat(n), ")".repeat(n));
        let attendu = if n % 2 == 0 { 7 } else { -7 };
        assert_eq!(
            evaluate(&moins),
            Ok(BigRational::from_integer(BigInt::from(attendu))),
            "n={n}"
        );
    }
}
