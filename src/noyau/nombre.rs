// src/noyau/nombre.rs
//
// Nombres du noyau : rationnels exacts (pas de flottants).
// - lecture d'un littéral décimal : "12", "0.1", ".5", "5.", "1e3", "2.5E-2"
// - rendu décimal : exact si le développement se termine, tronqué sinon

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Valeur manipulée par tout le pipeline.
pub type Nombre = BigRational;

/// Borne sur l'exposant d'un littéral (1e4096 reste raisonnable, 1e999999999 non).
pub const EXPOSANT_MAX: i64 = 4096;

/// Garde-fou : décimales au plus pour un développement infini (anti-gel).
pub const DIGITS_MAX: usize = 200;

/* ------------------------ Lecture ------------------------ */

/// Tente de lire un littéral décimal. `None` si ce n'est pas un nombre.
pub fn try_parse_number(s: &str) -> Option<Nombre> {
    let (mantisse, exposant) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };

    let (ent, frac) = mantisse.split_once('.').unwrap_or((mantisse, ""));
    if ent.is_empty() && frac.is_empty() {
        return None;
    }
    let chiffres_ok = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
    if !chiffres_ok(ent) || !chiffres_ok(frac) {
        return None;
    }

    let chiffres = format!("{ent}{frac}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;

    // valeur = n × 10^exp
    let mut exp = -(frac.len() as i64);
    if let Some(e) = exposant {
        let e: i64 = e.parse().ok()?;
        if e.abs() > EXPOSANT_MAX {
            return None;
        }
        exp += e;
    }

    let r = if exp >= 0 {
        BigRational::from_integer(n * pow10(exp as usize))
    } else {
        BigRational::new(n, pow10(exp.unsigned_abs() as usize))
    };
    Some(r)
}

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal tronqué.
fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };
    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// r -> entier “scalé” = trunc(r * 10^digits)
fn rational_scaled(r: &BigRational, digits: usize) -> BigInt {
    let scale = pow10(digits);
    (r.numer() * scale) / r.denom()
}

/// Nombre de décimales du développement exact, si le dénominateur
/// n'a que des facteurs 2 et 5.
fn decimales_exactes(denom: &BigInt) -> Option<usize> {
    let deux = BigInt::from(2);
    let cinq = BigInt::from(5);

    let mut d = denom.abs();
    let (mut a, mut b) = (0usize, 0usize);
    while (&d % &deux).is_zero() {
        d /= &deux;
        a += 1;
    }
    while (&d % &cinq).is_zero() {
        d /= &cinq;
        b += 1;
    }

    d.is_one().then_some(a.max(b))
}

/// Rendu décimal d'un nombre.
/// - entier : tel quel
/// - développement fini : exact (0.1 + 0.2 => "0.3")
/// - développement infini : tronqué à `digits` décimales (au plus `DIGITS_MAX`),
///   zéros finaux retirés
pub fn formater(r: &Nombre, digits: usize) -> String {
    if r.is_integer() {
        return r.to_integer().to_string();
    }

    let n = decimales_exactes(r.denom()).unwrap_or(digits.min(DIGITS_MAX));
    let mut s = scaled_to_decimal(rational_scaled(r, n), n);

    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}
