// src/noyau/operateurs.rs
//
// Registre des opérateurs (table fixe, lecture seule).
//
//   symbole  précédence  arité
//   (        0           groupement
//   + -      1           2
//   *        3           2
//   /        4           2
//   % !      5           1 (postfixés, registre étendu)
//   neg      6           1 (interne : produit par le moins unaire)
//
// Le registre est construit une fois (OnceLock) puis passé par référence
// au tokenizer et à l'évaluateur.

use std::fmt;
use std::sync::OnceLock;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use super::erreur::{ErreurCalc, Resultat};
use super::nombre::Nombre;

/// Symbole interne de la négation unaire (jamais saisi au clavier).
pub const NEG: &str = "neg";

/// Au-delà, la factorielle est refusée (évaluation bornée).
pub const FACTORIELLE_MAX: u64 = 5000;

pub type FnUnaire = fn(&Nombre) -> Resultat<Nombre>;
pub type FnBinaire = fn(&Nombre, &Nombre) -> Resultat<Nombre>;

#[derive(Clone, Copy)]
pub enum Application {
    /// "(" : pas de calcul, sert seulement au groupement.
    Groupement,
    Unaire(FnUnaire),
    Binaire(FnBinaire),
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Application::Groupement => f.write_str("Groupement"),
            Application::Unaire(_) => f.write_str("Unaire"),
            Application::Binaire(_) => f.write_str("Binaire"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Operateur {
    pub symbole: &'static str,
    pub precedence: u8,
    pub application: Application,
    /// false pour `neg` : l'interface ne doit pas en faire une touche.
    pub clavier: bool,
}

impl Operateur {
    pub fn arite(&self) -> u8 {
        match self.application {
            Application::Groupement => 0,
            Application::Unaire(_) => 1,
            Application::Binaire(_) => 2,
        }
    }

    /// Vrai si l'opérateur attend encore une opérande à sa droite.
    pub fn attend_operande(&self) -> bool {
        matches!(self.application, Application::Binaire(_))
    }
}

// Identité = symbole (les pointeurs de fonction ne se comparent pas de façon fiable).
impl PartialEq for Operateur {
    fn eq(&self, other: &Self) -> bool {
        self.symbole == other.symbole
    }
}

impl Eq for Operateur {}

/* ------------------------ Fonctions ------------------------ */

fn addition(a: &Nombre, b: &Nombre) -> Resultat<Nombre> {
    Ok(a + b)
}

fn soustraction(a: &Nombre, b: &Nombre) -> Resultat<Nombre> {
    Ok(a - b)
}

fn multiplication(a: &Nombre, b: &Nombre) -> Resultat<Nombre> {
    Ok(a * b)
}

fn division(a: &Nombre, b: &Nombre) -> Resultat<Nombre> {
    if b.is_zero() {
        return Err(ErreurCalc::arithmetique("division par zéro"));
    }
    Ok(a / b)
}

fn negation(x: &Nombre) -> Resultat<Nombre> {
    Ok(-x)
}

fn pourcentage(x: &Nombre) -> Resultat<Nombre> {
    Ok(x / BigRational::from_integer(BigInt::from(100)))
}

fn factorielle(x: &Nombre) -> Resultat<Nombre> {
    if !x.is_integer() {
        return Err(ErreurCalc::arithmetique("factorielle d'un nombre non entier"));
    }
    if x.is_negative() {
        return Err(ErreurCalc::arithmetique("factorielle d'un nombre négatif"));
    }

    let n = x
        .to_integer()
        .to_u64()
        .filter(|n| *n <= FACTORIELLE_MAX)
        .ok_or_else(|| ErreurCalc::arithmetique("factorielle trop grande"))?;

    let mut acc = BigInt::from(1);
    for k in 2..=n {
        acc *= k;
    }
    Ok(BigRational::from_integer(acc))
}

/* ------------------------ Table ------------------------ */

const PARENTHESE: Operateur = Operateur {
    symbole: "(",
    precedence: 0,
    application: Application::Groupement,
    clavier: true,
};

const PLUS: Operateur = Operateur {
    symbole: "+",
    precedence: 1,
    application: Application::Binaire(addition),
    clavier: true,
};

const MOINS: Operateur = Operateur {
    symbole: "-",
    precedence: 1,
    application: Application::Binaire(soustraction),
    clavier: true,
};

const FOIS: Operateur = Operateur {
    symbole: "*",
    precedence: 3,
    application: Application::Binaire(multiplication),
    clavier: true,
};

const DIVISE: Operateur = Operateur {
    symbole: "/",
    precedence: 4,
    application: Application::Binaire(division),
    clavier: true,
};

const POURCENT: Operateur = Operateur {
    symbole: "%",
    precedence: 5,
    application: Application::Unaire(pourcentage),
    clavier: true,
};

const FACTORIELLE: Operateur = Operateur {
    symbole: "!",
    precedence: 5,
    application: Application::Unaire(factorielle),
    clavier: true,
};

const NEGATION: Operateur = Operateur {
    symbole: NEG,
    precedence: 6,
    application: Application::Unaire(negation),
    clavier: false,
};

/// Table des opérateurs connus. Immuable après construction.
#[derive(Clone, Debug)]
pub struct Registre {
    operateurs: Vec<Operateur>,
}

impl Registre {
    /// Quatre opérations + négation.
    pub fn de_base() -> Self {
        Self {
            operateurs: vec![PARENTHESE, PLUS, MOINS, FOIS, DIVISE, NEGATION],
        }
    }

    /// Registre de base + pourcentage et factorielle.
    pub fn etendu() -> Self {
        Self {
            operateurs: vec![
                PARENTHESE,
                PLUS,
                MOINS,
                FOIS,
                DIVISE,
                POURCENT,
                FACTORIELLE,
                NEGATION,
            ],
        }
    }

    pub fn get(&self, symbole: &str) -> Option<&Operateur> {
        self.operateurs.iter().find(|op| op.symbole == symbole)
    }

    pub fn contains(&self, symbole: &str) -> bool {
        self.get(symbole).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operateur> {
        self.operateurs.iter()
    }

    /// Symboles saisissables (pour construire les touches d'une interface).
    /// ")" n'est pas un opérateur mais a sa touche, juste après "(".
    pub fn touches(&self) -> Vec<&'static str> {
        let mut out: Vec<&'static str> = self
            .operateurs
            .iter()
            .filter(|op| op.clavier)
            .map(|op| op.symbole)
            .collect();
        if let Some(i) = out.iter().position(|s| *s == "(") {
            out.insert(i + 1, ")");
        }
        out
    }

    pub fn negation(&self) -> Option<&Operateur> {
        self.get(NEG)
    }
}

impl Default for Registre {
    fn default() -> Self {
        Self::etendu()
    }
}

static REGISTRE: OnceLock<Registre> = OnceLock::new();

/// Registre par défaut (étendu), partagé par tout le processus.
pub fn registre() -> &'static Registre {
    REGISTRE.get_or_init(Registre::etendu)
}
