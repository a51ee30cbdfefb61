// src/noyau/quantite.rs
//
// Quantité exacte en pouces, sur le treillis des seizièmes.
// - signe unique appliqué à la valeur entière (entier + fraction ensemble)
// - 0 <= numer < denom, denom ∈ {1, 2, 4, 8, 16}
// - zéro : numer = 0, denom = 1, signe positif
//
// Les champs sont privés : toute Quantity passe par normaliser(), donc un
// état hors treillis n’est pas représentable.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use super::erreur::ErreurNoyau;

/// Résolution la plus fine de la grammaire : le seizième de pouce.
pub const DENOM_MAX: u32 = 16;

pub const POUCES_PAR_PIED: u32 = 12;

/// Diviseur appliqué par `%`.
pub const DIVISEUR_POURCENT: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Quantity {
    negatif: bool,
    entier: BigUint,
    numer: u32,
    denom: u32,
}

fn pgcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// ppcm de deux dénominateurs du treillis, plafonné à DENOM_MAX.
fn ppcm_plafonne(a: u32, b: u32) -> u32 {
    let p = a / pgcd(a, b) * b;
    p.min(DENOM_MAX)
}

impl Quantity {
    pub fn zero() -> Self {
        Quantity {
            negatif: false,
            entier: BigUint::zero(),
            numer: 0,
            denom: 1,
        }
    }

    /// Entier de pouces (signé).
    #[cfg(test)]
    pub fn from_pouces(n: i64) -> Self {
        Self::normaliser(BigInt::from(n), 1)
    }

    /// Rationnel quelconque -> seizième le plus proche (demi loin de zéro).
    pub fn from_rational(r: &BigRational) -> Self {
        let seiziemes = (r * BigRational::from_integer(BigInt::from(DENOM_MAX)))
            .round()
            .to_integer();
        Self::normaliser(seiziemes, DENOM_MAX)
    }

    /// Point de passage unique : `numer_signe / denom` (denom du treillis)
    /// -> retenue dans l’entier + réduction de la fraction.
    fn normaliser(numer_signe: BigInt, denom: u32) -> Self {
        debug_assert!(denom.is_power_of_two() && denom <= DENOM_MAX);

        let negatif = numer_signe.is_negative();
        let abs = numer_signe.abs().to_biguint().unwrap_or_default();

        let d = BigUint::from(denom);
        let entier = &abs / &d;
        let reste = (&abs % &d).to_u32().unwrap_or(0);

        let (numer, denom) = if reste == 0 {
            (0, 1)
        } else {
            let g = pgcd(reste, denom);
            (reste / g, denom / g)
        };

        let nul = entier.is_zero() && numer == 0;
        Quantity {
            negatif: negatif && !nul,
            entier,
            numer,
            denom,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.entier.is_zero() && self.numer == 0
    }

    pub fn is_negative(&self) -> bool {
        self.negatif
    }

    pub fn entier(&self) -> &BigUint {
        &self.entier
    }

    pub fn numer(&self) -> u32 {
        self.numer
    }

    pub fn denom(&self) -> u32 {
        self.denom
    }

    /// Numérateur signé sur un dénominateur du treillis multiple de `self.denom`.
    fn numer_sur(&self, denom: u32) -> BigInt {
        let facteur = denom / self.denom;
        let n = BigInt::from(self.entier.clone()) * BigInt::from(denom)
            + BigInt::from(self.numer * facteur);
        if self.negatif {
            -n
        } else {
            n
        }
    }

    /// Nombre signé de seizièmes de pouce.
    pub fn seiziemes(&self) -> BigInt {
        self.numer_sur(DENOM_MAX)
    }

    pub fn to_rational(&self) -> BigRational {
        BigRational::new(self.numer_sur(self.denom), BigInt::from(self.denom))
    }

    pub fn to_f64(&self) -> f64 {
        let entier = self.entier.to_f64().unwrap_or(f64::MAX);
        let v = entier + f64::from(self.numer) / f64::from(self.denom);
        if self.negatif {
            -v
        } else {
            v
        }
    }

    /// Division exacte puis retour au treillis.
    pub fn checked_div(&self, diviseur: &Quantity) -> Result<Quantity, ErreurNoyau> {
        if diviseur.is_zero() {
            return Err(ErreurNoyau::DivisionParZero);
        }
        Ok(Self::from_rational(
            &(self.to_rational() / diviseur.to_rational()),
        ))
    }

    /// `x %` : x / 100, ramené au seizième le plus proche.
    pub fn pourcent(&self) -> Quantity {
        Self::from_rational(
            &(self.to_rational() / BigRational::from_integer(BigInt::from(DIVISEUR_POURCENT))),
        )
    }

    fn somme(&self, autre: &Quantity, soustraire: bool) -> Quantity {
        let d = ppcm_plafonne(self.denom, autre.denom);
        let b = autre.numer_sur(d);
        let n = if soustraire {
            self.numer_sur(d) - b
        } else {
            self.numer_sur(d) + b
        };
        Self::normaliser(n, d)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for &Quantity {
    type Output = Quantity;

    fn add(self, autre: &Quantity) -> Quantity {
        self.somme(autre, false)
    }
}

impl Sub for &Quantity {
    type Output = Quantity;

    fn sub(self, autre: &Quantity) -> Quantity {
        self.somme(autre, true)
    }
}

impl Mul for &Quantity {
    type Output = Quantity;

    fn mul(self, autre: &Quantity) -> Quantity {
        Quantity::from_rational(&(self.to_rational() * autre.to_rational()))
    }
}

impl Neg for &Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        Quantity {
            negatif: !self.negatif && !self.is_zero(),
            ..self.clone()
        }
    }
}

/// Pouces bruts, sans glyphe : `-3 1/2`, `5`, `3/8`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negatif {
            write!(f, "-")?;
        }
        match (self.entier.is_zero(), self.numer) {
            (_, 0) => write!(f, "{}", self.entier),
            (true, n) => write!(f, "{n}/{}", self.denom),
            (false, n) => write!(f, "{} {n}/{}", self.entier, self.denom),
        }
    }
}
