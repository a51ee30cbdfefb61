// src/noyau/format.rs
//
// Quantity -> textes d’affichage :
// - pieds-pouces-fraction (mode mesure) : `3' 1"`, `8 3/4"`, `1/2"`, `-1' 0"`
// - décimal en pouces totaux, au plus 4 décimales, zéros de fin retirés
//
// Un zéro s’affiche toujours "0", quel que soit le mode.

use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};

use super::quantite::{Quantity, DENOM_MAX, POUCES_PAR_PIED};

/// Précision du total en pouces (1/16 = 0.0625 : exact sur 4 décimales).
pub const DECIMALES_TOTAL: usize = 4;

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal, zéros de fin retirés.
fn scaled_to_decimal(scaled: &BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    let abs = scaled.abs();

    let scale = pow10(digits);
    let int_part = &abs / &scale;
    let frac_part = &abs % &scale;

    let mut texte = int_part.to_str_radix(10);
    if !frac_part.is_zero() {
        let mut frac = frac_part.to_str_radix(10);
        while frac.len() < digits {
            frac.insert(0, '0');
        }
        texte.push('.');
        texte.push_str(frac.trim_end_matches('0'));
    }

    if neg {
        format!("-{texte}")
    } else {
        texte
    }
}

/// Total en pouces, décimal (ex: `8.75`, `-3`, `0.0625`).
pub fn format_pouces_total(q: &Quantity) -> String {
    if q.is_zero() {
        return "0".to_string();
    }
    // seizièmes * 10^4 / 16 : division exacte
    let scaled = q.seiziemes() * pow10(DECIMALES_TOTAL) / BigInt::from(DENOM_MAX);
    scaled_to_decimal(&scaled, DECIMALES_TOTAL)
}

/// Affichage principal : pieds-pouces-fraction en mode mesure, décimal sinon.
pub fn format_pieds_pouces(q: &Quantity, mesure: bool) -> String {
    if q.is_zero() {
        return "0".to_string();
    }
    if !mesure {
        return format_pouces_total(q);
    }

    let douze = BigUint::from(POUCES_PAR_PIED);
    let pieds = q.entier() / &douze;
    let pouces = q.entier() % &douze;

    let mut out = String::new();
    if q.is_negative() {
        out.push('-');
    }
    if !pieds.is_zero() {
        out.push_str(&format!("{pieds}' "));
    }

    // pouces entiers omis seulement s’ils valent 0 à côté d’une fraction
    match (pouces.is_zero(), q.numer()) {
        (_, 0) => out.push_str(&format!("{pouces}")),
        (true, n) => out.push_str(&format!("{n}/{}", q.denom())),
        (false, n) => out.push_str(&format!("{pouces} {n}/{}", q.denom())),
    }
    out.push('"');
    out
}

/// Valeur numérique native (aval : stockage, tri, graphiques).
pub fn valeur_decimale(q: &Quantity) -> f64 {
    if q.is_zero() {
        0.0
    } else {
        q.to_f64()
    }
}
