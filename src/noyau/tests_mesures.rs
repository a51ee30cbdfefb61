//! Tests de mesures (campagne) : propriétés du pipeline complet.
//!
//! - réduction des fractions, repli gauche à droite, adjacence pieds/pouces
//! - division (dont par zéro), négatifs, zéro
//! - mode mesure vs mode décimal
//! - marque de pouce décorative

use rstest::rstest;

use super::{calculate, evaluate, ErreurNoyau};

#[rstest]
#[case("2/4", "1/2\"", 0.5)]
#[case("5 1/2 + 3 1/4", "8 3/4\"", 8.75)]
#[case("3' 2 - 1", "3' 1\"", 37.0)]
#[case("10 1/2 / 2", "5 1/4\"", 5.25)]
#[case("2\" - 5", "-3\"", -3.0)]
#[case("-3 1/2", "-3 1/2\"", -3.5)]
#[case("-3 1/2 + 1", "-2 1/2\"", -2.5)]
#[case("5 1/2 + 10", "1' 3 1/2\"", 15.5)]
#[case("6' / 2", "3' 0\"", 36.0)]
#[case("3' 1/2", "3' 1/2\"", 36.5)]
#[case("1/8 + 1/16", "3/16\"", 0.1875)]
#[case("7/8 + 1/8", "1\"", 1.0)]
fn mesure_pieds_pouces(#[case] entree: &str, #[case] pieds_pouces: &str, #[case] decimal: f64) {
    let r = evaluate(entree).unwrap_or_else(|e| panic!("{entree:?}: {e}"));
    assert!(r.is_inch_mode, "mode mesure attendu pour {entree:?}");
    assert_eq!(r.result_feet_inches, pieds_pouces, "entree={entree:?}");
    assert_eq!(r.result_decimal, decimal, "entree={entree:?}");
}

#[rstest]
#[case("5 + 3 * 2", "16", 16.0)]
#[case("2 - 5", "-3", -3.0)]
#[case("10 / 4", "2.5", 2.5)]
#[case("2.5 * 3", "7.5", 7.5)]
#[case("200 * 50 %", "100", 100.0)]
fn mode_decimal(#[case] entree: &str, #[case] affichage: &str, #[case] decimal: f64) {
    let r = evaluate(entree).unwrap_or_else(|e| panic!("{entree:?}: {e}"));
    assert!(!r.is_inch_mode, "mode décimal attendu pour {entree:?}");
    assert_eq!(r.result_feet_inches, affichage);
    assert_eq!(r.result_total_inches, affichage);
    assert_eq!(r.result_decimal, decimal);
}

#[test]
fn gauche_a_droite_pas_onze() {
    let r = calculate("5 + 3 * 2").unwrap();
    assert_eq!(r.result_decimal, 16.0);
    assert_ne!(r.result_decimal, 11.0);

    // même politique pour / après -
    assert_eq!(calculate("10 - 4 / 2").unwrap().result_decimal, 3.0);
}

#[test]
fn total_pouces_avec_pieds() {
    let r = calculate("3' 2 1/2").unwrap();
    assert_eq!(r.result_total_inches, "38.5");
    assert_eq!(r.result_feet_inches, "3' 2 1/2\"");
}

#[rstest]
#[case("5\"", "5")]
#[case("3' 2\"", "3' 2")]
#[case("5 1/2\" + 1\"", "5 1/2 + 1")]
fn marque_pouce_decorative(#[case] avec: &str, #[case] sans: &str) {
    let a = calculate(avec).unwrap();
    let b = calculate(sans).unwrap();
    assert_eq!(a.result_decimal, b.result_decimal);
    assert_eq!(a.result_total_inches, b.result_total_inches);
}

#[rstest]
#[case("0")]
#[case("5 - 5")]
#[case("3' - 36")]
#[case("1/2 - 1/2")]
#[case("0 * 7")]
fn zero_toujours_zero(#[case] entree: &str) {
    let r = calculate(entree).unwrap();
    assert_eq!(r.result_feet_inches, "0");
    assert_eq!(r.result_total_inches, "0");
    assert_eq!(r.result_decimal, 0.0);
    assert!(r.result_decimal.is_sign_positive());

    // ré-évaluer l’affichage redonne "0"
    let again = calculate(&r.result_feet_inches).unwrap();
    assert_eq!(again.result_feet_inches, "0");
}

#[test]
fn division_par_zero_pas_infini() {
    assert_eq!(evaluate("5 / 0"), Err(ErreurNoyau::DivisionParZero));
    assert_eq!(evaluate("3' / 1/2 / 0"), Err(ErreurNoyau::DivisionParZero));
    assert!(calculate("5 / 0").is_none());
}

#[rstest]
#[case("5 x 2")]
#[case("3/0")]
#[case("5 * ")]
#[case("* 5")]
#[case("5 + + 2")]
#[case("5 3")]
#[case("")]
fn echec_generique(#[case] entree: &str) {
    assert!(calculate(entree).is_none(), "attendu None pour {entree:?}");
}

#[test]
fn categories_d_erreur() {
    assert!(matches!(evaluate("5 x 2"), Err(ErreurNoyau::Jetons { .. })));
    assert!(matches!(evaluate("5 3"), Err(ErreurNoyau::Analyse { .. })));
    assert!(matches!(evaluate("5 -"), Err(ErreurNoyau::Analyse { .. })));
}

#[test]
fn memoire_clavier_reinjectee() {
    // le clavier réinjecte le résultat (sans ") devant l’opérateur suivant
    let r = calculate("5 1/2 + 10").unwrap();
    let memoire = r.result_feet_inches.replace('"', "");
    let suite = calculate(&format!("{memoire} - 1/2")).unwrap();
    assert_eq!(suite.result_feet_inches, "1' 3\"");
}
