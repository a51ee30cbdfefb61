//! Tests fuzz safe : robustesse + déterminisme + aller-retour d’affichage.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur bornée
//! - budget temps global
//! - seule erreur attendue sur entrée bien formée : division par zéro
//! - invariant clé : ré-évaluer l’affichage pieds-pouces redonne la même valeur

use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::format::format_pieds_pouces;
use super::quantite::Quantity;
use super::{calculate, evaluate, ErreurNoyau};

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

/* ------------------------ Helpers ------------------------ */

/// Retire le glyphe pouce (comme la mémoire du clavier) puis ré-évalue.
fn aller_retour(affichage: &str) -> f64 {
    let texte = affichage.replace('"', "");
    calculate(&texte)
        .unwrap_or_else(|| panic!("affichage non ré-évaluable: {affichage:?}"))
        .result_decimal
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_fraction(rng: &mut Rng) -> String {
    let d = [2, 4, 8, 16][rng.pick(4) as usize];
    let n = 1 + rng.pick(d - 1);
    format!("{n}/{d}")
}

fn gen_operande(rng: &mut Rng) -> String {
    let pouce = if rng.coin() { "\"" } else { "" };
    match rng.pick(7) {
        0 => format!("{}", rng.pick(40)),
        1 => gen_fraction(rng) + pouce,
        2 => format!("{} {}{pouce}", 1 + rng.pick(30), gen_fraction(rng)),
        3 => format!("{}'", 1 + rng.pick(12)),
        4 => format!("{}' {}{pouce}", 1 + rng.pick(12), rng.pick(12)),
        5 => format!(
            "{}' {} {}{pouce}",
            1 + rng.pick(12),
            rng.pick(12),
            gen_fraction(rng)
        ),
        _ => format!("{}.{}", rng.pick(20), rng.pick(100)),
    }
}

fn gen_expr(rng: &mut Rng, longueur: usize) -> String {
    let mut s = String::new();
    if rng.pick(5) == 0 {
        s.push('-');
    }
    s.push_str(&gen_operande(rng));
    for _ in 0..rng.pick(longueur as u32 + 1) {
        let op = ["+", "-", "*", "/"][rng.pick(4) as usize];
        s.push_str(&format!(" {op} "));
        s.push_str(&gen_operande(rng));
    }
    s
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_aller_retour() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5);

        match evaluate(&expr) {
            Ok(r) => {
                // Même entrée => même sortie
                assert_eq!(evaluate(&expr), Ok(r.clone()), "expr={expr:?}");

                let v = aller_retour(&r.result_feet_inches);
                assert_eq!(v, r.result_decimal, "expr={expr:?} -> {r:?}");
                seen_ok += 1;
            }
            Err(e) => {
                assert_eq!(
                    e,
                    ErreurNoyau::DivisionParZero,
                    "erreur non attendue: expr={expr:?}"
                );
            }
        }
    }

    assert!(seen_ok > 100, "trop peu de succès: {seen_ok}");
}

#[test]
fn fuzz_safe_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = vec!["1/2"; 800].join(" + ");
    let r = calculate(&expr).unwrap_or_else(|| panic!("somme longue sans résultat"));
    budget(t0, max);

    // 800 * 1/2 = 400" = 33' 4"
    assert_eq!(r.result_feet_inches, "33' 4\"");
    assert_eq!(r.result_total_inches, "400");
}

#[test]
fn fuzz_safe_bruit_ne_panique_pas() {
    let mut rng = Rng::new(0xBADC0DE_u64);
    let alphabet: Vec<char> = "0123456789 '\"/+-*%.x".chars().collect();

    for _ in 0..500 {
        let n = rng.pick(16) as usize;
        let s: String = (0..n)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();
        // seul contrat : pas de panique
        let _ = calculate(&s);
    }
}

/* ------------------------ Propriétés ------------------------ */

proptest! {
    #[test]
    fn prop_aller_retour_seiziemes(s in -200_000i64..200_000) {
        let q = Quantity::from_pouces(s).checked_div(&Quantity::from_pouces(16)).unwrap();
        let affichage = format_pieds_pouces(&q, true);
        let texte = affichage.replace('"', "");
        let r = calculate(&texte).unwrap();
        prop_assert_eq!(r.result_decimal, q.to_f64());
    }

    #[test]
    fn prop_gauche_a_droite(a in 0i64..1000, b in 0i64..1000, c in 0i64..1000) {
        let r = calculate(&format!("{a} + {b} * {c}")).unwrap();
        prop_assert_eq!(r.result_decimal, ((a + b) * c) as f64);
    }

    #[test]
    fn prop_zero_idempotent(mesure in any::<bool>()) {
        let affichage = format_pieds_pouces(&Quantity::zero(), mesure);
        prop_assert_eq!(&affichage, "0");
        let r = calculate(&affichage).unwrap();
        prop_assert_eq!(r.result_feet_inches, "0");
    }
}
