//! Noyau: évaluation (pipeline réel)
//!
//! tokenize -> analyser -> opérandes en Quantity -> repli gauche à droite -> format
//!
//! ATTENTION : pas de précédence. `5 + 3 * 2` vaut `(5 + 3) * 2 = 16`, pas 11.
//! Le total courant s’accumule comme sur un clavier de calculatrice non
//! scientifique, et les expressions produites par la voix supposent ce
//! repli séquentiel. Ne pas “corriger”.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use tracing::{debug, trace};

use super::analyse::{analyser, Expression, Operande, Operateur};
use super::erreur::ErreurNoyau;
use super::format::{format_pieds_pouces, format_pouces_total, valeur_decimale};
use super::jetons::{format_tokens, tokenize, Tok};
use super::quantite::{Quantity, POUCES_PAR_PIED};
use super::resultat::CalculationResult;

/// Trace de calcul pour le panneau “Démarche” et le diagnostic.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub expression: String,
    pub mesure: bool,
}

/// Opérande -> Quantity : pieds * 12 + pouces + fraction, signe global,
/// puis `%` postfixé.
pub fn operande_en_quantite(o: &Operande) -> Quantity {
    let mut total = BigRational::zero();
    if let Some(p) = &o.pieds {
        total += p * BigRational::from_integer(BigInt::from(POUCES_PAR_PIED));
    }
    if let Some(p) = &o.pouces {
        total += p;
    }
    if let Some(fr) = &o.fraction {
        total += fr;
    }
    if o.negatif {
        total = -total;
    }

    let q = Quantity::from_rational(&total);
    if o.pourcent {
        q.pourcent()
    } else {
        q
    }
}

/// Replie l’expression strictement de gauche à droite.
pub fn evaluer(expr: &Expression) -> Result<Quantity, ErreurNoyau> {
    let mut acc = operande_en_quantite(&expr.tete);

    for (op, o) in &expr.suite {
        let rhs = operande_en_quantite(o);
        acc = match op {
            Operateur::Add => &acc + &rhs,
            Operateur::Sub => &acc - &rhs,
            Operateur::Mul => &acc * &rhs,
            Operateur::Div => acc.checked_div(&rhs)?,
            Operateur::Pourcent => &acc * &rhs.pourcent(),
        };
        trace!(%op, rhs = %rhs, acc = %acc, "repli");
    }

    Ok(acc)
}

/// Mode mesure : une marque de pied, de pouce ou une fraction quelque part.
fn mode_mesure(jetons: &[Tok]) -> bool {
    jetons.iter().any(Tok::est_unite)
}

/// API diagnostic : résultat + démarche, ou l’erreur précise.
pub fn eval_expression(
    expr_str: &str,
) -> Result<(CalculationResult, DemarcheNoyau), ErreurNoyau> {
    let s = expr_str.trim();

    // 1) Jetons
    let jetons = tokenize(s)?;
    let jetons_txt = format_tokens(&jetons);
    trace!(jetons = %jetons_txt, "tokenize");

    // 2) Expression
    let expr = analyser(&jetons)?;
    let mesure = mode_mesure(&jetons);
    debug!(expression = %expr, mesure, "analyse");

    // 3) Repli
    let q = evaluer(&expr)?;

    // 4) Format
    let resultat = CalculationResult {
        expression: s.to_string(),
        result_decimal: valeur_decimale(&q),
        result_feet_inches: format_pieds_pouces(&q, mesure),
        result_total_inches: format_pouces_total(&q),
        is_inch_mode: mesure,
    };

    let d = DemarcheNoyau {
        jetons: jetons_txt,
        expression: expr.to_string(),
        mesure,
    };

    Ok((resultat, d))
}

/// Comme `calculate`, mais conserve la cause de l’échec.
pub fn evaluate(expr_str: &str) -> Result<CalculationResult, ErreurNoyau> {
    eval_expression(expr_str).map(|(r, _)| r)
}

/// API publique : `None` si jetons/analyse invalides ou division par zéro.
/// Ne panique jamais sur une entrée malformée (sortie voix incluse).
pub fn calculate(expr_str: &str) -> Option<CalculationResult> {
    match evaluate(expr_str) {
        Ok(r) => Some(r),
        Err(e) => {
            debug!(entree = expr_str, erreur = %e, "aucun résultat");
            None
        }
    }
}
