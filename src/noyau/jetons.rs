// src/noyau/jetons.rs
//
// Tokenisation de l’expression canonique (ASCII).
// Les jetons ne portent pas encore d’unité : c’est l’analyse qui décide
// si un nombre est un pied, un pouce entier ou la partie entière d’un
// nombre mixte.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::erreur::ErreurNoyau;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    /// Nombre entier ou décimal (signe unaire déjà replié).
    Num(BigRational),
    /// Fraction littérale `n/d` sans espaces ; `numer` porte le signe.
    Frac { numer: BigInt, denom: BigInt },
    /// `'` collé à un nombre.
    Pied,
    /// `"` après un nombre ou une fraction (décoratif).
    Pouce,
    Op(Op),
    Percent,
}

impl Tok {
    /// Vrai si le jeton clôt (ou prolonge) une opérande : un `-` qui suit
    /// est alors binaire.
    fn ferme_operande(&self) -> bool {
        !matches!(self, Tok::Op(_))
    }

    /// Jeton d’unité : pied, pouce ou fraction (mode mesure).
    pub fn est_unite(&self) -> bool {
        matches!(self, Tok::Pied | Tok::Pouce | Tok::Frac { .. })
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers et décimaux (ex: 12, 2.5)
/// - fractions littérales sans espaces (ex: 3/8)
/// - marque de pied collée (ex: 3') et marque de pouce (ex: 5")
/// - opérateurs + - * / et %
/// - moins unaire replié dans le nombre qui suit (ex: -3, 5 * -1/2)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurNoyau> {
    let mut out: Vec<Tok> = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '+' => {
                out.push(Tok::Op(Op::Plus));
                i += 1;
                continue;
            }
            '*' => {
                out.push(Tok::Op(Op::Star));
                i += 1;
                continue;
            }
            '%' => {
                out.push(Tok::Percent);
                i += 1;
                continue;
            }
            '/' => {
                // un '/' collé à un chiffre (à droite) sans numérateur : fraction orpheline
                if chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()) {
                    return Err(ErreurNoyau::jetons(i, "fraction sans numérateur"));
                }
                out.push(Tok::Op(Op::Slash));
                i += 1;
                continue;
            }
            '\'' => {
                if !matches!(out.last(), Some(Tok::Num(_))) {
                    return Err(ErreurNoyau::jetons(i, "marque de pied sans nombre"));
                }
                out.push(Tok::Pied);
                i += 1;
                continue;
            }
            '"' => {
                if !matches!(out.last(), Some(Tok::Num(_) | Tok::Frac { .. })) {
                    return Err(ErreurNoyau::jetons(i, "marque de pouce sans nombre"));
                }
                out.push(Tok::Pouce);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Moins : unaire si collé à un chiffre et sans opérande avant
        if c == '-' {
            let colle = chars
                .get(i + 1)
                .is_some_and(|d| d.is_ascii_digit() || *d == '.');
            let operande_avant = out.last().is_some_and(Tok::ferme_operande);

            if colle && !operande_avant {
                i += 1;
                let tok = lire_nombre(&chars, &mut i, true)?;
                out.push(tok);
            } else {
                out.push(Tok::Op(Op::Minus));
                i += 1;
            }
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let tok = lire_nombre(&chars, &mut i, false)?;
            out.push(tok);
            continue;
        }

        return Err(ErreurNoyau::jetons(i, format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Lit `digits[.digits]` ou `digits/digits` à partir de `*i`.
fn lire_nombre(chars: &[char], i: &mut usize, negatif: bool) -> Result<Tok, ErreurNoyau> {
    let start = *i;
    let mut points = 0usize;
    while *i < chars.len() && (chars[*i].is_ascii_digit() || chars[*i] == '.') {
        if chars[*i] == '.' {
            points += 1;
        }
        *i += 1;
    }
    let texte: String = chars[start..*i].iter().collect();

    if points > 1 || texte == "." {
        return Err(ErreurNoyau::jetons(start, format!("nombre invalide: {texte}")));
    }

    // fraction immédiate: 3/8 (pas d’espaces)
    if *i < chars.len() && chars[*i] == '/' {
        if points > 0 {
            return Err(ErreurNoyau::jetons(start, "numérateur décimal"));
        }
        *i += 1;
        let start_d = *i;
        while *i < chars.len() && chars[*i].is_ascii_digit() {
            *i += 1;
        }
        if start_d == *i {
            return Err(ErreurNoyau::jetons(start_d, "fraction sans dénominateur"));
        }
        let d_str: String = chars[start_d..*i].iter().collect();

        let numer = entier(&texte, start)?;
        let denom = entier(&d_str, start_d)?;
        if denom.is_zero() {
            return Err(ErreurNoyau::jetons(start_d, "dénominateur nul"));
        }
        let numer = if negatif { -numer } else { numer };
        return Ok(Tok::Frac { numer, denom });
    }

    let valeur = decimal(&texte, start)?;
    Ok(Tok::Num(if negatif { -valeur } else { valeur }))
}

fn entier(s: &str, position: usize) -> Result<BigInt, ErreurNoyau> {
    BigInt::parse_bytes(s.as_bytes(), 10)
        .ok_or_else(|| ErreurNoyau::jetons(position, format!("nombre invalide: {s}")))
}

/// "2.75" -> 275/100 (exact).
fn decimal(s: &str, position: usize) -> Result<BigRational, ErreurNoyau> {
    let (ent, frac) = s.split_once('.').unwrap_or((s, ""));
    let chiffres = format!("{ent}{frac}");
    if chiffres.is_empty() {
        return Err(ErreurNoyau::jetons(position, "nombre vide"));
    }
    let n = entier(&chiffres, position)?;
    let d = BigInt::from(10u32).pow(frac.len() as u32);
    Ok(BigRational::new(n, d))
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        if r.denom().is_one() {
            format!("{}", r.numer())
        } else {
            format!("{}/{}", r.numer(), r.denom())
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format!("Num({})", format_rat(r)),
            Tok::Frac { numer, denom } => format!("Frac({numer}/{denom})"),
            Tok::Pied => "'".to_string(),
            Tok::Pouce => "\"".to_string(),
            Tok::Op(Op::Plus) => "+".to_string(),
            Tok::Op(Op::Minus) => "-".to_string(),
            Tok::Op(Op::Star) => "*".to_string(),
            Tok::Op(Op::Slash) => "/".to_string(),
            Tok::Percent => "%".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
