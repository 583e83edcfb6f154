//! Noyau : évaluation (pipeline réel)
//!
//! texte -> jetons (normaliseur) -> RPN -> Expr -> f64
//!
//! Cas particulier : un `!` final court-circuite tout le pipeline. Seul le
//! littéral qui le précède compte (entier ≥ 0), jamais le résultat d’un calcul.

use num_traits::ToPrimitive;
use tracing::debug;

use super::erreur::{ErreurCalc, Resultat};
use super::jetons::{format_tokens, tokenize, Tok};
use super::rpn::{from_rpn, to_rpn};

/// API publique : évalue une expression du tampon.
pub fn eval_expression(expr_str: &str) -> Resultat<f64> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalc::ExpressionInvalide);
    }

    if let Some(prefixe) = s.strip_suffix('!') {
        return factorielle_texte(prefixe);
    }

    // 1) Jetons
    let jetons = tokenize(s)?;
    debug!(jetons = %format_tokens(&jetons), "normalisation");

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    debug!(rpn = %format_tokens(&rpn), "shunting-yard");

    // 3) AST puis valeur
    let expr = from_rpn(&rpn)?;
    expr.eval()
}

/// `n!` où `n` est le texte avant le `!` : un nombre (ou une constante), éventuellement signé.
fn factorielle_texte(prefixe: &str) -> Resultat<f64> {
    let jetons = tokenize(prefixe).map_err(|_| ErreurCalc::FactorielleInvalide)?;

    let n = match jetons.as_slice() {
        [a] => a.valeur(),
        [Tok::Plus, a] => a.valeur(),
        [Tok::Minus, a] => a.valeur().map(|v| -v),
        _ => None,
    }
    .ok_or(ErreurCalc::FactorielleInvalide)?;

    factorielle(n)
}

/// 1·2·…·n en f64 (0! = 1).
///
/// - n négatif / non entier / non fini : FactorielleInvalide
/// - produit qui déborde vers ∞ (n > 170) : ExpressionInvalide
pub fn factorielle(x: f64) -> Resultat<f64> {
    if !x.is_finite() || x < 0.0 || x.fract() != 0.0 {
        return Err(ErreurCalc::FactorielleInvalide);
    }
    // au-delà de u64, le produit a débordé depuis longtemps
    let Some(n) = x.to_u64() else {
        return Err(ErreurCalc::ExpressionInvalide);
    };

    let mut fact = 1.0_f64;
    for i in 2..=n {
        fact *= i as f64;
        if !fact.is_finite() {
            return Err(ErreurCalc::ExpressionInvalide);
        }
    }
    Ok(fact)
}
