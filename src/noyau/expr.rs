// src/noyau/expr.rs
//
// AST flottant (f64) construit depuis la RPN.
// - Num  : littéral ou constante déjà substituée (π, e)
// - Neg  : moins unaire
// - Pow  : ^, x², x³
// - Sqrt : √
//
// L’évaluation est structurelle : aucune capacité au-delà de l’arithmétique.

use std::fmt;

use super::erreur::{fini, Resultat};

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),

    Neg(Box<Expr>),
    Sqrt(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Évalue l’arbre en double précision.
    /// Tout résultat intermédiaire NaN/∞ est refusé (division par zéro, 0^-1, √-1...).
    pub fn eval(&self) -> Resultat<f64> {
        use Expr::*;

        let v = match self {
            Num(v) => *v,

            Neg(x) => -x.eval()?,
            Sqrt(x) => x.eval()?.sqrt(),

            Add(a, b) => a.eval()? + b.eval()?,
            Sub(a, b) => a.eval()? - b.eval()?,
            Mul(a, b) => a.eval()? * b.eval()?,
            Div(a, b) => a.eval()? / b.eval()?,
            Pow(a, b) => a.eval()?.powf(b.eval()?),
        };

        fini(v)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;

        match self {
            Num(v) => write!(f, "{v}"),
            Neg(x) => write!(f, "-({x})"),
            Sqrt(x) => write!(f, "√({x})"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a})^{b}"),
        }
    }
}
