// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Opérateurs préfixes (√, moins unaire) : empilés, ils sortent dès qu’un opérateur
//   binaire de précédence inférieure arrive (leur argument est alors complet).
// - Marqueurs suffixes x² / x³ : émis directement en "2 ^" / "3 ^" (vraie puissance).
// - Moins unaire : si '-' arrive quand on n’attend PAS une valeur => Tok::Neg.
//   Plus unaire : ignoré.
// - Pas de multiplication implicite : "2π" ou "(2)(3)" sont refusés.

use tracing::debug;

use super::erreur::ErreurCalc;
use super::expr::Expr;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        Tok::Sqrt => 5,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Refus de syntaxe : la raison part au journal, l’appelant ne voit que le genre d’erreur.
fn invalide(raison: &str) -> ErreurCalc {
    debug!(raison, "expression refusée");
    ErreurCalc::ExpressionInvalide
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Star, Sqrt, LPar, Num(9), RPar, Carre]
///   rpn:    [Num(2), Num(9), Sqrt, Num(2), Caret, Star]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalc> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les juxtapositions.
    let mut prev_was_value = false;

    for tok in tokens.iter().copied() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::E => {
                if prev_was_value {
                    return Err(invalide("deux valeurs sans opérateur"));
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Sqrt => {
                if prev_was_value {
                    return Err(invalide("√ après une valeur"));
                }
                ops.push(tok);
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(invalide("parenthèse après une valeur"));
                }
                ops.push(tok);
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(invalide("parenthèse fermante sans valeur"));
                }

                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(invalide("parenthèse fermante sans ouvrante"));
                }

                prev_was_value = true;
            }

            Tok::Carre | Tok::Cube => {
                if !prev_was_value {
                    return Err(invalide("puissance sans base"));
                }

                // seul √ lie plus fort qu’une puissance
                while let Some(top) = ops.last() {
                    if precedence(top) > precedence(&Tok::Caret) {
                        out.extend(ops.pop());
                    } else {
                        break;
                    }
                }

                let exposant = if tok == Tok::Carre { 2.0 } else { 3.0 };
                out.push(Tok::Num(exposant));
                out.push(Tok::Caret);
            }

            Tok::Minus | Tok::Plus if !prev_was_value => {
                // unaire : '-' => Neg ; '+' => rien
                if tok == Tok::Minus {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(invalide("opérateur sans opérande gauche"));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if doit_pop {
                        out.extend(ops.pop());
                    } else {
                        break;
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Factorielle => return Err(invalide("! hors fin d’expression")),
            Tok::Neg => return Err(invalide("jeton interne inattendu")),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(invalide("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Profondeur max de l’arbre : `eval` et la libération de l’arbre sont récursifs.
pub const PROFONDEUR_MAX: usize = 1000;

/// Construit une Expr à partir d’une RPN.
/// Au-delà de `PROFONDEUR_MAX` niveaux (ex: 10 000 moins unaires), l’expression est refusée.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurCalc> {
    // (noeud, profondeur du sous-arbre)
    let mut st: Vec<(Expr, usize)> = Vec::new();

    let borne = |p: usize| {
        if p > PROFONDEUR_MAX {
            Err(invalide("expression trop profonde"))
        } else {
            Ok(p)
        }
    };

    for tok in rpn.iter().copied() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::E => {
                let v = tok.valeur().ok_or_else(|| invalide("atome sans valeur"))?;
                st.push((Expr::Num(v), 1));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let (b, pb) = st.pop().ok_or_else(|| invalide("opérande manquant"))?;
                let (a, pa) = st.pop().ok_or_else(|| invalide("opérande manquant"))?;
                let p = borne(pa.max(pb) + 1)?;
                let (a, b) = (Box::new(a), Box::new(b));

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };

                st.push((e, p));
            }

            Tok::Neg | Tok::Sqrt => {
                let (x, px) = st.pop().ok_or_else(|| invalide("fonction sans argument"))?;
                let p = borne(px + 1)?;
                let x = Box::new(x);
                st.push((
                    if tok == Tok::Neg {
                        Expr::Neg(x)
                    } else {
                        Expr::Sqrt(x)
                    },
                    p,
                ));
            }

            Tok::Carre | Tok::Cube | Tok::Factorielle | Tok::LPar | Tok::RPar => {
                return Err(invalide("jeton inattendu en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some((e, _)), true) => Ok(e),
        _ => Err(invalide("expression invalide")),
    }
}
