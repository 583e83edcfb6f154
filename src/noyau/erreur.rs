// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// - ExpressionInvalide : syntaxe, parenthèses, NaN/∞ (division par zéro, 0^-1, √-1)
// - FactorielleInvalide : opérande de ! négatif, non entier ou non numérique
//
// Le "no-op" (fonction scientifique / mémoire sur un affichage non numérique)
// n’est PAS une erreur : l’opération rend la main sans toucher l’état.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalc {
    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("factorielle d’un nombre négatif ou non entier")]
    FactorielleInvalide,
}

/// Raccourci du noyau.
pub type Resultat<T> = Result<T, ErreurCalc>;

/// Garde-fou commun : tout résultat NaN/∞ devient ExpressionInvalide.
pub fn fini(x: f64) -> Resultat<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(ErreurCalc::ExpressionInvalide)
    }
}
