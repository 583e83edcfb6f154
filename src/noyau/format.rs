// src/noyau/format.rs
//
// Affichage des nombres.
// - nombre_en_texte : texte "court" aller-retour (pas de ".0" pour les entiers, -0 => 0),
//                     exposant signé hors de [1e-6, 1e21[ (1e-7, 1.5e+22)
// - affichage       : au-delà de 15 caractères, notation exponentielle à 8 décimales

/// Longueur max d’un affichage avant passage en exponentielle.
pub const LONGUEUR_MAX_AFFICHAGE: usize = 15;

/// Nombre de décimales de la notation exponentielle.
pub const DECIMALES_EXPONENTIELLE: usize = 8;

/// Bornes de l’écriture décimale simple : en dehors, le texte court passe en exposant.
const SEUIL_EXPOSANT_HAUT: f64 = 1e21;
const SEUIL_EXPOSANT_BAS: f64 = 1e-6;

/// Texte d’un nombre, tel qu’il est réinjecté dans le tampon.
pub fn nombre_en_texte(x: f64) -> String {
    if x == 0.0 {
        // couvre aussi -0
        return "0".to_string();
    }
    let a = x.abs();
    if a >= SEUIL_EXPOSANT_HAUT || a < SEUIL_EXPOSANT_BAS {
        return exposant_signe(format!("{x:e}"));
    }
    format!("{x}")
}

/// Notation exponentielle "d.dddddddde+N" / "d.dddddddde-N".
pub fn exponentielle(x: f64) -> String {
    exposant_signe(format!("{:.*e}", DECIMALES_EXPONENTIELLE, x))
}

/// "1e21" -> "1e+21" ; un exposant négatif reste tel quel.
fn exposant_signe(brut: String) -> String {
    match brut.split_once('e') {
        Some((mantisse, exp)) if !exp.starts_with('-') => format!("{mantisse}e+{exp}"),
        _ => brut,
    }
}

/// Texte pour l’écran principal.
///
/// Seuls les textes numériques sont reformatés : une expression en cours de saisie
/// reste telle quelle, même longue.
pub fn affichage(texte: &str) -> String {
    if texte.chars().count() <= LONGUEUR_MAX_AFFICHAGE {
        return texte.to_string();
    }
    match texte.parse::<f64>() {
        Ok(v) if v.is_finite() => exponentielle(v),
        _ => texte.to_string(),
    }
}

/// Résultat d’évaluation -> texte affiché.
pub fn formater_resultat(x: f64) -> String {
    affichage(&nombre_en_texte(x))
}
