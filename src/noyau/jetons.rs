// src/noyau/jetons.rs
//
// Normaliseur : texte du tampon -> jetons évaluables.
//
// Règles:
// - π / "pi"            => constante π
// - "e" (mot isolé)     => constante e ; jamais à l’intérieur d’un autre mot
// - x² / ², x³ / ³      => marqueurs suffixes (deviendront ^2 / ^3 en RPN)
// - √ / "sqrt"          => fonction racine (préfixe)
// - !                   => factorielle (légale seulement en fin de tampon, cf. eval.rs)
// - × ÷ −               => * / -

use super::erreur::{ErreurCalc, Resultat};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,
    E,

    Sqrt,
    Carre,
    Cube,
    Factorielle,
    Neg, // moins unaire (produit par to_rpn seulement)

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
}

impl Tok {
    /// Valeur numérique d’un atome (nombre ou constante).
    pub fn valeur(&self) -> Option<f64> {
        match self {
            Tok::Num(v) => Some(*v),
            Tok::Pi => Some(std::f64::consts::PI),
            Tok::E => Some(std::f64::consts::E),
            _ => None,
        }
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - décimaux (12, 1.5, .5, 5.) + exposant collé aux chiffres (2e3, 1.5e-2)
/// - opérateurs + - * / ^ (et × ÷ −)
/// - parenthèses ( )
/// - constantes π / pi / e (mots entiers seulement)
/// - √ / sqrt, x² x³ ² ³, !
pub fn tokenize(s: &str) -> Resultat<Vec<Tok>> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Symboles d’un seul caractère
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '*' | '×' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '!' => Some(Tok::Factorielle),
            'π' => Some(Tok::Pi),
            '√' => Some(Tok::Sqrt),
            '²' => Some(Tok::Carre),
            '³' => Some(Tok::Cube),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Mots ASCII : on lit le mot ENTIER avant de décider (pas de sous-chaîne).
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            match word.to_lowercase().as_str() {
                "pi" => out.push(Tok::Pi),
                "e" => out.push(Tok::E),
                "sqrt" => out.push(Tok::Sqrt),
                // "x²" / "x³" tels qu’insérés par les touches
                "x" => match chars.get(i) {
                    Some('²') => {
                        out.push(Tok::Carre);
                        i += 1;
                    }
                    Some('³') => {
                        out.push(Tok::Cube);
                        i += 1;
                    }
                    _ => return Err(ErreurCalc::ExpressionInvalide),
                },
                _ => return Err(ErreurCalc::ExpressionInvalide),
            }
            continue;
        }

        // Nombre décimal
        if c.is_ascii_digit() || c == '.' {
            let (v, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(v));
            i = fin;
            continue;
        }

        return Err(ErreurCalc::ExpressionInvalide);
    }

    Ok(out)
}

/// Lit un littéral à partir de `start`. Retourne (valeur, index après le littéral).
fn lire_nombre(chars: &[char], start: usize) -> Resultat<(f64, usize)> {
    let mut i = start;
    let mut points = 0usize;
    let mut chiffres = 0usize;

    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        if chars[i] == '.' {
            points += 1;
        } else {
            chiffres += 1;
        }
        i += 1;
    }

    // "1.2.3" ou "." seul
    if points > 1 || chiffres == 0 {
        return Err(ErreurCalc::ExpressionInvalide);
    }

    // Exposant seulement s’il est suivi d’un chiffre (2e3, 2e-3) ; sinon "e" reste un mot.
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let chiffre_a = |k: usize| chars.get(k).is_some_and(|c| c.is_ascii_digit());
        let signe = matches!(chars.get(i + 1), Some('+') | Some('-'));
        let debut_exp = if signe { i + 2 } else { i + 1 };
        if chiffre_a(debut_exp) {
            i = debut_exp;
            while chiffre_a(i) {
                i += 1;
            }
        }
    }

    let texte: String = chars[start..i].iter().collect();
    let v = texte
        .parse::<f64>()
        .map_err(|_| ErreurCalc::ExpressionInvalide)?;
    Ok((v, i))
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Pi => "π".to_string(),
            Tok::E => "e".to_string(),

            Tok::Sqrt => "√".to_string(),
            Tok::Carre => "²".to_string(),
            Tok::Cube => "³".to_string(),
            Tok::Factorielle => "!".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
