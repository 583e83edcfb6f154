//! Tests scientifiques (campagne) : invariants + cohérence + limites contrôlées.
//!
//! But : vérifier le noyau de bout en bout sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - Le moins unaire lie moins fort que la puissance : -2^2 = -4.
//! - La factorielle n’existe qu’en fin de tampon, sur un littéral.
//! - Les deux chemins (évaluateur et fonctions directes) doivent donner le même nombre
//!   pour la même opération : √, x², x³, !.

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::eval::eval_expression;
use super::format::{formater_resultat, DECIMALES_EXPONENTIELLE, LONGUEUR_MAX_AFFICHAGE};
use super::rpn::PROFONDEUR_MAX;
use super::scientifique::FonctionSci;
use super::session::Session;

fn eval_ok(expr: &str) -> f64 {
    eval_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence (comparée au calcul f64 direct) ------------------------ */

#[test]
fn sci_precedence_vs_f64() {
    let valeurs = [0.5, 1.0, 2.0, 3.25, 7.0, 10.0];

    for &a in &valeurs {
        for &b in &valeurs {
            for &c in &valeurs {
                let s = format!("{a}+{b}*{c}");
                assert_eq!(eval_ok(&s), a + b * c, "s={s:?}");

                let s = format!("{a}-{b}/{c}");
                assert_eq!(eval_ok(&s), a - b / c, "s={s:?}");

                let s = format!("({a}+{b})*{c}");
                assert_eq!(eval_ok(&s), (a + b) * c, "s={s:?}");

                let s = format!("{a}*{b}^{c}");
                assert_eq!(eval_ok(&s), a * b.powf(c), "s={s:?}");
            }
        }
    }
}

#[test]
fn sci_associativite_gauche() {
    // gauche pour - et /, droite pour ^
    assert_eq!(eval_ok("100-10-1"), 89.0);
    assert_eq!(eval_ok("64/8/2"), 4.0);
    assert_eq!(eval_ok("2^3^2"), 512.0);
}

#[test]
fn sci_parentheses_neutres() {
    for s in ["7", "2+3*4", "√16-1", "2x³", "-(4)"] {
        assert_eq!(eval_ok(s), eval_ok(&format!("({s})")), "s={s:?}");
        assert_eq!(eval_ok(s), eval_ok(&format!("((({s})))")), "s={s:?}");
    }
}

/* ------------------------ Cohérence évaluateur / fonctions directes ------------------------ */

#[test]
fn sci_coherence_chemins() {
    for n in [0u32, 1, 2, 3, 4, 9, 16, 25, 12] {
        let x = f64::from(n);

        assert_eq!(
            eval_ok(&format!("√{n}")),
            FonctionSci::Racine.appliquer(x).unwrap()
        );
        assert_eq!(
            eval_ok(&format!("{n}x²")),
            FonctionSci::Carre.appliquer(x).unwrap()
        );
        assert_eq!(
            eval_ok(&format!("{n}x³")),
            FonctionSci::Cube.appliquer(x).unwrap()
        );
        assert_eq!(
            eval_ok(&format!("{n}!")),
            FonctionSci::Factorielle.appliquer(x).unwrap()
        );
    }
}

#[test]
fn sci_factorielle_table_exacte() {
    // jusqu’à 20!, le produit tient exactement dans u64 ET dans f64 (≤ 2^53 · puissance de 2)
    let mut attendu: u64 = 1;
    for n in 0u64..=20 {
        if n > 0 {
            attendu *= n;
        }
        assert_eq!(eval_ok(&format!("{n}!")), attendu as f64, "n={n}");
    }
}

#[test]
fn sci_session_determinisme() {
    // même tampon => même résultat, quel que soit l’historique de la session
    let mut s1 = Session::default();
    let mut s2 = Session::default();

    for t in ["9", "*", "9"] {
        s2.saisir(t);
    }
    s2.evaluer();
    s2.effacer();

    for s in [&mut s1, &mut s2] {
        for t in ["1", "2", "/", "8", "+", "√", "4"] {
            s.saisir(t);
        }
    }
    assert_eq!(s1.evaluer(), s2.evaluer());
    assert_eq!(s1.affichage(), "3.5");
}

/* ------------------------ Format d’affichage ------------------------ */

#[test]
fn sci_format_invariant_longueur() {
    // tout affichage de résultat : ≤ 15 caractères, OU exponentielle à 8 décimales
    let exprs = [
        "1/3",
        "2/3",
        "10^15",
        "10^16",
        "10^-7",
        "123456789*987654321",
        "0-1/7",
        "π*1000",
        "170!",
        "2^0.5",
    ];

    for s in exprs {
        let txt = formater_resultat(eval_ok(s));
        if txt.chars().count() > LONGUEUR_MAX_AFFICHAGE {
            let (mantisse, exp) = txt
                .split_once('e')
                .unwrap_or_else(|| panic!("s={s:?} txt={txt:?}"));
            let (_, decimales) = mantisse.split_once('.').unwrap();
            assert_eq!(decimales.len(), DECIMALES_EXPONENTIELLE, "txt={txt:?}");
            assert!(exp.starts_with('+') || exp.starts_with('-'), "txt={txt:?}");
        }
    }
}

/* ------------------------ Erreurs structurelles ------------------------ */

#[test]
fn sci_non_fini_toujours_refuse() {
    for s in ["1/0", "0-1/0", "0/0", "0^-2", "√(0-1)", "10^400", "(10^200)*(10^200)"] {
        assert_eq!(
            eval_expression(s),
            Err(ErreurCalc::ExpressionInvalide),
            "s={s:?}"
        );
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_parentheses_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // Profondeur modérée, sous PROFONDEUR_MAX.
    let mut expr = "1".to_string();
    for _ in 0..150 {
        expr = format!("({expr}+1)");
        budget(t0, max);
    }

    assert_eq!(eval_ok(&expr), 151.0);
}

#[test]
fn sci_stress_taille_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // Somme plate : l’arbre penche à gauche (profondeur = nombre de termes), on borne à 400.
    let mut expr = String::new();
    for k in 0..400 {
        if k > 0 {
            expr.push('+');
        }
        expr.push_str("0.5");
        budget(t0, max);
    }

    assert_eq!(eval_ok(&expr), 200.0);
}

#[test]
fn sci_stress_au_dela_profondeur_max() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // somme plate de PROFONDEUR_MAX + 1 termes : arbre trop profond, refus sans panique
    let expr = vec!["1"; PROFONDEUR_MAX + 1].join("+");
    assert_eq!(eval_expression(&expr), Err(ErreurCalc::ExpressionInvalide));

    // imbrication de racines au-delà de la borne
    let expr = format!("{}(16)", "√".repeat(PROFONDEUR_MAX + 1));
    assert_eq!(eval_expression(&expr), Err(ErreurCalc::ExpressionInvalide));
    budget(t0, max);
}

#[test]
fn sci_stress_factorielle_grande_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // n énorme : la boucle doit s’arrêter dès le débordement
    assert_eq!(
        eval_expression("99999999999!"),
        Err(ErreurCalc::ExpressionInvalide)
    );
    budget(t0, max);
}
