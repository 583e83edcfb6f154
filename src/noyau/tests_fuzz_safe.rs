//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - oracle : chaque expression générée porte sa valeur attendue, calculée en f64
//!   dans le même ordre d’opérations (égalité EXACTE attendue)
//! - invariant clé : jamais de panique, jamais de NaN/∞ dans un Ok

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::eval::eval_expression;
use super::session::Session;

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

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

/// (texte, valeur attendue) ; None si l’expression doit être refusée (NaN/∞).
type Gen = (String, Option<f64>);

fn fini(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

fn gen_atom(rng: &mut Rng) -> Gen {
    match rng.pick(6) {
        0 => ("π".to_string(), Some(std::f64::consts::PI)),
        1 => ("e".to_string(), Some(std::f64::consts::E)),
        2 => {
            // décimal simple
            let a = rng.pick(100);
            let b = rng.pick(10);
            let s = format!("{a}.{b}");
            let v = s.parse::<f64>().ok();
            (s, v)
        }
        _ => {
            // entier, incluant 0 (utile pour provoquer des divisions par zéro)
            let a = rng.pick(13);
            (format!("{a}"), Some(f64::from(a)))
        }
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> Gen {
    if depth == 0 {
        return gen_atom(rng);
    }

    let bin = |rng: &mut Rng, op: char, f: fn(f64, f64) -> f64| -> Gen {
        let (sa, va) = gen_expr(rng, depth - 1);
        let (sb, vb) = gen_expr(rng, depth - 1);
        let v = match (va, vb) {
            (Some(a), Some(b)) => fini(f(a, b)),
            _ => None,
        };
        (format!("({sa}{op}{sb})"), v)
    };

    match rng.pick(9) {
        0 => gen_atom(rng),
        1 => bin(rng, '+', |a, b| a + b),
        2 => bin(rng, '-', |a, b| a - b),
        3 => bin(rng, '*', |a, b| a * b),
        4 => bin(rng, '/', |a, b| a / b),
        5 => {
            let (s, v) = gen_expr(rng, depth - 1);
            (format!("√({s})"), v.and_then(|x| fini(x.sqrt())))
        }
        6 => {
            let (s, v) = gen_expr(rng, depth - 1);
            if rng.coin() {
                (format!("({s})x²"), v.and_then(|x| fini(x.powf(2.0))))
            } else {
                (format!("({s})x³"), v.and_then(|x| fini(x.powf(3.0))))
            }
        }
        7 => {
            let (s, v) = gen_expr(rng, depth - 1);
            (format!("-({s})"), v.map(|x| -x))
        }
        _ => {
            // puissance bornée : petit exposant entier
            let (s, v) = gen_expr(rng, depth - 1);
            let n = rng.pick(4);
            (
                format!("({s})^{n}"),
                v.and_then(|x| fini(x.powf(f64::from(n)))),
            )
        }
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_oracle_exact() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let (expr, attendu) = gen_expr(&mut rng, 4);

        match (eval_expression(&expr), attendu) {
            (Ok(v), Some(a)) => {
                assert_eq!(v.to_bits(), a.to_bits(), "expr={expr:?} v={v} attendu={a}");
                seen_ok += 1;
            }
            (Err(ErreurCalc::ExpressionInvalide), None) => seen_err += 1,
            (obtenu, attendu) => {
                panic!("expr={expr:?} obtenu={obtenu:?} attendu={attendu:?}")
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // alphabet complet du clavier + quelques intrus
    let alphabet: Vec<char> = "0123456789.+-*/^()!πe√²³x sqrtpi$#".chars().collect();
    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let len = 1 + rng.pick(12) as usize;
        let s: String = (0..len)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        // 1) déterministe
        let r1 = eval_expression(&s);
        let r2 = eval_expression(&s);
        assert_eq!(r1.map(f64::to_bits), r2.map(f64::to_bits), "s={s:?}");

        // 2) un Ok est toujours fini
        if let Ok(v) = r1 {
            assert!(v.is_finite(), "s={s:?} v={v}");
        }
    }
}

#[test]
fn fuzz_safe_session_touches_aleatoires() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let touches = [
        "1", "2", "3", "7", "0", ".", "+", "-", "*", "/", "(", ")", "x²", "√", "π", "!",
    ];
    let mut rng = Rng::new(0x5EED_u64);
    let mut s = Session::default();
    let mut evaluations = 0usize;

    for _ in 0..400 {
        budget(t0, max);

        match rng.pick(10) {
            0 => {
                let avant = s.historique().len();
                match s.evaluer() {
                    Some(Ok(_)) => assert_eq!(s.historique().len(), avant + 1),
                    _ => assert_eq!(s.historique().len(), avant),
                }
                evaluations += 1;
            }
            1 => s.retour_arriere(),
            _ => s.saisir(touches[rng.pick(touches.len() as u32) as usize]),
        }

        // l’écran n’est jamais vide
        assert!(!s.affichage().is_empty());
    }

    assert!(evaluations > 10);
}
