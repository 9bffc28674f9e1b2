//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes importantes (aligné avec l’état actuel du noyau) :
//! - trig en radians seulement : les degrés passent par "* PI / 180".
//! - le bruit flottant sous 1e-10 est affiché "0" (sin(π), 0.1+0.2-0.3).
//! - imbrication bornée (PROFONDEUR_MAX) et entrée bornée (LONGUEUR_MAX) :
//!   au-delà, "Error" plutôt qu’un débordement de pile.

use std::thread;
use std::time::{Duration, Instant};

use super::analyse::PROFONDEUR_MAX;
use super::eval::{calcule, evaluate_expression};
use super::format::format;
use super::jetons::LONGUEUR_MAX;

fn assert_affiche(expr: &str, attendu: &str) {
    assert_eq!(evaluate_expression(expr), attendu, "expr={expr:?}");
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédences (convention choisie) ------------------------ */

#[test]
fn sci_precedence_calculatrice() {
    assert_affiche("2 + 3 * 4", "14");
    assert_affiche("2 * 3 + 4 * 5", "26");
    assert_affiche("100 / 10 / 5", "2");
    assert_affiche("10 - 4 - 3", "3");
}

#[test]
fn sci_moins_unaire_contre_puissance() {
    // convention : -a**b = -(a**b)
    assert_affiche("-2 ** 2", "-4");
    assert_affiche("(-2) ** 2", "4");
    assert_affiche("-2 ** 3", "-8");
    assert_affiche("2 ** -2", "0.25");
    assert_affiche("- -2", "2");
}

#[test]
fn sci_pourcentage_postfixe() {
    // convention : x% = x/100, collé à son opérande
    assert_affiche("50%", "0.5");
    assert_affiche("200 * 10%", "20");
    assert_affiche("25% * 400", "100");
    assert_affiche("-50%", "-0.5");
    assert_affiche("100 + 10%", "100.1");
    assert_affiche("%", "Error");
}

#[test]
fn sci_parentheses_imbriquees() {
    assert_affiche("((1+2)*(3+4))", "21");
    assert_affiche("(((((7)))))", "7");
    assert_affiche("2 * (3 + (4 - (5 * (6 / 3))))", "-6");
}

/* ------------------------ Contrat degrés / radians ------------------------ */

#[test]
fn sci_table_degres() {
    assert_affiche("sin(90 * PI / 180)", "1");
    assert_affiche("sin(30 * PI / 180)", "0.5");
    assert_affiche("cos(60 * PI / 180)", "0.5");
    assert_affiche("cos(90 * PI / 180)", "0");
    assert_affiche("tan(45 * PI / 180)", "1");
    assert_affiche("sin(180 * PI / 180)", "0");
}

#[test]
fn sci_symetries_trig() {
    for a in ["0.3", "1", "2.5", "PI/7"] {
        let s = evaluate_expression(&format!("sin({a})"));
        let s_neg = evaluate_expression(&format!("-sin(-({a}))"));
        assert_eq!(s, s_neg, "sin impaire, a={a}");

        let c = evaluate_expression(&format!("cos({a})"));
        let c_neg = evaluate_expression(&format!("cos(-({a}))"));
        assert_eq!(c, c_neg, "cos paire, a={a}");

        let un = evaluate_expression(&format!("sin({a})**2 + cos({a})**2"));
        assert_eq!(un, "1", "sin²+cos², a={a}");
    }
}

/* ------------------------ Fonctions / domaines ------------------------ */

#[test]
fn sci_fonctions_reference() {
    assert_affiche("sqrt(16)", "4");
    assert_affiche("sqrt(2)", "1.41421356");
    assert_affiche("fact(5)", "120");
    assert_affiche("fact(0)", "1");
    assert_affiche("fact(20)", "2432902008176640000");
    assert_affiche("log(100)", "2");
    assert_affiche("log(0.001)", "-3");
    assert_affiche("ln(E ** 3)", "3");
    assert_affiche("abs(-7.25)", "7.25");
}

#[test]
fn sci_hors_domaine() {
    assert_affiche("sqrt(-1)", "Error");
    assert_affiche("ln(-5)", "Error");
    assert_affiche("fact(-1)", "Error");
    // non entier : NaN (pas de troncature)
    assert_affiche("fact(2.5)", "Error");
    assert_affiche("(-8) ** (1/3)", "Error");
    assert_affiche("0/0", "Error");
}

#[test]
fn sci_infinis() {
    assert_affiche("1/0", "Infinity");
    assert_affiche("-1/0", "Infinity");
    assert_affiche("log(0)", "Infinity");
    assert_affiche("fact(171)", "Infinity");
    assert_affiche("10 ** 400", "Infinity");
    // ∞ - ∞ = NaN
    assert_affiche("1/0 - 1/0", "Error");
}

/* ------------------------ Affichage canonique ------------------------ */

#[test]
fn sci_idempotence_formatage() {
    let echantillon = [
        "2/3", "1/7", "PI", "E", "sqrt(3)", "10**15/7", "-1/9", "fact(25)", "1e22/3", "0.5**20",
    ];
    for expr in echantillon {
        let s = evaluate_expression(expr);
        let relu = evaluate_expression(&s);
        assert_eq!(relu, s, "expr={expr:?}");

        let v: f64 = s.parse().unwrap_or_else(|_| panic!("pas un nombre: {s:?}"));
        assert_eq!(format(v), s, "expr={expr:?}");
    }
}

#[test]
fn sci_au_plus_huit_decimales() {
    for expr in ["0.123456789123", "1/3", "22/7", "sqrt(5)", "E ** PI"] {
        let s = evaluate_expression(expr);
        let dec = s.split_once('.').map_or(0, |(_, f)| f.len());
        assert!(dec <= 8, "expr={expr:?} s={s:?}");
        assert!(!s.ends_with('0') || !s.contains('.'), "zéros de queue: {s:?}");
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_profondeur_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let ok = format!("{}1{}", "(".repeat(PROFONDEUR_MAX - 1), ")".repeat(PROFONDEUR_MAX - 1));
    assert_affiche(&ok, "1");
    budget(t0, max);

    let trop = format!("{}1{}", "(".repeat(PROFONDEUR_MAX + 1), ")".repeat(PROFONDEUR_MAX + 1));
    assert_affiche(&trop, "Error");

    let moins = format!("{}1", "-".repeat(PROFONDEUR_MAX * 2));
    assert_affiche(&moins, "Error");
    budget(t0, max);
}

#[test]
fn sci_stress_pourcentages_en_chaine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    assert_affiche("50%%", "0.005");

    // pile d’un thread ordinaire : jamais de débordement, "Error" à la place
    let h = thread::spawn(|| {
        let chaine = format!("1{}", "%".repeat(LONGUEUR_MAX - 1));
        let trop_long = format!("1{}", "%".repeat(LONGUEUR_MAX));
        (evaluate_expression(&chaine), evaluate_expression(&trop_long))
    });
    let (chaine, trop_long) = h.join().expect("thread");
    assert_eq!(chaine, "Error");
    assert_eq!(trop_long, "Error");
    budget(t0, max);
}

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // somme à plat : gauche-associative, itérative à l’analyse
    let n = 1000;
    let expr = vec!["0.5"; n].join("+");
    assert!(expr.chars().count() <= LONGUEUR_MAX);
    assert_affiche(&expr, "500");
    budget(t0, max);

    let trop = "1+".repeat(LONGUEUR_MAX);
    assert_affiche(&trop, "Error");
    budget(t0, max);
}

/* ------------------------ Concurrence : fonction pure ------------------------ */

#[test]
fn sci_appels_concurrents() {
    let handles: Vec<_> = (0..8)
        .map(|k| {
            thread::spawn(move || {
                let mut out = Vec::new();
                for i in 0..50 {
                    out.push(evaluate_expression(&format!("{k} * {i} + sqrt(16)")));
                }
                out
            })
        })
        .collect();

    for (k, h) in handles.into_iter().enumerate() {
        let out = h.join().expect("thread");
        for (i, s) in out.iter().enumerate() {
            assert_eq!(s, &format!("{}", k * i + 4));
        }
    }
}

#[test]
fn sci_determinisme() {
    for expr in ["sin(1)", "fact(10)/7", "2**0.5", "ln(10)"] {
        assert_eq!(calcule(expr), calcule(expr));
        assert_eq!(evaluate_expression(expr), evaluate_expression(expr));
    }
}
