// src/noyau/calcul.rs
//
// Parcours récursif de l’AST en f64 (IEEE-754).
// - division par zéro : ±Infinity (valeur, pas une erreur)
// - NaN : refusé dès qu’il apparaît, avec le nom de l’opération fautive

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use super::contexte::EvalContext;
use super::erreurs::EvalError;
use super::expr::{BinOp, Expr, UnOp};

/// Au-delà, n! dépasse f64::MAX.
const FACT_MAX: u32 = 170;

/// Évalue l’arbre. Infinity passe ; NaN devient `EvalError::Domain`.
pub fn evaluate(expr: &Expr, ctx: &EvalContext) -> Result<f64, EvalError> {
    match expr {
        Expr::Num(n) => Ok(*n),

        Expr::Const(name) => ctx
            .constante(name)
            .ok_or_else(|| EvalError::UnknownConstant(name.clone())),

        Expr::Unary(op, x) => {
            let v = evaluate(x, ctx)?;
            let r = match op {
                UnOp::Neg => -v,
                UnOp::Plus => v,
                UnOp::Percent => v / 100.0,
            };
            verifie(r, op.symbole())
        }

        Expr::Binary(op, a, b) => {
            let x = evaluate(a, ctx)?;
            let y = evaluate(b, ctx)?;
            let r = match op {
                BinOp::Add => x + y,
                BinOp::Sub => x - y,
                BinOp::Mul => x * y,
                BinOp::Div => x / y,
                BinOp::Pow => x.powf(y),
            };
            verifie(r, op.symbole())
        }

        Expr::Call(name, x) => {
            let f = ctx
                .fonction(name)
                .ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;
            let v = evaluate(x, ctx)?;
            verifie(f(v), name)
        }
    }
}

fn verifie(r: f64, op: &str) -> Result<f64, EvalError> {
    if r.is_nan() {
        return Err(EvalError::Domain { op: op.to_string() });
    }
    Ok(r)
}

/// n! pour n entier >= 0.
/// - négatif ou non entier : NaN (pas de troncature silencieuse)
/// - n > 170 : +Infinity
/// - sinon : produit exact (big int) puis conversion arrondie en f64
pub fn factorielle(n: f64) -> f64 {
    if n.is_nan() || n < 0.0 {
        return f64::NAN;
    }
    if n.is_infinite() {
        return f64::INFINITY;
    }
    if n.fract() != 0.0 {
        return f64::NAN;
    }
    if n > f64::from(FACT_MAX) {
        return f64::INFINITY;
    }

    // 0 <= n <= 170, entier : la conversion est exacte
    let n = n as u32;
    let mut acc = BigUint::one();
    for k in 2..=n {
        acc *= k;
    }
    acc.to_f64().unwrap_or(f64::INFINITY)
}
