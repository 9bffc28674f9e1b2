// src/noyau/lecture.rs
//
// Lecture décimale EXACTE d’un f64 (arrondi à n décimales).
// Un f64 fini est un rationnel exact : on arrondit sur cette valeur exacte,
// pas sur son écriture décimale déjà approchée.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: u32) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;
    let signe = if neg { "-" } else { "" };

    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits as usize {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// x -> entier “scalé” = round(|x| * 10^digits), signe réappliqué.
/// Égalité exacte à mi-chemin : on s’éloigne de zéro.
/// None si x n’est pas fini.
pub fn arrondi_scaled(x: f64, digits: u32) -> Option<BigInt> {
    let r = BigRational::from_float(x)?;
    let neg = r.is_negative();
    let a = r.abs() * BigRational::from_integer(pow10(digits));

    // floor(a + 1/2) (a >= 0)
    let demi = BigRational::new(BigInt::from(1), BigInt::from(2));
    let n = (a + demi).floor().to_integer();

    if neg && !n.is_zero() {
        Some(-n)
    } else {
        Some(n)
    }
}

/// Équivalent de "toFixed" : texte à exactement `digits` décimales.
pub fn arrondi_fixe(x: f64, digits: u32) -> Option<String> {
    arrondi_scaled(x, digits).map(|n| scaled_to_decimal(n, digits))
}
