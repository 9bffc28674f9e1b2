// src/noyau/expr.rs
//
// AST flottant (f64).
// - Num   : littéral
// - Const : constante nommée (PI, E), résolue par le contexte
// - Unary / Binary : opérateurs
// - Call  : fonction unaire (sin, sqrt, fact…)
//
// Arbre strict : chaque noeud possède ses enfants (Box), pas de partage.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Plus,
    Percent, // x% = x/100
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub fn symbole(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "**",
        }
    }
}

impl UnOp {
    pub fn symbole(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Plus => "+",
            UnOp::Percent => "%",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(f64),
    Const(String),
    Unary(UnOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Call(String, Box<Expr>),
}

impl Expr {
    pub fn unary(op: UnOp, x: Expr) -> Expr {
        Expr::Unary(op, Box::new(x))
    }

    pub fn binary(op: BinOp, a: Expr, b: Expr) -> Expr {
        Expr::Binary(op, Box::new(a), Box::new(b))
    }

    pub fn call(name: impl Into<String>, x: Expr) -> Expr {
        Expr::Call(name.into(), Box::new(x))
    }

    /// Nombre de noeuds (démarche / tests).
    pub fn taille(&self) -> usize {
        match self {
            Expr::Num(_) | Expr::Const(_) => 1,
            Expr::Unary(_, x) | Expr::Call(_, x) => 1 + x.taille(),
            Expr::Binary(_, a, b) => 1 + a.taille() + b.taille(),
        }
    }
}

/// Affichage entièrement parenthésé : montre la structure réellement lue
/// (utile pour vérifier les précédences dans la démarche).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{n}"),
            Expr::Const(name) => write!(f, "{name}"),
            Expr::Unary(UnOp::Percent, x) => write!(f, "({x})%"),
            Expr::Unary(op, x) => write!(f, "{}({x})", op.symbole()),
            Expr::Binary(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),
            Expr::Call(name, x) => write!(f, "{name}({x})"),
        }
    }
}
