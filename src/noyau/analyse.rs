// src/noyau/analyse.rs
//
// Descente récursive (précédence explicite) : jetons -> Expr.
//
// Grammaire (du plus lâche au plus serré):
//   expression := term (('+' | '-') term)*
//   term       := unary (('*' | '/') unary)*
//   unary      := ('-' | '+') unary | power
//   power      := postfix ('**' unary)?        // associatif à droite
//   postfix    := primary '%'*
//   primary    := NUMBER | CONSTANTE | FONCTION '(' expression ')' | '(' expression ')'
//
// Choix fixés (et testés):
// - moins unaire plus lâche que ** : -2**2 = -(2**2) = -4
// - l’exposant peut être signé : 2**-1 = 0.5
// - x% = x/100, collé à son opérande : -50% = -(50%), 2**50% = 2**0.5
// - pas de multiplication implicite : "2PI" est refusé

use super::contexte::{EvalContext, Valeur};
use super::erreurs::ParseError;
use super::expr::{BinOp, Expr, UnOp};
use super::jetons::{format_tokens, Tok};

/// Garde-fou : profondeur max d’imbrication (parenthèses, unaires, puissances).
pub const PROFONDEUR_MAX: usize = 256;

static FIN: Tok = Tok::End;

/// Construit l’AST. Une entrée vide (seulement `End`) donne `Num(0)`.
pub fn parse(tokens: &[Tok], ctx: &EvalContext) -> Result<Expr, ParseError> {
    if matches!(tokens, [] | [Tok::End]) {
        return Ok(Expr::Num(0.0));
    }

    let mut p = Analyseur {
        tokens,
        pos: 0,
        profondeur: 0,
        ctx,
    };
    let e = p.expression()?;

    // jetons restants après une expression complète
    match p.peek() {
        Tok::End => Ok(e),
        Tok::RPar => Err(ParseError::UnbalancedParens),
        _ => Err(p.inattendu()),
    }
}

struct Analyseur<'a> {
    tokens: &'a [Tok],
    pos: usize,
    profondeur: usize,
    ctx: &'a EvalContext,
}

impl Analyseur<'_> {
    fn peek(&self) -> &Tok {
        self.tokens.get(self.pos).unwrap_or(&FIN)
    }

    fn avance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn inattendu(&self) -> ParseError {
        match self.peek() {
            Tok::End => ParseError::UnexpectedEnd,
            t => ParseError::UnexpectedToken {
                found: format_tokens(std::slice::from_ref(t)),
                pos: self.pos,
            },
        }
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        let mut gauche = self.term()?;
        loop {
            let op = match self.peek() {
                Tok::Plus => BinOp::Add,
                Tok::Minus => BinOp::Sub,
                _ => return Ok(gauche),
            };
            self.avance();
            let droite = self.term()?;
            gauche = Expr::binary(op, gauche, droite);
        }
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut gauche = self.unary()?;
        loop {
            let op = match self.peek() {
                Tok::Star => BinOp::Mul,
                Tok::Slash => BinOp::Div,
                _ => return Ok(gauche),
            };
            self.avance();
            let droite = self.unary()?;
            gauche = Expr::binary(op, gauche, droite);
        }
    }

    // Toute récursion passe par ici ; les chaînes de '%' comptent aussi (postfix).
    fn unary(&mut self) -> Result<Expr, ParseError> {
        self.profondeur += 1;
        if self.profondeur > PROFONDEUR_MAX {
            return Err(ParseError::TooDeep(PROFONDEUR_MAX));
        }
        let r = self.unary_sans_garde();
        self.profondeur -= 1;
        r
    }

    fn unary_sans_garde(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek() {
            Tok::Minus => UnOp::Neg,
            Tok::Plus => UnOp::Plus,
            _ => return self.power(),
        };
        self.avance();
        let x = self.unary()?;
        Ok(Expr::unary(op, x))
    }

    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.postfix()?;
        if matches!(self.peek(), Tok::StarStar) {
            self.avance();
            // récursion à droite : 2**3**2 = 2**(3**2)
            let exposant = self.unary()?;
            return Ok(Expr::binary(BinOp::Pow, base, exposant));
        }
        Ok(base)
    }

    // Chaque '%' ajoute un niveau à l’arbre : même garde-fou que unary.
    fn postfix(&mut self) -> Result<Expr, ParseError> {
        let mut e = self.primary()?;
        let base = self.profondeur;
        while matches!(self.peek(), Tok::Percent) {
            self.profondeur += 1;
            if self.profondeur > PROFONDEUR_MAX {
                return Err(ParseError::TooDeep(PROFONDEUR_MAX));
            }
            self.avance();
            e = Expr::unary(UnOp::Percent, e);
        }
        self.profondeur = base;
        Ok(e)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Tok::Num(n) => {
                let n = *n;
                self.avance();
                Ok(Expr::Num(n))
            }

            Tok::Ident(name) => {
                let name = name.clone();
                match self.ctx.get(&name) {
                    Some(Valeur::Constante(_)) => {
                        self.avance();
                        Ok(Expr::Const(name))
                    }
                    Some(Valeur::Fonction(_)) => {
                        self.avance();
                        if !matches!(self.peek(), Tok::LPar) {
                            return Err(ParseError::ExpectedOpenParen(name));
                        }
                        let arg = self.parenthese()?;
                        Ok(Expr::call(name, arg))
                    }
                    None => Err(ParseError::UnknownIdentifier(name)),
                }
            }

            Tok::LPar => self.parenthese(),

            _ => Err(self.inattendu()),
        }
    }

    /// '(' expression ')' ; le jeton courant est '('.
    fn parenthese(&mut self) -> Result<Expr, ParseError> {
        self.avance();
        if matches!(self.peek(), Tok::RPar) {
            return Err(ParseError::EmptyParens);
        }

        let e = self.expression()?;

        match self.peek() {
            Tok::RPar => {
                self.avance();
                Ok(e)
            }
            Tok::End => Err(ParseError::UnbalancedParens),
            _ => Err(self.inattendu()),
        }
    }
}
