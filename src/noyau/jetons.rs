// src/noyau/jetons.rs

use super::erreurs::LexError;

/// Garde-fou : longueur max d’une entrée (anti-gel, pile bornée ensuite).
pub const LONGUEUR_MAX: usize = 4096;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + constantes (normalisées : minuscules, sauf PI et E)
    // NOTE: l’analyse décidera via le contexte si c’est une fonction ou une constante.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    StarStar, // ** (ou ^)
    Percent,  // postfixe : x% = x/100

    LPar,
    RPar,
    Comma,

    // Sentinelle de fin
    End,
}

/// Tokenize une chaîne en jetons (terminée par `Tok::End`).
/// Supporte:
/// - décimaux (ex: 12, 1.5, .5, 5.) + exposant optionnel (ex: 1e21, 2.5E-3)
/// - opérateurs + - * / ** % , et les glyphes × ÷ − ^
/// - parenthèses ( )
/// - π ou pi (insensible à la casse) -> Ident("PI"), e seul -> Ident("E")
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules, plus long d’abord)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, LexError> {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > LONGUEUR_MAX {
        return Err(LexError::InputTooLong {
            len: chars.len(),
            max: LONGUEUR_MAX,
        });
    }

    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Opérateurs simples + glyphes du clavier
        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Comma),
            '+' => Some(Tok::Plus),
            '-' | '−' => Some(Tok::Minus),
            '×' => Some(Tok::Star),
            '/' | '÷' => Some(Tok::Slash),
            '^' => Some(Tok::StarStar),
            '%' => Some(Tok::Percent),
            'π' => Some(Tok::Ident("PI".to_string())),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // '*' ou '**'
        if c == '*' {
            if i + 1 < chars.len() && chars[i + 1] == '*' {
                out.push(Tok::StarStar);
                i += 2;
            } else {
                out.push(Tok::Star);
                i += 1;
            }
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(normalise_ident(&word)));
            continue;
        }

        // Nombre décimal
        if c.is_ascii_digit() || c == '.' {
            let (n, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(n));
            i = fin;
            continue;
        }

        return Err(LexError::UnexpectedCharacter { ch: c, pos: i });
    }

    out.push(Tok::End);
    Ok(out)
}

/// "pi" -> "PI", "e" -> "E" (mot entier seulement), le reste en minuscules.
fn normalise_ident(word: &str) -> String {
    let w = word.to_lowercase();
    match w.as_str() {
        "pi" => "PI".to_string(),
        "e" => "E".to_string(),
        _ => w,
    }
}

/// Lit un nombre à partir de `start`. Renvoie (valeur, position après le nombre).
fn lire_nombre(chars: &[char], start: usize) -> Result<(f64, usize), LexError> {
    let mut i = start;
    let mut chiffres = 0usize;

    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
        chiffres += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
            chiffres += 1;
        }
    }

    // "." tout seul n’est pas un nombre
    if chiffres == 0 {
        return Err(LexError::InvalidNumber {
            texte: ".".to_string(),
            pos: start,
        });
    }

    // exposant : seulement si un chiffre suit (sinon 'e' redevient un identifiant)
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    let texte: String = chars[start..i].iter().collect();
    let n = texte
        .parse::<f64>()
        .map_err(|_| LexError::InvalidNumber { texte, pos: start })?;
    Ok((n, i))
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(n) => format!("{n}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::StarStar => "**".to_string(),
            Tok::Percent => "%".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Comma => ",".to_string(),

            Tok::End => continue,
        };
        out.push(s);
    }
    out.join(" ")
}
