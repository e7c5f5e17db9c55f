//! Tokenizer for the restricted trigger grammar.

use super::parser::ParseError;

/// Tokens the restricted grammar recognizes.
///
/// `and`/`or`/`not` are keywords, not identifiers, so they can never be
/// shadowed by catalog-authored variable names.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    LParen,
    RParen,
    And,
    Or,
    Not,
}

/// Tokenize a trigger expression.
///
/// Any character outside the grammar (`.` for attribute access, `,` for
/// argument lists, a lone `=` for assignment, ...) is rejected here, which
/// keeps the parser free of escape hatches.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '<' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Le);
                } else {
                    tokens.push(Token::Lt);
                }
            }
            '>' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Ge);
                } else {
                    tokens.push(Token::Gt);
                }
            }
            '=' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Eq);
                } else {
                    // a single '=' is assignment, which the grammar forbids
                    return Err(ParseError::Assignment);
                }
            }
            '!' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Ne);
                } else {
                    return Err(ParseError::DisallowedCharacter('!'));
                }
            }
            c if c.is_ascii_digit() => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: f64 = literal
                    .parse()
                    .map_err(|_| ParseError::InvalidNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_alphanumeric() || d == '_' {
                        ident.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(match ident.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    _ => Token::Ident(ident),
                });
            }
            other => return Err(ParseError::DisallowedCharacter(other)),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_comparison() {
        let tokens = tokenize("hunger <= 200").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("hunger".into()),
                Token::Le,
                Token::Number(200.0)
            ]
        );
    }

    #[test]
    fn keywords_are_not_identifiers() {
        let tokens = tokenize("not a and b or c").unwrap();
        assert_eq!(tokens[0], Token::Not);
        assert_eq!(tokens[2], Token::And);
        assert_eq!(tokens[4], Token::Or);
    }

    #[test]
    fn rejects_assignment() {
        assert_eq!(tokenize("hunger = 200"), Err(ParseError::Assignment));
    }

    #[test]
    fn rejects_attribute_access_and_calls_characters() {
        assert_eq!(
            tokenize("state.hunger"),
            Err(ParseError::DisallowedCharacter('.'))
        );
        assert_eq!(
            tokenize("f(a, b)"),
            Err(ParseError::DisallowedCharacter(','))
        );
    }

    #[test]
    fn parses_decimal_literals() {
        let tokens = tokenize("0.5").unwrap();
        assert_eq!(tokens, vec![Token::Number(0.5)]);
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!(matches!(
            tokenize("1.2.3"),
            Err(ParseError::InvalidNumber(_))
        ));
    }
}
