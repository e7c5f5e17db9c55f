//! Recursive-descent parser producing the typed expression tree.
//!
//! Precedence, loosest first: `or`, `and`, `not`, comparison chains,
//! primary (number / variable / parenthesized). Comparison chains are kept
//! flat so `a <= x <= b` stays one node with three operands.

use super::lexer::{Token, tokenize};
use super::{CmpOp, Expr};

/// Rejection reasons for catalog-authored expressions.
///
/// These surface at catalog load time; a definition whose trigger fails to
/// parse is excluded with a diagnostic rather than crashing the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("character {0:?} is not part of the trigger grammar")]
    DisallowedCharacter(char),
    #[error("assignment is not permitted in trigger expressions")]
    Assignment,
    #[error("function calls are not permitted in trigger expressions ({name})")]
    FunctionCall { name: String },
    #[error("malformed numeric literal {0:?}")]
    InvalidNumber(String),
    #[error("expression ended unexpectedly")]
    UnexpectedEnd,
    #[error("unexpected token at position {position}")]
    UnexpectedToken { position: usize },
    #[error("trailing input after expression")]
    TrailingInput,
    #[error("expression is empty")]
    Empty,
}

/// Parse a trigger expression string into an [`Expr`] tree.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.or_expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(ParseError::TrailingInput);
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut operands = vec![self.and_expr()?];
        while self.peek() == Some(&Token::Or) {
            self.advance();
            operands.push(self.and_expr()?);
        }
        Ok(if operands.len() == 1 {
            operands.swap_remove(0)
        } else {
            Expr::Or(operands)
        })
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut operands = vec![self.not_expr()?];
        while self.peek() == Some(&Token::And) {
            self.advance();
            operands.push(self.not_expr()?);
        }
        Ok(if operands.len() == 1 {
            operands.swap_remove(0)
        } else {
            Expr::And(operands)
        })
    }

    fn not_expr(&mut self) -> Result<Expr, ParseError> {
        if self.peek() == Some(&Token::Not) {
            self.advance();
            return Ok(Expr::Not(Box::new(self.not_expr()?)));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let first = self.primary()?;
        let mut operands = vec![first];
        let mut ops = Vec::new();

        while let Some(op) = self.peek_cmp_op() {
            self.advance();
            ops.push(op);
            operands.push(self.primary()?);
        }

        Ok(if ops.is_empty() {
            operands.swap_remove(0)
        } else {
            Expr::Comparison { operands, ops }
        })
    }

    fn peek_cmp_op(&self) -> Option<CmpOp> {
        match self.peek()? {
            Token::Lt => Some(CmpOp::Lt),
            Token::Le => Some(CmpOp::Le),
            Token::Gt => Some(CmpOp::Gt),
            Token::Ge => Some(CmpOp::Ge),
            Token::Eq => Some(CmpOp::Eq),
            Token::Ne => Some(CmpOp::Ne),
            _ => None,
        }
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Ident(name)) => {
                // an identifier followed by '(' is a call site
                if self.peek() == Some(&Token::LParen) {
                    return Err(ParseError::FunctionCall { name });
                }
                Ok(Expr::Variable(name))
            }
            Some(Token::LParen) => {
                let inner = self.or_expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    Some(_) => Err(ParseError::UnexpectedToken { position: self.pos - 1 }),
                    None => Err(ParseError::UnexpectedEnd),
                }
            }
            Some(_) => Err(ParseError::UnexpectedToken { position: self.pos - 1 }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_comparison() {
        let expr = parse_expression("hunger <= 200").unwrap();
        assert_eq!(
            expr,
            Expr::Comparison {
                operands: vec![
                    Expr::Variable("hunger".into()),
                    Expr::Number(200.0)
                ],
                ops: vec![CmpOp::Le],
            }
        );
    }

    #[test]
    fn parses_chained_comparison_flat() {
        let expr = parse_expression("100 <= body_temperature <= 300").unwrap();
        match expr {
            Expr::Comparison { operands, ops } => {
                assert_eq!(operands.len(), 3);
                assert_eq!(ops, vec![CmpOp::Le, CmpOp::Le]);
            }
            other => panic!("expected comparison chain, got {other:?}"),
        }
    }

    #[test]
    fn boolean_operators_collect_arbitrary_arity() {
        let expr = parse_expression("a or b or c or d").unwrap();
        match expr {
            Expr::Or(operands) => assert_eq!(operands.len(), 4),
            other => panic!("expected or, got {other:?}"),
        }
    }

    #[test]
    fn precedence_binds_and_tighter_than_or() {
        let expr = parse_expression("a or b and c").unwrap();
        match expr {
            Expr::Or(operands) => {
                assert_eq!(operands[0], Expr::Variable("a".into()));
                assert!(matches!(operands[1], Expr::And(_)));
            }
            other => panic!("expected or at the top, got {other:?}"),
        }
    }

    #[test]
    fn parses_not_and_parentheses() {
        let expr = parse_expression("not (a or b)").unwrap();
        assert!(matches!(expr, Expr::Not(_)));
    }

    #[test]
    fn rejects_function_calls() {
        assert_eq!(
            parse_expression("exec(1)"),
            Err(ParseError::FunctionCall { name: "exec".into() })
        );
    }

    #[test]
    fn rejects_empty_and_trailing_input() {
        assert_eq!(parse_expression("   "), Err(ParseError::Empty));
        assert_eq!(
            parse_expression("hunger <= 200 300"),
            Err(ParseError::TrailingInput)
        );
    }

    #[test]
    fn rejects_dangling_operator() {
        assert_eq!(
            parse_expression("hunger <="),
            Err(ParseError::UnexpectedEnd)
        );
    }
}
