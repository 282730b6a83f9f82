//! Logic expressions over single tokens
//!
//! Grammar, loosest binding first: `a | b`, `a & b`, `!a`, `( a )`, and
//! atoms of the form `key="value"` or `key='value'`. Atom interpretation
//! is delegated to the caller-supplied factory, so this module knows
//! nothing about token attributes.

use super::{AtomFactory, PatternError, Pred};

/// A compiled boolean expression evaluated against one token.
pub struct LogicExpr<T> {
    root: Node<T>,
}

enum Node<T> {
    Atom(Pred<T>),
    Not(Box<Node<T>>),
    And(Box<Node<T>>, Box<Node<T>>),
    Or(Box<Node<T>>, Box<Node<T>>),
}

impl<T> LogicExpr<T> {
    /// Compile `expression`, resolving each atom through `factory`.
    pub fn compile(expression: &str, factory: &AtomFactory<'_, T>) -> Result<Self, PatternError> {
        let tokens = lex(expression)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            factory,
        };
        let root = parser.or_expr()?;
        if parser.pos != parser.tokens.len() {
            return Err(PatternError::Syntax(format!(
                "unexpected trailing input in logic expression '{expression}'"
            )));
        }
        Ok(Self { root })
    }

    /// Evaluate against one token.
    pub fn eval(&self, token: &T) -> bool {
        eval(&self.root, token)
    }
}

fn eval<T>(node: &Node<T>, token: &T) -> bool {
    match node {
        Node::Atom(pred) => pred(token),
        Node::Not(inner) => !eval(inner, token),
        Node::And(a, b) => eval(a, token) && eval(b, token),
        Node::Or(a, b) => eval(a, token) || eval(b, token),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Lexeme {
    Open,
    Close,
    Not,
    And,
    Or,
    Atom(String),
}

/// Split the expression into operators and atom texts. Quoted sections
/// inside an atom may contain any character, including operators.
fn lex(input: &str) -> Result<Vec<Lexeme>, PatternError> {
    let mut lexemes = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                lexemes.push(Lexeme::Open);
                i += 1;
            }
            ')' => {
                lexemes.push(Lexeme::Close);
                i += 1;
            }
            '!' => {
                lexemes.push(Lexeme::Not);
                i += 1;
            }
            '&' => {
                lexemes.push(Lexeme::And);
                i += 1;
            }
            '|' => {
                lexemes.push(Lexeme::Or);
                i += 1;
            }
            _ => {
                let start = i;
                let mut quote: Option<char> = None;
                while i < chars.len() {
                    let c = chars[i];
                    match quote {
                        Some(q) => {
                            if c == q {
                                quote = None;
                            }
                        }
                        None => {
                            if c == '"' || c == '\'' {
                                quote = Some(c);
                            } else if matches!(c, '(' | ')' | '!' | '&' | '|') || c.is_whitespace()
                            {
                                break;
                            }
                        }
                    }
                    i += 1;
                }
                if quote.is_some() {
                    return Err(PatternError::Syntax(format!(
                        "unterminated quote in logic expression '{input}'"
                    )));
                }
                lexemes.push(Lexeme::Atom(chars[start..i].iter().collect()));
            }
        }
    }

    Ok(lexemes)
}

struct Parser<'f, T> {
    tokens: Vec<Lexeme>,
    pos: usize,
    factory: &'f AtomFactory<'f, T>,
}

impl<T> Parser<'_, T> {
    fn peek(&self) -> Option<&Lexeme> {
        self.tokens.get(self.pos)
    }

    fn or_expr(&mut self) -> Result<Node<T>, PatternError> {
        let mut node = self.and_expr()?;
        while self.peek() == Some(&Lexeme::Or) {
            self.pos += 1;
            let rhs = self.and_expr()?;
            node = Node::Or(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    fn and_expr(&mut self) -> Result<Node<T>, PatternError> {
        let mut node = self.unary()?;
        while self.peek() == Some(&Lexeme::And) {
            self.pos += 1;
            let rhs = self.unary()?;
            node = Node::And(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    fn unary(&mut self) -> Result<Node<T>, PatternError> {
        match self.peek() {
            Some(Lexeme::Not) => {
                self.pos += 1;
                Ok(Node::Not(Box::new(self.unary()?)))
            }
            Some(Lexeme::Open) => {
                self.pos += 1;
                let node = self.or_expr()?;
                if self.peek() != Some(&Lexeme::Close) {
                    return Err(PatternError::Syntax(
                        "missing ')' in logic expression".to_string(),
                    ));
                }
                self.pos += 1;
                Ok(node)
            }
            Some(Lexeme::Atom(_)) => {
                let Some(Lexeme::Atom(text)) = self.tokens.get(self.pos).cloned() else {
                    unreachable!()
                };
                self.pos += 1;
                Ok(Node::Atom((self.factory)(&text)?))
            }
            _ => Err(PatternError::Syntax(
                "expected atom, '!' or '(' in logic expression".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Atoms are bare words; the predicate tests string equality.
    fn word_factory(atom: &str) -> Result<Pred<String>, PatternError> {
        let word = atom.to_string();
        Ok(Box::new(move |t: &String| *t == word))
    }

    fn compile(expr: &str) -> LogicExpr<String> {
        LogicExpr::compile(expr, &word_factory).unwrap()
    }

    #[test]
    fn single_atom() {
        let e = compile("dog");
        assert!(e.eval(&"dog".to_string()));
        assert!(!e.eval(&"cat".to_string()));
    }

    #[test]
    fn and_or_precedence() {
        // a | b & c parses as a | (b & c); b & c is false for a single word
        let e = compile("a | b & c");
        assert!(e.eval(&"a".to_string()));
        assert!(!e.eval(&"b".to_string()));
    }

    #[test]
    fn negation_and_grouping() {
        let e = compile("!(a | b)");
        assert!(!e.eval(&"a".to_string()));
        assert!(!e.eval(&"b".to_string()));
        assert!(e.eval(&"c".to_string()));
    }

    #[test]
    fn quoted_values_hide_operators() {
        let factory = |atom: &str| -> Result<Pred<String>, PatternError> {
            let text = atom.to_string();
            Ok(Box::new(move |t: &String| text.contains(t.as_str())))
        };
        let e = LogicExpr::compile(r#"key="a|b""#, &factory).unwrap();
        // the '|' stayed inside the single atom
        assert!(e.eval(&"a|b".to_string()));
    }

    #[test]
    fn unbalanced_parenthesis_is_rejected() {
        assert!(LogicExpr::compile("(a", &word_factory).is_err());
    }

    #[test]
    fn trailing_operator_is_rejected() {
        assert!(LogicExpr::compile("a &", &word_factory).is_err());
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        assert!(LogicExpr::compile(r#"key="oops"#, &word_factory).is_err());
    }
}
