//! Regular expressions over token sequences
//!
//! A pattern is a sequence of `<logic>` elements with the quantifiers `*`,
//! `+` and `?`, alternation `|`, capturing groups `( … )`, non-capturing
//! groups `(?: … )` and named groups `(<name>: … )`. Matching is greedy
//! with backtracking; `find_all` yields leftmost, non-overlapping,
//! non-empty matches.

use super::{AtomFactory, PatternError};
use crate::pattern::logic::LogicExpr;
use std::fmt;

/// A compiled token-sequence pattern.
pub struct TokenRegex<T> {
    source: String,
    alts: Vec<Vec<Node<T>>>,
    captures: usize,
    names: Vec<Option<String>>,
}

enum Node<T> {
    Token(LogicExpr<T>),
    Group {
        index: Option<usize>,
        alts: Vec<Vec<Node<T>>>,
    },
    Star(Box<Node<T>>),
    Plus(Box<Node<T>>),
    Opt(Box<Node<T>>),
}

/// One match over a token sequence. Group 0 is the whole match; capturing
/// groups are numbered from 1 in order of their opening parenthesis. All
/// ranges are half-open token index ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatch {
    start: usize,
    end: usize,
    groups: Vec<Option<(usize, usize)>>,
}

impl TokenMatch {
    /// The whole-match token range.
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Number of capturing groups (not counting the whole match).
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Token range of group `index`; 0 is the whole match. `None` for a
    /// capturing group that did not participate in the match.
    pub fn group(&self, index: usize) -> Option<(usize, usize)> {
        if index == 0 {
            Some((self.start, self.end))
        } else {
            self.groups.get(index - 1).copied().flatten()
        }
    }
}

impl<T> TokenRegex<T> {
    /// Compile a pattern, resolving each `<…>` element's atoms through
    /// `factory`.
    pub fn compile(pattern: &str, factory: &AtomFactory<'_, T>) -> Result<Self, PatternError> {
        Parser::new(pattern, factory).parse()
    }

    /// The pattern text this regex was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of capturing groups in the pattern.
    pub fn capture_count(&self) -> usize {
        self.captures
    }

    /// Capture index of the group with the given name, if any.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .position(|n| n.as_deref() == Some(name))
            .map(|i| i + 1)
    }

    /// Leftmost, non-overlapping, non-empty matches across `tokens`.
    pub fn find_all(&self, tokens: &[T]) -> Vec<TokenMatch> {
        let mut matches = Vec::new();
        let mut pos = 0;
        while pos <= tokens.len() {
            match self.match_at(tokens, pos) {
                Some(m) if m.end > m.start => {
                    pos = m.end;
                    matches.push(m);
                }
                _ => pos += 1,
            }
        }
        matches
    }

    /// Try to match anchored at `start`.
    fn match_at(&self, tokens: &[T], start: usize) -> Option<TokenMatch> {
        for alt in &self.alts {
            let mut caps = vec![None; self.captures];
            if let Some(end) = run(alt, &Cont::Done, tokens, start, &mut caps) {
                return Some(TokenMatch {
                    start,
                    end,
                    groups: caps,
                });
            }
        }
        None
    }
}

impl<T> fmt::Debug for TokenRegex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRegex")
            .field("source", &self.source)
            .field("captures", &self.captures)
            .finish()
    }
}

/// What remains to be matched after the current node list: the classic
/// continuation representation that lets groups and quantifiers backtrack
/// without materializing the whole search frontier.
enum Cont<'a, T> {
    Done,
    Seq {
        nodes: &'a [Node<T>],
        next: &'a Cont<'a, T>,
    },
    Close {
        index: Option<usize>,
        start: usize,
        nodes: &'a [Node<T>],
        next: &'a Cont<'a, T>,
    },
    Star {
        inner: &'a Node<T>,
        entry: usize,
        nodes: &'a [Node<T>],
        next: &'a Cont<'a, T>,
    },
}

type Caps = Vec<Option<(usize, usize)>>;

fn run<T>(
    nodes: &[Node<T>],
    cont: &Cont<'_, T>,
    tokens: &[T],
    pos: usize,
    caps: &mut Caps,
) -> Option<usize> {
    let Some((node, rest)) = nodes.split_first() else {
        return run_cont(cont, tokens, pos, caps);
    };

    match node {
        Node::Token(logic) => {
            if pos < tokens.len() && logic.eval(&tokens[pos]) {
                run(rest, cont, tokens, pos + 1, caps)
            } else {
                None
            }
        }
        Node::Group { index, alts } => {
            for alt in alts {
                let snapshot = caps.clone();
                let close = Cont::Close {
                    index: *index,
                    start: pos,
                    nodes: rest,
                    next: cont,
                };
                if let Some(end) = run(alt, &close, tokens, pos, caps) {
                    return Some(end);
                }
                *caps = snapshot;
            }
            None
        }
        Node::Opt(inner) => {
            let snapshot = caps.clone();
            let then = Cont::Seq {
                nodes: rest,
                next: cont,
            };
            if let Some(end) = run(std::slice::from_ref(inner.as_ref()), &then, tokens, pos, caps) {
                return Some(end);
            }
            *caps = snapshot;
            run(rest, cont, tokens, pos, caps)
        }
        Node::Star(inner) => {
            let snapshot = caps.clone();
            let again = Cont::Star {
                inner: inner.as_ref(),
                entry: pos,
                nodes: rest,
                next: cont,
            };
            if let Some(end) = run(std::slice::from_ref(inner.as_ref()), &again, tokens, pos, caps)
            {
                return Some(end);
            }
            *caps = snapshot;
            run(rest, cont, tokens, pos, caps)
        }
        Node::Plus(inner) => {
            let again = Cont::Star {
                inner: inner.as_ref(),
                entry: pos,
                nodes: rest,
                next: cont,
            };
            run(std::slice::from_ref(inner.as_ref()), &again, tokens, pos, caps)
        }
    }
}

fn run_cont<T>(cont: &Cont<'_, T>, tokens: &[T], pos: usize, caps: &mut Caps) -> Option<usize> {
    match cont {
        Cont::Done => Some(pos),
        Cont::Seq { nodes, next } => run(nodes, next, tokens, pos, caps),
        Cont::Close {
            index,
            start,
            nodes,
            next,
        } => {
            if let Some(i) = index {
                caps[*i] = Some((*start, pos));
            }
            run(nodes, next, tokens, pos, caps)
        }
        Cont::Star {
            inner,
            entry,
            nodes,
            next,
        } => {
            // greedy: another iteration first, but only if the previous one
            // consumed input, otherwise a nullable body would loop forever
            if pos > *entry {
                let snapshot = caps.clone();
                let again = Cont::Star {
                    inner: *inner,
                    entry: pos,
                    nodes,
                    next,
                };
                if let Some(end) = run(std::slice::from_ref(*inner), &again, tokens, pos, caps) {
                    return Some(end);
                }
                *caps = snapshot;
            }
            run(nodes, next, tokens, pos, caps)
        }
    }
}

/// Pattern-level lexemes.
#[derive(Debug)]
enum Lexeme {
    Atom(String),
    OpenCapture,
    OpenNamed(String),
    OpenPlain,
    Close,
    Pipe,
    Star,
    Plus,
    Opt,
}

struct Parser<'f, 'p, T> {
    pattern: &'p str,
    factory: &'f AtomFactory<'f, T>,
}

struct Frame<T> {
    index: Option<usize>,
    alts: Vec<Vec<Node<T>>>,
    cur: Vec<Node<T>>,
}

impl<'f, 'p, T> Parser<'f, 'p, T> {
    fn new(pattern: &'p str, factory: &'f AtomFactory<'f, T>) -> Self {
        Self { pattern, factory }
    }

    fn parse(self) -> Result<TokenRegex<T>, PatternError> {
        let lexemes = lex(self.pattern)?;

        let mut captures = 0usize;
        let mut names: Vec<Option<String>> = Vec::new();
        let mut stack: Vec<Frame<T>> = vec![Frame {
            index: None,
            alts: Vec::new(),
            cur: Vec::new(),
        }];

        for lexeme in lexemes {
            match lexeme {
                Lexeme::Atom(text) => {
                    let logic = LogicExpr::compile(&text, self.factory)?;
                    let frame = stack.last_mut().expect("frame stack is never empty");
                    frame.cur.push(Node::Token(logic));
                }
                Lexeme::OpenCapture => {
                    names.push(None);
                    stack.push(Frame {
                        index: Some(captures),
                        alts: Vec::new(),
                        cur: Vec::new(),
                    });
                    captures += 1;
                }
                Lexeme::OpenNamed(name) => {
                    names.push(Some(name));
                    stack.push(Frame {
                        index: Some(captures),
                        alts: Vec::new(),
                        cur: Vec::new(),
                    });
                    captures += 1;
                }
                Lexeme::OpenPlain => {
                    stack.push(Frame {
                        index: None,
                        alts: Vec::new(),
                        cur: Vec::new(),
                    });
                }
                Lexeme::Close => {
                    if stack.len() == 1 {
                        return Err(PatternError::Syntax(format!(
                            "unbalanced ')' in pattern '{}'",
                            self.pattern
                        )));
                    }
                    let mut frame = stack.pop().expect("stack length checked above");
                    frame.alts.push(frame.cur);
                    let node = Node::Group {
                        index: frame.index,
                        alts: frame.alts,
                    };
                    stack
                        .last_mut()
                        .expect("frame stack is never empty")
                        .cur
                        .push(node);
                }
                Lexeme::Pipe => {
                    let frame = stack.last_mut().expect("frame stack is never empty");
                    let finished = std::mem::take(&mut frame.cur);
                    frame.alts.push(finished);
                }
                Lexeme::Star | Lexeme::Plus | Lexeme::Opt => {
                    let frame = stack.last_mut().expect("frame stack is never empty");
                    let Some(prev) = frame.cur.pop() else {
                        return Err(PatternError::Syntax(format!(
                            "quantifier with nothing to repeat in pattern '{}'",
                            self.pattern
                        )));
                    };
                    let node = match lexeme {
                        Lexeme::Star => Node::Star(Box::new(prev)),
                        Lexeme::Plus => Node::Plus(Box::new(prev)),
                        _ => Node::Opt(Box::new(prev)),
                    };
                    frame.cur.push(node);
                }
            }
        }

        if stack.len() != 1 {
            return Err(PatternError::Syntax(format!(
                "missing ')' in pattern '{}'",
                self.pattern
            )));
        }

        let mut top = stack.pop().expect("top frame remains");
        top.alts.push(top.cur);

        Ok(TokenRegex {
            source: self.pattern.to_string(),
            alts: top.alts,
            captures,
            names,
        })
    }
}

fn lex(pattern: &str) -> Result<Vec<Lexeme>, PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut lexemes = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            c if c.is_whitespace() => i += 1,
            '<' => {
                let (text, next) = scan_angle(pattern, &chars, i)?;
                lexemes.push(Lexeme::Atom(text));
                i = next;
            }
            '(' => {
                if chars.get(i + 1) == Some(&'?') && chars.get(i + 2) == Some(&':') {
                    lexemes.push(Lexeme::OpenPlain);
                    i += 3;
                } else if chars.get(i + 1) == Some(&'<') {
                    // either a named group "(<name>: …" or a capturing
                    // group that immediately contains a token element
                    match scan_group_name(&chars, i + 1) {
                        Some((name, next)) => {
                            lexemes.push(Lexeme::OpenNamed(name));
                            i = next;
                        }
                        None => {
                            lexemes.push(Lexeme::OpenCapture);
                            i += 1;
                        }
                    }
                } else {
                    lexemes.push(Lexeme::OpenCapture);
                    i += 1;
                }
            }
            ')' => {
                lexemes.push(Lexeme::Close);
                i += 1;
            }
            '|' => {
                lexemes.push(Lexeme::Pipe);
                i += 1;
            }
            '*' => {
                lexemes.push(Lexeme::Star);
                i += 1;
            }
            '+' => {
                lexemes.push(Lexeme::Plus);
                i += 1;
            }
            '?' => {
                lexemes.push(Lexeme::Opt);
                i += 1;
            }
            c => {
                return Err(PatternError::Syntax(format!(
                    "unexpected character '{c}' in pattern '{pattern}'"
                )));
            }
        }
    }

    Ok(lexemes)
}

/// Scan a `<…>` element starting at `open`; quoted sections may contain
/// `>`. Returns the inner text and the index after the closing `>`.
fn scan_angle(
    pattern: &str,
    chars: &[char],
    open: usize,
) -> Result<(String, usize), PatternError> {
    let mut quote: Option<char> = None;
    let mut i = open + 1;
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
                } else if c == '>' {
                    return Ok((chars[open + 1..i].iter().collect(), i + 1));
                }
            }
        }
        i += 1;
    }
    Err(PatternError::Syntax(format!(
        "unterminated '<' in pattern '{pattern}'"
    )))
}

/// Recognize `<name>:` at `open` (pointing at `<`), where name is a plain
/// identifier. Returns the name and the index after the `:`.
fn scan_group_name(chars: &[char], open: usize) -> Option<(String, usize)> {
    let mut i = open + 1;
    while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
        i += 1;
    }
    if i > open + 1 && chars.get(i) == Some(&'>') && chars.get(i + 1) == Some(&':') {
        Some((chars[open + 1..i].iter().collect(), i + 2))
    } else {
        None
    }
}
