use crate::ast::{Node, NodeId, Pattern, SpecialClass, UNBOUNDED};
use crate::error::ParseError;

/// How syntax problems are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Syntax {
    /// Build a best-effort tree for any input and never fail.
    #[default]
    Permissive,
    /// Build the same tree but report the first syntax problem.
    Strict,
}

/// Lexical mode of the scanner. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Escape,
    CharacterClass,
    QuantifierBrace,
}

/// An open construct on the parent cursor.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    opened_at: usize,
}

/// Single-pass parser for regular expressions.
///
/// The pattern is scanned byte by byte, left to right. New nodes are always
/// appended to the node on top of the cursor stack; `(` and `[` push a new
/// container, `)` and `]` pop it again.
pub struct Parser<'a> {
    pattern: &'a [u8],
    pos: usize,
    mode: Mode,
    syntax: Syntax,
    tree: Pattern,
    cursor: Vec<Frame>,
    error: Option<ParseError>,
}

impl<'a> Parser<'a> {
    /// Create a permissive parser for the given pattern.
    pub fn new(pattern: &'a str) -> Self {
        let tree = Pattern::new();
        let root = Frame {
            node: tree.root(),
            opened_at: 0,
        };
        Self {
            pattern: pattern.as_bytes(),
            pos: 0,
            mode: Mode::Normal,
            syntax: Syntax::default(),
            tree,
            cursor: vec![root],
            error: None,
        }
    }

    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Parse the whole pattern.
    ///
    /// Returns `Ok(None)` for an empty pattern. Only `Syntax::Strict`
    /// produces errors.
    ///
    /// Examples:
    /// - Pattern: `a+`    → List[Literal('a'), Quantifier{1,-1}]
    /// - Pattern: `(ab)`  → List[CaptureGroup[Literal('a'), Literal('b')]]
    /// - Pattern: `[a-z]` → List[Alternator[Range{'a','z'}]]
    pub fn parse(mut self) -> Result<Option<Pattern>, ParseError> {
        if self.pattern.is_empty() {
            return Ok(None);
        }

        while self.pos < self.pattern.len() {
            let c = self.pattern[self.pos];
            match self.mode {
                Mode::Escape => self.escape(c),
                Mode::CharacterClass => self.class_member(c),
                Mode::QuantifierBrace => {
                    if c == b'}' {
                        self.mode = Mode::Normal;
                    }
                }
                Mode::Normal => self.normal(c),
            }
            self.pos += 1;
        }
        self.finish();

        match (self.syntax, self.error) {
            (Syntax::Strict, Some(err)) => Err(err),
            _ => Ok(Some(self.tree)),
        }
    }

    fn parent(&self) -> NodeId {
        self.cursor[self.cursor.len() - 1].node
    }

    fn emit(&mut self, node: Node) -> NodeId {
        let parent = self.parent();
        self.tree.push(parent, node)
    }

    /// Remember the first problem seen; the scan carries on regardless.
    fn report(&mut self, err: ParseError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.pattern.get(self.pos + offset).copied()
    }

    fn normal(&mut self, c: u8) {
        match c {
            b'\\' => self.mode = Mode::Escape,
            b'+' => self.quantifier(c, 1, UNBOUNDED),
            b'?' => self.quantifier(c, 0, 1),
            b'*' => self.quantifier(c, 0, UNBOUNDED),
            b'(' => self.open(Node::CaptureGroup(Vec::new())),
            b'[' => {
                self.open(Node::Alternator(Vec::new()));
                self.mode = Mode::CharacterClass;
            }
            b')' => self.close(c),
            // A class is never open in normal mode, so this closes nothing.
            b']' => self.unmatched_close(c),
            b'{' => self.brace(),
            _ => {
                self.emit(Node::literal(c));
            }
        }
    }

    fn escape(&mut self, c: u8) {
        let node = match c {
            b'\\' | b'(' | b')' | b'[' | b']' | b'{' | b'}' | b'+' | b'.' | b'?' | b'*' | b'^'
            | b'$' | b'|' => Some(Node::literal(c)),
            b't' => Some(Node::literal(b'\t')),
            b'n' => Some(Node::literal(b'\n')),
            b'r' => Some(Node::literal(b'\r')),
            b'd' => Some(Node::Special {
                negated: false,
                class: SpecialClass::Digit,
            }),
            _ => None,
        };
        match node {
            Some(node) => {
                self.emit(node);
            }
            None => self.report(ParseError::UnknownEscape(c as char, self.pos - 1)),
        }
        self.mode = self.resume_mode();
    }

    fn class_member(&mut self, c: u8) {
        if self.peek(1) == Some(b'-') {
            if let Some(max) = self.peek(2) {
                if same_range_class(c, max) {
                    self.emit(Node::Range {
                        negated: false,
                        min: c,
                        max,
                    });
                    self.pos += 2;
                    return;
                }
            }
        }

        match c {
            b'\\' => self.mode = Mode::Escape,
            b']' => {
                self.cursor.pop();
                self.mode = Mode::Normal;
            }
            _ => {
                self.emit(Node::literal(c));
            }
        }
    }

    fn quantifier(&mut self, c: u8, min: i32, max: i32) {
        self.check_quantifiable(c);
        self.emit(Node::quantifier(min, max));
    }

    /// `{min,max}` or `{n}`. The quantifier node is created up front and
    /// the brace contents are skipped in `QuantifierBrace` mode.
    fn brace(&mut self) {
        self.check_quantifiable(b'{');
        let pattern = self.pattern;
        let rest = &pattern[self.pos + 1..];
        let (min, max) = scan_bounds(rest);

        match rest.iter().position(|&b| b == b'}') {
            None => self.report(ParseError::UnterminatedBrace(self.pos)),
            Some(end) => {
                if !valid_bounds(&rest[..end]) {
                    self.report(ParseError::InvalidBrace(self.pos));
                }
            }
        }

        self.emit(Node::quantifier(min, max));
        self.mode = Mode::QuantifierBrace;
    }

    fn check_quantifiable(&mut self, c: u8) {
        let previous = self.tree.children(self.parent()).last().copied();
        let dangling = match previous {
            None => true,
            Some(id) => matches!(self.tree[id], Node::Quantifier { .. }),
        };
        if dangling {
            self.report(ParseError::DanglingQuantifier(c as char, self.pos));
        }
    }

    fn open(&mut self, node: Node) {
        let id = self.emit(node);
        self.cursor.push(Frame {
            node: id,
            opened_at: self.pos,
        });
    }

    fn close(&mut self, c: u8) {
        let open_group =
            self.cursor.len() > 1 && matches!(self.tree[self.parent()], Node::CaptureGroup(_));
        if open_group {
            self.cursor.pop();
        } else {
            self.unmatched_close(c);
        }
    }

    /// A closer without an opener stays in the tree as a plain literal.
    fn unmatched_close(&mut self, c: u8) {
        self.report(ParseError::UnmatchedClose(c as char, self.pos));
        self.emit(Node::literal(c));
    }

    fn resume_mode(&self) -> Mode {
        match self.tree[self.parent()] {
            Node::Alternator(_) => Mode::CharacterClass,
            _ => Mode::Normal,
        }
    }

    fn finish(&mut self) {
        if self.mode == Mode::Escape {
            self.report(ParseError::TrailingEscape(self.pattern.len() - 1));
        }
        if self.cursor.len() > 1 {
            let frame = self.cursor[self.cursor.len() - 1];
            let err = match self.tree[frame.node] {
                Node::Alternator(_) => ParseError::UnterminatedCharClass(frame.opened_at),
                _ => ParseError::UnterminatedGroup(frame.opened_at),
            };
            self.report(err);
        }
    }
}

/// Both ends lowercase, both uppercase, or both digits.
fn same_range_class(min: u8, max: u8) -> bool {
    (min.is_ascii_lowercase() && max.is_ascii_lowercase())
        || (min.is_ascii_uppercase() && max.is_ascii_uppercase())
        || (min.is_ascii_digit() && max.is_ascii_digit())
}

/// Scan `min,max` from the bytes following `{`.
///
/// A missing minimum yields `-1`; when no maximum follows, the bound is
/// exact and `max` is `min`.
fn scan_bounds(rest: &[u8]) -> (i32, i32) {
    let Some((min, used)) = scan_int(rest) else {
        return (-1, -1);
    };
    if rest.get(used) == Some(&b',') {
        if let Some((max, _)) = scan_int(&rest[used + 1..]) {
            return (min, max);
        }
    }
    (min, min)
}

/// Leading whitespace, optional sign, then at least one digit.
fn scan_int(bytes: &[u8]) -> Option<(i32, usize)> {
    let mut i = bytes
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    let negative = match bytes.get(i) {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let digits_start = i;
    let mut value: i32 = 0;
    while let Some(&b) = bytes.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add(i32::from(b - b'0'));
        i += 1;
    }
    if i == digits_start {
        return None;
    }
    Some((if negative { -value } else { value }, i))
}

/// Strict form of the brace body: `n` or `n,m` with `n <= m`.
fn valid_bounds(body: &[u8]) -> bool {
    let all_digits = |s: &[u8]| !s.is_empty() && s.iter().all(u8::is_ascii_digit);
    match body.iter().position(|&b| b == b',') {
        None => all_digits(body),
        Some(comma) => {
            let (min, max) = (&body[..comma], &body[comma + 1..]);
            let (lo, hi) = scan_bounds(body);
            all_digits(min) && all_digits(max) && lo <= hi
        }
    }
}
