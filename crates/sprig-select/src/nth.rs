//! `An+B` formulas of the structural pseudo-classes.
//!
//! [CSS Syntax § 6 The An+B microsyntax](https://www.w3.org/TR/css-syntax-3/#anb-microsyntax)
//!
//! A formula selects the elements whose 1-based position `p` satisfies
//! `p = a*n + b` for some `n >= 0`. The compiled form takes the 0-based count
//! of preceding siblings instead, and collapses to [`NthCheck::Always`] or
//! [`NthCheck::Never`] when the position does not matter.

/// A compiled `An+B` test over 0-based sibling indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NthCheck {
    /// Every position matches, e.g. `n` or `n-3`.
    Always,
    /// No position matches, e.g. `-n` or `0`.
    Never,
    /// `a` and the 0-based offset `b` (the formula's `b - 1`).
    Formula {
        /// Step.
        a: i64,
        /// 0-based offset.
        b: i64,
    },
}

impl NthCheck {
    /// Does the element with `index` preceding siblings match?
    #[must_use]
    pub const fn matches(&self, index: i64) -> bool {
        match *self {
            Self::Always => true,
            Self::Never => false,
            Self::Formula { a, b } => match a {
                -1 => index <= b,
                0 => index == b,
                1 => index >= b,
                _ => {
                    let step = a.abs();
                    let offset = b.rem_euclid(step);
                    if a > 1 {
                        index >= b && index % step == offset
                    } else {
                        index <= b && index % step == offset
                    }
                }
            },
        }
    }
}

/// Parse and compile a formula in one step.
///
/// Returns `None` if the formula is not valid `An+B` syntax.
#[must_use]
pub fn compile(formula: &str) -> Option<NthCheck> {
    parse(formula).map(|(a, b)| from_parts(a, b))
}

/// Compile already-parsed `(a, b)` (with 1-based `b`).
#[must_use]
pub const fn from_parts(a: i64, b: i64) -> NthCheck {
    let b = b - 1;
    if b < 0 && a <= 0 {
        return NthCheck::Never;
    }
    if a == 1 && b < 0 {
        return NthCheck::Always;
    }
    NthCheck::Formula { a, b }
}

/// Parse `odd`, `even`, or `[+-]?[0-9]*n? ([+-] [0-9]+)?` into `(a, b)`.
///
/// Surrounding whitespace and letter case are ignored; whitespace is also
/// allowed around the sign of `b`.
#[must_use]
pub fn parse(formula: &str) -> Option<(i64, i64)> {
    let formula = formula.trim().to_ascii_lowercase();
    match formula.as_str() {
        "even" => return Some((2, 0)),
        "odd" => return Some((2, 1)),
        _ => {}
    }

    let bytes = formula.as_bytes();
    let mut cursor = Cursor { bytes, idx: 0 };

    let mut a = 0;
    let mut sign = cursor.read_sign();
    let mut number = cursor.read_number()?;

    if cursor.peek() == Some(b'n') {
        cursor.idx += 1;
        a = sign.checked_mul(number.unwrap_or(1))?;
        cursor.skip_whitespace();

        if cursor.at_end() {
            sign = 0;
            number = Some(0);
        } else {
            sign = cursor.read_sign();
            cursor.skip_whitespace();
            number = cursor.read_number()?;
        }
    }

    let number = number?;
    if !cursor.at_end() {
        return None;
    }
    Some((a, sign.checked_mul(number)?))
}

struct Cursor<'s> {
    bytes: &'s [u8],
    idx: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.idx).copied()
    }

    const fn at_end(&self) -> bool {
        self.idx >= self.bytes.len()
    }

    fn read_sign(&mut self) -> i64 {
        match self.peek() {
            Some(b'-') => {
                self.idx += 1;
                -1
            }
            Some(b'+') => {
                self.idx += 1;
                1
            }
            _ => 1,
        }
    }

    /// `Some(None)` when no digits follow; `None` on overflow.
    fn read_number(&mut self) -> Option<Option<i64>> {
        let start = self.idx;
        let mut value: i64 = 0;
        while let Some(digit @ b'0'..=b'9') = self.peek() {
            value = value.checked_mul(10)?.checked_add(i64::from(digit - b'0'))?;
            self.idx += 1;
        }
        Some((self.idx != start).then_some(value))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b'\t' | b'\n' | b'\x0c' | b'\r' | b' ')) {
            self.idx += 1;
        }
    }
}
