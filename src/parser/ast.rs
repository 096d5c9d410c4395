use std::fmt;
use std::str::FromStr;

/// A power-of-one-thousand bracket. Ordering follows the exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scale {
    Ones,
    Thousand,
    Million,
    Billion,
    Trillion,
    Quadrillion,
    Quintillion,
}

impl Scale {
    /// Highest exponent first. Parsing consumes brackets in this order.
    pub const TABLE: [Scale; 7] = [
        Scale::Quintillion,
        Scale::Quadrillion,
        Scale::Trillion,
        Scale::Billion,
        Scale::Million,
        Scale::Thousand,
        Scale::Ones,
    ];

    pub fn exponent(self) -> u32 {
        match self {
            Scale::Ones => 0,
            Scale::Thousand => 1,
            Scale::Million => 2,
            Scale::Billion => 3,
            Scale::Trillion => 4,
            Scale::Quadrillion => 5,
            Scale::Quintillion => 6,
        }
    }

    /// The word that closes this bracket; empty for the ones bracket.
    pub fn word(self) -> &'static str {
        match self {
            Scale::Ones => "",
            Scale::Thousand => "thousand",
            Scale::Million => "million",
            Scale::Billion => "billion",
            Scale::Trillion => "trillion",
            Scale::Quadrillion => "quadrillion",
            Scale::Quintillion => "quintillion",
        }
    }

    /// Plural name used when reporting which bracket failed.
    pub fn bracket_name(self) -> &'static str {
        match self {
            Scale::Ones => "ones",
            Scale::Thousand => "thousands",
            Scale::Million => "millions",
            Scale::Billion => "billions",
            Scale::Trillion => "trillions",
            Scale::Quadrillion => "quadrillions",
            Scale::Quintillion => "quintillions",
        }
    }

    /// 1000^exponent.
    pub fn multiplier(self) -> u64 {
        1000_u64.pow(self.exponent())
    }

    pub fn from_word(word: &str) -> Option<Scale> {
        Scale::TABLE
            .iter()
            .copied()
            .find(|s| *s != Scale::Ones && s.word() == word)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scale::Ones => write!(f, "ones"),
            other => write!(f, "{}", other.word()),
        }
    }
}

impl FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "ones" {
            return Ok(Scale::Ones);
        }
        Scale::from_word(&lower).ok_or_else(|| {
            format!(
                "unknown scale '{}' (expected one of: ones, thousand, million, billion, trillion, quadrillion, quintillion)",
                s.trim()
            )
        })
    }
}

/// A value in [0, 999].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triple(u16);

impl Triple {
    pub const MAX: u16 = 999;

    pub fn new(value: u16) -> Option<Triple> {
        (value <= Triple::MAX).then_some(Triple(value))
    }

    pub fn value(self) -> u16 {
        self.0
    }
}

/// One scale bracket as it appeared in the phrase, e.g. "six hundred fifty four thousand".
#[derive(Debug, Clone, PartialEq)]
pub struct Bracket {
    pub scale: Scale,
    pub value: Triple,
    /// Character offset of the bracket's first word.
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Magnitude {
    Zero,
    /// Brackets in strictly descending scale order. Absent scales contribute nothing.
    Brackets(Vec<Bracket>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberPhrase {
    pub negative: bool,
    pub magnitude: Magnitude,
}
