use crate::config::ParseOptions;
use crate::errors::{ErrorKind, NumberError, SourceText};
use crate::parser::ast::*;

/// Turns a parsed phrase into its integer value, checking bracket order and range.
pub struct Analyzer {
    options: ParseOptions,
    source: Option<SourceText>,
}

impl Analyzer {
    pub fn new(options: ParseOptions) -> Self {
        Analyzer {
            options,
            source: None,
        }
    }

    /// The text the phrase was parsed from, so errors can point at a bracket.
    pub fn with_source(mut self, content: &str) -> Self {
        self.source = Some(SourceText::new(content));
        self
    }

    fn locate(&self, err: NumberError, bracket: &Bracket) -> NumberError {
        match &self.source {
            Some(src) => err.with_location(src.location_at(bracket.offset)),
            None => err,
        }
    }

    pub fn evaluate(&self, phrase: &NumberPhrase) -> Result<i64, NumberError> {
        let brackets = match &phrase.magnitude {
            Magnitude::Zero => return Ok(0),
            Magnitude::Brackets(brackets) => brackets,
        };

        let mut magnitude: u64 = 0;
        let mut previous: Option<Scale> = None;

        for bracket in brackets {
            // The parser never produces these two; they guard hand-built phrases.
            if bracket.scale > self.options.max_scale {
                let err = NumberError::new(
                    ErrorKind::OutOfRange,
                    &format!(
                        "'{}' is larger than the largest supported scale '{}'",
                        bracket.scale, self.options.max_scale
                    ),
                );
                return Err(self.locate(err, bracket));
            }
            if previous.is_some_and(|p| bracket.scale >= p) {
                let err = NumberError::new(
                    ErrorKind::MisplacedWord,
                    &format!("the {} bracket is out of order", bracket.scale.bracket_name()),
                );
                return Err(self.locate(err, bracket));
            }
            previous = Some(bracket.scale);

            magnitude = u64::from(bracket.value.value())
                .checked_mul(bracket.scale.multiplier())
                .and_then(|part| magnitude.checked_add(part))
                .ok_or_else(|| self.locate(too_large(bracket.scale), bracket))?;
        }

        let signed = if phrase.negative {
            -i128::from(magnitude)
        } else {
            i128::from(magnitude)
        };

        i64::try_from(signed).map_err(|_| {
            let err = NumberError::new(
                ErrorKind::OutOfRange,
                &format!("{} does not fit in a 64-bit signed integer", signed),
            );
            // Point at the start of the quantity.
            match brackets.first() {
                Some(first) => self.locate(err, first),
                None => err,
            }
        })
    }
}

fn too_large(scale: Scale) -> NumberError {
    NumberError::new(
        ErrorKind::OutOfRange,
        "the number does not fit in a 64-bit signed integer",
    )
    .in_bracket(scale.bracket_name())
}
