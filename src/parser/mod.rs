pub mod ast;

use crate::analyzer::Analyzer;
use crate::config::ParseOptions;
use crate::errors::{find_similar_word, ErrorKind, NumberError, SourceLocation, SourceText};
use crate::lexer::{self, Lexer, Token, TokenInfo, WordClass};
use ast::*;

pub struct Parser {
    tokens: Vec<TokenInfo>,
    pos: usize,
    source: Option<SourceText>,
    options: ParseOptions,
}

impl Parser {
    /// `tokens` must end with `Token::EOF`, as `Lexer::tokenize` guarantees.
    pub fn new(tokens: Vec<TokenInfo>) -> Self {
        Parser {
            tokens,
            pos: 0,
            source: None,
            options: ParseOptions::default(),
        }
    }

    pub fn with_source(mut self, content: &str) -> Self {
        self.source = Some(SourceText::new(content));
        self
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).map(|w| &w.token).unwrap_or(&Token::EOF)
    }

    fn current_info(&self) -> &TokenInfo {
        &self.tokens[self.pos.min(self.eof_index())]
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        self.pos += 1;
        tok
    }

    fn eof_index(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    fn location_of(&self, info: &TokenInfo) -> Option<SourceLocation> {
        self.source
            .as_ref()
            .map(|src| src.make_location(info.line, info.column, info.offset))
    }

    fn error_at(&self, kind: ErrorKind, info: &TokenInfo, message: &str) -> NumberError {
        let mut err = NumberError::new(kind, message);
        if !info.text.is_empty() {
            err = err.with_word(&info.text);
        }
        if let Some(loc) = self.location_of(info) {
            err = err.with_location(loc);
        }
        err
    }

    fn unrecognized(&self, info: &TokenInfo) -> NumberError {
        let mut err = self.error_at(
            ErrorKind::UnrecognizedWord,
            info,
            &format!("unrecognized word '{}'", info.text),
        );
        if let Some(suggestion) = find_similar_word(&info.text, lexer::words()) {
            err = err.with_suggestion(&suggestion);
        }
        err
    }

    /// Error for a word that cannot appear where it was found. `previous` is the word before it, if any.
    fn unexpected(&self, info: &TokenInfo, previous: Option<&TokenInfo>) -> NumberError {
        let message = match (&info.token, previous) {
            (Token::Unknown(_), _) => return self.unrecognized(info),
            (Token::Scale(scale), _) if *scale > self.options.max_scale => {
                return self.error_at(
                    ErrorKind::OutOfRange,
                    info,
                    &format!(
                        "'{}' is larger than the largest supported scale '{}'",
                        info.text, self.options.max_scale
                    ),
                );
            }
            (Token::Zero, _) => format!("'{}' can only be used on its own", info.text),
            (Token::Sign, _) => format!("'{}' can only start the number", info.text),
            (Token::Hundred, None) => format!("'{}' must follow a digit", info.text),
            (token, Some(prev)) => format!(
                "{} '{}' cannot follow '{}'",
                token.describe(),
                info.text,
                prev.text
            ),
            (token, None) => format!("{} '{}' cannot start a quantity", token.describe(), info.text),
        };
        self.error_at(ErrorKind::MisplacedWord, info, &message)
    }

    /// Full signed phrase: `[sign] (zero | bracket+)`.
    pub fn parse(&mut self) -> Result<NumberPhrase, NumberError> {
        if *self.current() == Token::EOF {
            return Err(self.error_at(ErrorKind::EmptyInput, self.current_info(), "empty input"));
        }

        let negative = *self.current() == Token::Sign;
        if negative {
            let sign = self.current_info().clone();
            self.advance();
            if *self.current() == Token::EOF {
                return Err(self.error_at(
                    ErrorKind::EmptyInput,
                    &sign,
                    &format!("nothing follows '{}'", sign.text),
                ));
            }
        }

        if *self.current() == Token::Zero {
            let zero = self.current_info().clone();
            self.advance();
            if *self.current() != Token::EOF {
                let extra = self.current_info();
                return Err(self.error_at(
                    ErrorKind::TrailingGarbage,
                    extra,
                    &format!("unexpected '{}' after '{}'", extra.text, zero.text),
                ));
            }
            return Ok(NumberPhrase { negative, magnitude: Magnitude::Zero });
        }

        let brackets = self.parse_brackets()?;
        Ok(NumberPhrase {
            negative,
            magnitude: Magnitude::Brackets(brackets),
        })
    }

    /// Walks the enabled scales from highest to lowest. Each scale word found closes
    /// the bracket of the words before it; whatever remains forms the ones bracket.
    /// Scale words above the maximum are never searched for, so they stay inside a
    /// bracket's words and are reported by `unexpected` when the triple reaches them.
    fn parse_brackets(&mut self) -> Result<Vec<Bracket>, NumberError> {
        let options = self.options;
        let mut brackets = Vec::new();

        for scale in options.scales() {
            let start = self.pos;
            let end = if scale == Scale::Ones {
                self.eof_index()
            } else {
                match self.find_scale(scale) {
                    Some(idx) => idx,
                    None => continue,
                }
            };

            if start == end {
                if scale == Scale::Ones {
                    break;
                }
                let word = &self.tokens[end];
                return Err(self.error_at(
                    ErrorKind::EmptyScaleBracket,
                    word,
                    &format!("'{}' has no quantity before it", word.text),
                ));
            }

            let value = self
                .parse_triple_range(start, end)
                .map_err(|e| e.in_bracket(scale.bracket_name()))?;
            tracing::debug!(scale = %scale, value = value.value(), "parsed bracket");

            brackets.push(Bracket {
                scale,
                value,
                offset: self.tokens[start].offset,
            });

            // Skip past the scale word; the ones bracket has none.
            self.pos = if scale == Scale::Ones { end } else { end + 1 };
        }

        if *self.current() != Token::EOF {
            let extra = self.current_info();
            return Err(self.error_at(
                ErrorKind::TrailingGarbage,
                extra,
                &format!("unexpected '{}' after the number", extra.text),
            ));
        }

        Ok(brackets)
    }

    fn find_scale(&self, scale: Scale) -> Option<usize> {
        (self.pos..self.eof_index()).find(|&i| self.tokens[i].token == Token::Scale(scale))
    }

    /// Parses every remaining word as a single triple.
    pub fn parse_triple_phrase(&mut self) -> Result<Triple, NumberError> {
        let start = self.pos;
        let end = self.eof_index();
        if start >= end {
            return Err(self.error_at(ErrorKind::EmptyInput, self.current_info(), "empty input"));
        }
        let value = self.parse_triple_range(start, end)?;
        self.pos = end;
        Ok(value)
    }

    /// `triple := [digit "hundred"] (teen | [tens-multiple] [digit])` over `tokens[start..end]`.
    fn parse_triple_range(&self, start: usize, end: usize) -> Result<Triple, NumberError> {
        let words = &self.tokens[start..end];
        let mut value: u16 = 0;
        let mut i = 0;

        if let (Some(Token::Digit(d)), Some(Token::Hundred)) =
            (words.first().map(|w| &w.token), words.get(1).map(|w| &w.token))
        {
            value += u16::from(*d) * 100;
            i = 2;
        }

        if let Some(Token::Teen(t)) = words.get(i).map(|w| &w.token) {
            value += u16::from(*t);
            i += 1;
        } else {
            if let Some(Token::TensMultiple(t)) = words.get(i).map(|w| &w.token) {
                value += u16::from(*t);
                i += 1;
            }
            if let Some(Token::Digit(d)) = words.get(i).map(|w| &w.token) {
                value += u16::from(*d);
                i += 1;
            }
        }

        if let Some(leftover) = words.get(i) {
            let previous = i.checked_sub(1).map(|p| &words[p]);
            return Err(self.unexpected(leftover, previous));
        }

        Triple::new(value).ok_or_else(|| {
            NumberError::new(
                ErrorKind::OutOfRange,
                &format!("{} is not between zero and nine hundred ninety nine", value),
            )
        })
    }

    /// Exactly one word of the given class.
    pub fn parse_single_word(&mut self, class: WordClass) -> Result<u8, NumberError> {
        let info = self.current_info().clone();
        let value = match (&info.token, class) {
            (Token::EOF, _) => {
                return Err(self.error_at(ErrorKind::EmptyInput, &info, "empty input"));
            }
            (Token::Digit(v), WordClass::Digit)
            | (Token::Teen(v), WordClass::Teen)
            | (Token::TensMultiple(v), WordClass::TensMultiple) => *v,
            (Token::Unknown(_), _) => return Err(self.unrecognized(&info)),
            (token, _) => {
                return Err(self.error_at(
                    ErrorKind::MisplacedWord,
                    &info,
                    &format!(
                        "expected {}, found {} '{}'",
                        class_name(class),
                        token.describe(),
                        info.text
                    ),
                ));
            }
        };
        self.advance();

        if *self.current() != Token::EOF {
            let extra = self.current_info();
            return Err(self.error_at(
                ErrorKind::MisplacedWord,
                extra,
                &format!("expected a single word, found '{}' after '{}'", extra.text, info.text),
            ));
        }

        Ok(value)
    }
}

fn class_name(class: WordClass) -> &'static str {
    match class {
        WordClass::Sign => "a sign word",
        WordClass::Zero => "a zero word",
        WordClass::Digit => "a digit from one to nine",
        WordClass::Teen => "a number from ten to nineteen",
        WordClass::TensMultiple => "a multiple of ten from twenty to ninety",
        WordClass::Scale => "a scale word",
    }
}

fn parser_for(text: &str) -> Parser {
    let tokens = Lexer::new(text).tokenize();
    tracing::trace!(?tokens, "parsing");
    Parser::new(tokens).with_source(text)
}

/// Parses a signed number phrase with the default options (up to the millions).
pub fn parse_number(text: &str) -> Result<i64, NumberError> {
    parse_number_with(text, ParseOptions::default())
}

pub fn parse_number_with(text: &str, options: ParseOptions) -> Result<i64, NumberError> {
    let phrase = parser_for(text).with_options(options).parse()?;
    let value = Analyzer::new(options).with_source(text).evaluate(&phrase)?;
    tracing::debug!(value, "parsed number");
    Ok(value)
}

/// Parses a phrase in [0, 999] with no sign and no scale word.
pub fn parse_triple(text: &str) -> Result<u16, NumberError> {
    parser_for(text).parse_triple_phrase().map(Triple::value)
}

/// "one" through "nine".
pub fn parse_digit(text: &str) -> Result<u8, NumberError> {
    parser_for(text).parse_single_word(WordClass::Digit)
}

/// "ten" through "nineteen".
pub fn parse_teen(text: &str) -> Result<u8, NumberError> {
    parser_for(text).parse_single_word(WordClass::Teen)
}

/// "twenty", "thirty", ... "ninety".
pub fn parse_multiple_of_ten(text: &str) -> Result<u8, NumberError> {
    parser_for(text).parse_single_word(WordClass::TensMultiple)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of<T: std::fmt::Debug>(result: Result<T, NumberError>) -> ErrorKind {
        result.expect_err("expected a parse error").kind
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(
            parse_number(
                "negative nine hundred eighty seven million six hundred fifty four thousand three hundred twenty one"
            ),
            Ok(-987654321)
        );
        assert_eq!(parse_number("one hundred nine million twenty"), Ok(109000020));
        assert_eq!(parse_number("five hundred"), Ok(500));
        assert_eq!(parse_number("minus eleven thousand"), Ok(-11000));
        assert_eq!(parse_number("one million one"), Ok(1000001));
        assert_eq!(
            parse_number("nine hundred ninety nine million nine hundred ninety nine thousand nine hundred ninety nine"),
            Ok(999999999)
        );
    }

    #[test]
    fn test_zero_forms() {
        assert_eq!(parse_number("zero"), Ok(0));
        assert_eq!(parse_number("naught"), Ok(0));
        assert_eq!(parse_number("negative zero"), Ok(0));
        assert_eq!(parse_number("  ZERO \n"), Ok(0));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(parse_number("NiNe HUNDRED"), Ok(900));
        assert_eq!(parse_number(" nine \t hundred "), Ok(900));
        assert_eq!(parse_number("two\nthousand\r\nten"), Ok(2010));
    }

    #[test]
    fn test_parse_triple() {
        assert_eq!(parse_triple("one hundred twenty three"), Ok(123));
        assert_eq!(parse_triple("four hundred nine"), Ok(409));
        assert_eq!(parse_triple("two hundred ten"), Ok(210));
        assert_eq!(parse_triple("seven hundred twenty"), Ok(720));
        assert_eq!(parse_triple("nine hundred"), Ok(900));
        assert_eq!(parse_triple("sixty"), Ok(60));
        assert_eq!(parse_triple("nineteen"), Ok(19));
        assert_eq!(parse_triple("three"), Ok(3));
    }

    #[test]
    fn test_triple_rejects_malformed() {
        assert_eq!(kind_of(parse_triple("")), ErrorKind::EmptyInput);
        assert_eq!(kind_of(parse_triple("   ")), ErrorKind::EmptyInput);
        assert_eq!(kind_of(parse_triple("zero")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_triple("one two")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_triple("thirteen one")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_triple("twenty thirteen")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_triple("hundred")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_triple("twenty hundred")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_triple("one hundred hundred")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_triple("one thousand")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_triple("five twenty")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_triple("one hundred fourty")), ErrorKind::UnrecognizedWord);
    }

    #[test]
    fn test_single_words() {
        assert_eq!(parse_digit("five"), Ok(5));
        assert_eq!(parse_teen("thirteen"), Ok(13));
        assert_eq!(parse_multiple_of_ten("thirty"), Ok(30));
        assert_eq!(parse_multiple_of_ten("Ninety"), Ok(90));

        assert_eq!(kind_of(parse_digit("zero")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_digit("ten")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_digit("fiv")), ErrorKind::UnrecognizedWord);
        assert_eq!(kind_of(parse_digit("")), ErrorKind::EmptyInput);
        assert_eq!(kind_of(parse_digit("one two")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_teen("twenty")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_multiple_of_ten("ten")), ErrorKind::MisplacedWord);
    }

    #[test]
    fn test_every_digit_word() {
        let digits = ["one", "two", "three", "four", "five", "six", "seven", "eight", "nine"];
        for (i, word) in digits.iter().enumerate() {
            assert_eq!(parse_digit(word), Ok(i as u8 + 1));
        }
    }

    #[test]
    fn test_number_errors() {
        assert_eq!(kind_of(parse_number("")), ErrorKind::EmptyInput);
        assert_eq!(kind_of(parse_number(" \t ")), ErrorKind::EmptyInput);
        assert_eq!(kind_of(parse_number("negative")), ErrorKind::EmptyInput);
        assert_eq!(kind_of(parse_number("thousand five")), ErrorKind::EmptyScaleBracket);
        assert_eq!(kind_of(parse_number("one million thousand")), ErrorKind::EmptyScaleBracket);
        assert_eq!(kind_of(parse_number("one two")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_number("zero five")), ErrorKind::TrailingGarbage);
        assert_eq!(kind_of(parse_number("five negative")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_number("negative negative five")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_number("one thousand two million")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_number("one thousand one thousand")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_number("zero thousand")), ErrorKind::TrailingGarbage);
        assert_eq!(kind_of(parse_number("five zero thousand")), ErrorKind::MisplacedWord);
        assert_eq!(kind_of(parse_number("twenty-one")), ErrorKind::UnrecognizedWord);
        assert_eq!(kind_of(parse_number("one billion")), ErrorKind::OutOfRange);
        assert_eq!(kind_of(parse_number("billion")), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_errors_reported_in_reading_order() {
        let err = parse_number("fourty billion").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnrecognizedWord);
        assert_eq!(err.suggestion.as_deref(), Some("forty"));
        assert_eq!(err.offset(), Some(0));

        let err = parse_number("one two billion").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MisplacedWord);
        assert_eq!(err.word.as_deref(), Some("two"));

        let err = parse_number("five thousand one billion").unwrap_err();
        assert_eq!(err.kind, ErrorKind::OutOfRange);
        assert_eq!(err.word.as_deref(), Some("billion"));
        assert_eq!(err.offset(), Some(18));
    }

    #[test]
    fn test_error_context() {
        let err = parse_number("six thousand twelve ten").unwrap_err();
        assert_eq!(err.bracket, Some("ones"));
        assert_eq!(err.word.as_deref(), Some("ten"));
        assert_eq!(err.offset(), Some(20));
        assert_eq!(err.to_string(), "invalid ones bracket: a teen 'ten' cannot follow 'twelve'");

        let err = parse_number("two fourty million").unwrap_err();
        assert_eq!(err.bracket, Some("millions"));
        assert_eq!(err.suggestion.as_deref(), Some("forty"));

        let err = parse_number("thousand five").unwrap_err();
        assert_eq!(err.bracket, None);
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn test_larger_scales() {
        let options = ParseOptions::default().with_max_scale(Scale::Billion);
        assert_eq!(
            parse_number_with("two billion one hundred forty seven million", options),
            Ok(2147000000)
        );

        let options = ParseOptions::default().with_max_scale(Scale::Quintillion);
        assert_eq!(
            parse_number_with(
                "nine quintillion two hundred twenty three quadrillion three hundred seventy two trillion \
                 thirty six billion eight hundred fifty four million seven hundred seventy five thousand \
                 eight hundred seven",
                options
            ),
            Ok(i64::MAX)
        );
        assert_eq!(
            parse_number_with(
                "minus nine quintillion two hundred twenty three quadrillion three hundred seventy two trillion \
                 thirty six billion eight hundred fifty four million seven hundred seventy five thousand \
                 eight hundred eight",
                options
            ),
            Ok(i64::MIN)
        );
        assert_eq!(
            kind_of(parse_number_with("ten quintillion", options)),
            ErrorKind::OutOfRange
        );
        let err = parse_number_with("nineteen quintillion", options).unwrap_err();
        assert_eq!(err.kind, ErrorKind::OutOfRange);
        assert_eq!(err.offset(), Some(0));

        let err = parse_number_with("minus  ten quintillion", options).unwrap_err();
        assert_eq!(err.kind, ErrorKind::OutOfRange);
        assert_eq!(err.offset(), Some(7));
        assert_eq!(err.location.map(|loc| loc.column), Some(8));
    }
}
