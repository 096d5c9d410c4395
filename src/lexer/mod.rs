use std::iter::Peekable;
use std::str::Chars;

use crate::parser::ast::Scale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    Sign,
    Zero,
    Digit,
    Teen,
    TensMultiple,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconEntry {
    pub word: &'static str,
    pub value: u64,
    pub class: WordClass,
}

/// Every word the grammar knows, in lowercase. Scale entries carry their multiplier.
const LEXICON: &[(&str, u64, WordClass)] = &[
    ("minus", 0, WordClass::Sign),
    ("negative", 0, WordClass::Sign),
    ("zero", 0, WordClass::Zero),
    ("naught", 0, WordClass::Zero),
    ("one", 1, WordClass::Digit),
    ("two", 2, WordClass::Digit),
    ("three", 3, WordClass::Digit),
    ("four", 4, WordClass::Digit),
    ("five", 5, WordClass::Digit),
    ("six", 6, WordClass::Digit),
    ("seven", 7, WordClass::Digit),
    ("eight", 8, WordClass::Digit),
    ("nine", 9, WordClass::Digit),
    ("ten", 10, WordClass::Teen),
    ("eleven", 11, WordClass::Teen),
    ("twelve", 12, WordClass::Teen),
    ("thirteen", 13, WordClass::Teen),
    ("fourteen", 14, WordClass::Teen),
    ("fifteen", 15, WordClass::Teen),
    ("sixteen", 16, WordClass::Teen),
    ("seventeen", 17, WordClass::Teen),
    ("eighteen", 18, WordClass::Teen),
    ("nineteen", 19, WordClass::Teen),
    ("twenty", 20, WordClass::TensMultiple),
    ("thirty", 30, WordClass::TensMultiple),
    ("forty", 40, WordClass::TensMultiple),
    ("fifty", 50, WordClass::TensMultiple),
    ("sixty", 60, WordClass::TensMultiple),
    ("seventy", 70, WordClass::TensMultiple),
    ("eighty", 80, WordClass::TensMultiple),
    ("ninety", 90, WordClass::TensMultiple),
    ("hundred", 100, WordClass::Scale),
    ("thousand", 1_000, WordClass::Scale),
    ("million", 1_000_000, WordClass::Scale),
    ("billion", 1_000_000_000, WordClass::Scale),
    ("trillion", 1_000_000_000_000, WordClass::Scale),
    ("quadrillion", 1_000_000_000_000_000, WordClass::Scale),
    ("quintillion", 1_000_000_000_000_000_000, WordClass::Scale),
];

/// Exact-match lookup. The caller lowercases first.
pub fn lookup(word: &str) -> Option<LexiconEntry> {
    LEXICON
        .iter()
        .find(|(w, _, _)| *w == word)
        .map(|&(word, value, class)| LexiconEntry { word, value, class })
}

/// All lexicon words, for spelling suggestions.
pub fn words() -> impl Iterator<Item = &'static str> {
    LEXICON.iter().map(|(w, _, _)| *w)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Sign,
    Zero,
    Digit(u8),
    Teen(u8),
    TensMultiple(u8),
    Hundred,
    Scale(Scale),
    Unknown(String),
    EOF,
}

impl Token {
    pub fn from_word(word: &str) -> Token {
        let Some(entry) = lookup(word) else {
            return Token::Unknown(word.to_string());
        };
        // Digit, teen and tens values are all below 100.
        let small = entry.value as u8;
        match entry.class {
            WordClass::Sign => Token::Sign,
            WordClass::Zero => Token::Zero,
            WordClass::Digit => Token::Digit(small),
            WordClass::Teen => Token::Teen(small),
            WordClass::TensMultiple => Token::TensMultiple(small),
            WordClass::Scale => match Scale::from_word(entry.word) {
                Some(scale) => Token::Scale(scale),
                None => Token::Hundred,
            },
        }
    }

    /// Short description used in diagnostics ("a digit", "a teen", ...).
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Sign => "a sign word",
            Token::Zero => "a zero word",
            Token::Digit(_) => "a digit",
            Token::Teen(_) => "a teen",
            Token::TensMultiple(_) => "a multiple of ten",
            Token::Hundred => "a scale word",
            Token::Scale(_) => "a scale word",
            Token::Unknown(_) => "an unrecognized word",
            Token::EOF => "end of input",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub token: Token,
    /// The lowercased word as written.
    pub text: String,
    pub line: usize,
    pub column: usize,
    /// Character offset from the start of the input.
    pub offset: usize,
}

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.next();
        if let Some(c) = ch {
            self.offset += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    fn peek(&mut self) -> Option<&char> {
        self.input.peek()
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&ch) = self.peek() {
            if ch.is_whitespace() {
                break;
            }
            word.extend(ch.to_lowercase());
            self.advance();
        }
        word
    }

    /// Splits the input on whitespace runs and classifies each word. The last token is always `EOF`.
    pub fn tokenize(&mut self) -> Vec<TokenInfo> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let line = self.line;
            let column = self.column;
            let offset = self.offset;

            if self.peek().is_none() {
                tokens.push(TokenInfo {
                    token: Token::EOF,
                    text: String::new(),
                    line,
                    column,
                    offset,
                });
                break;
            }

            let text = self.read_word();
            tokens.push(TokenInfo {
                token: Token::from_word(&text),
                text,
                line,
                column,
                offset,
            });
        }

        tracing::trace!(count = tokens.len(), "tokenized input");
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn test_lookup_classes() {
        assert_eq!(lookup("seven").map(|e| (e.value, e.class)), Some((7, WordClass::Digit)));
        assert_eq!(lookup("thirteen").map(|e| e.class), Some(WordClass::Teen));
        assert_eq!(lookup("forty").map(|e| e.value), Some(40));
        assert_eq!(lookup("hundred").map(|e| e.class), Some(WordClass::Scale));
        assert_eq!(lookup("naught").map(|e| e.class), Some(WordClass::Zero));
        assert_eq!(lookup("fourty"), None);
        assert_eq!(lookup("Seven"), None);
    }

    #[test]
    fn test_every_word_is_unique() {
        let all: Vec<&str> = words().collect();
        for (i, w) in all.iter().enumerate() {
            assert!(!all[i + 1..].contains(w), "duplicate lexicon word {}", w);
        }
    }

    #[test]
    fn test_tokenize_normalizes_case_and_whitespace() {
        assert_eq!(
            kinds(" NiNe \t HUNDRED\r\n"),
            vec![Token::Digit(9), Token::Hundred, Token::EOF]
        );
    }

    #[test]
    fn test_tokenize_scales_and_unknowns() {
        assert_eq!(
            kinds("minus twenty-one million"),
            vec![
                Token::Sign,
                Token::Unknown("twenty-one".to_string()),
                Token::Scale(Scale::Million),
                Token::EOF,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = Lexer::new("one\n  two").tokenize();
        assert_eq!((tokens[0].line, tokens[0].column, tokens[0].offset), (1, 1, 0));
        assert_eq!((tokens[1].line, tokens[1].column, tokens[1].offset), (2, 3, 6));
        assert_eq!(tokens[2].token, Token::EOF);
    }

    #[test]
    fn test_empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![Token::EOF]);
        assert_eq!(kinds(" \t\n "), vec![Token::EOF]);
    }
}
