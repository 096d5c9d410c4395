use std::fmt::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    /// Character offset from the start of the input.
    pub offset: usize,
    pub line_content: String,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize, line_content: &str) -> Self {
        SourceLocation {
            line,
            column,
            offset,
            line_content: line_content.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("empty input")]
    EmptyInput,
    #[error("unrecognized word")]
    UnrecognizedWord,
    #[error("misplaced word")]
    MisplacedWord,
    #[error("empty scale bracket")]
    EmptyScaleBracket,
    #[error("trailing text")]
    TrailingGarbage,
    #[error("out of range")]
    OutOfRange,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "E0001",
            ErrorKind::UnrecognizedWord => "E0002",
            ErrorKind::MisplacedWord => "E0003",
            ErrorKind::EmptyScaleBracket => "E0004",
            ErrorKind::TrailingGarbage => "E0005",
            ErrorKind::OutOfRange => "E0006",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberError {
    pub kind: ErrorKind,
    pub message: String,
    /// The offending word, lowercased.
    pub word: Option<String>,
    pub location: Option<SourceLocation>,
    /// Plural scale name ("millions", "ones", ...) of the bracket that failed.
    pub bracket: Option<&'static str>,
    pub suggestion: Option<String>,
}

impl NumberError {
    pub fn new(kind: ErrorKind, message: &str) -> Self {
        NumberError {
            kind,
            message: message.to_string(),
            word: None,
            location: None,
            bracket: None,
            suggestion: None,
        }
    }

    pub fn with_word(mut self, word: &str) -> Self {
        self.word = Some(word.to_string());
        self
    }

    pub fn with_location(mut self, loc: SourceLocation) -> Self {
        self.location = Some(loc);
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    /// Names the failing bracket. The innermost bracket wins.
    pub fn in_bracket(mut self, bracket: &'static str) -> Self {
        if self.bracket.is_none() {
            self.bracket = Some(bracket);
        }
        self
    }

    pub fn offset(&self) -> Option<usize> {
        self.location.as_ref().map(|loc| loc.offset)
    }

    /// Multi-line report with the source line and a pointer at the offending word.
    pub fn render(&self, color: bool) -> String {
        let paint = |code: &'static str| if color { code } else { "" };
        let red = paint("\x1b[1;31m");
        let blue = paint("\x1b[1;34m");
        let yellow = paint("\x1b[1;33m");
        let green = paint("\x1b[1;32m");
        let bold = paint("\x1b[1m");
        let reset = paint("\x1b[0m");

        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{}error[{}]{}: {}{}{}",
            red,
            self.kind.code(),
            reset,
            bold,
            self,
            reset
        );

        if let Some(ref loc) = self.location {
            let width = loc.line.to_string().len();
            let _ = writeln!(
                out,
                "  {}-->{} line {}, column {}",
                blue, reset, loc.line, loc.column
            );
            let _ = writeln!(out, "  {:width$} {}|{}", "", blue, reset, width = width);
            let _ = writeln!(
                out,
                "  {}{}{} {}|{} {}",
                blue,
                loc.line,
                reset,
                blue,
                reset,
                loc.line_content.trim_end()
            );

            let spaces = " ".repeat(loc.column.saturating_sub(1));
            let _ = writeln!(
                out,
                "  {:width$} {}|{} {}{}^--- here{}",
                "",
                blue,
                reset,
                spaces,
                red,
                reset,
                width = width
            );
        }

        if let Some(ref suggestion) = self.suggestion {
            let _ = writeln!(
                out,
                "  {}help{}: did you mean `{}{}{}`?",
                green, reset, yellow, suggestion, reset
            );
        }

        out
    }
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(bracket) = self.bracket {
            write!(f, "invalid {} bracket: ", bracket)?;
        }
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for NumberError {}

/// Edit distance between two words, ignoring case. Keeps a single row of the table.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

pub fn find_similar_word<'a>(
    word: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    // Too short to guess at
    if word.chars().count() <= 2 {
        return None;
    }

    let len = word.chars().count();
    let max_distance = if len >= 4 { 2 } else { 1 };
    let mut best_match: Option<(&str, usize)> = None;

    for candidate in candidates {
        if candidate.len().abs_diff(len) > 2 {
            continue;
        }

        let distance = levenshtein_distance(word, candidate);
        if distance == 0 {
            return None;
        }

        if distance <= max_distance && best_match.map_or(true, |(_, best)| distance < best) {
            best_match = Some((candidate, distance));
        }
    }

    best_match.map(|(s, _)| s.to_string())
}

/// Line lookup over the raw input, for building locations.
pub struct SourceText {
    content: String,
    lines: Vec<String>,
}

impl SourceText {
    pub fn new(content: &str) -> Self {
        SourceText {
            content: content.to_string(),
            lines: content.lines().map(|s| s.to_string()).collect(),
        }
    }

    /// Location of a character offset, counted the same way the lexer counts.
    pub fn location_at(&self, offset: usize) -> SourceLocation {
        let (line, column) = self
            .content
            .chars()
            .take(offset)
            .fold((1, 1), |(line, column), ch| {
                if ch == '\n' {
                    (line + 1, 1)
                } else {
                    (line, column + 1)
                }
            });
        self.make_location(line, column, offset)
    }

    pub fn get_line(&self, line_num: usize) -> Option<&str> {
        if line_num > 0 && line_num <= self.lines.len() {
            Some(&self.lines[line_num - 1])
        } else {
            None
        }
    }

    pub fn make_location(&self, line: usize, column: usize, offset: usize) -> SourceLocation {
        let line_content = self.get_line(line).unwrap_or("");
        SourceLocation::new(line, column, offset, line_content)
    }
}
