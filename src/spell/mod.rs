//! Canonical English rendering of integers, the inverse of `parse_number`.

use crate::parser::ast::Scale;

const DIGITS: [&str; 10] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

const TEENS: [&str; 10] = [
    "ten", "eleven", "twelve", "thirteen", "fourteen",
    "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Renders `n` as lowercase words separated by single spaces, e.g.
/// `-1012` becomes "negative one thousand twelve".
pub fn spell(n: i64) -> String {
    if n == 0 {
        return "zero".to_string();
    }

    let mut words: Vec<&'static str> = Vec::new();
    if n < 0 {
        words.push("negative");
    }

    let mut remaining = n.unsigned_abs();
    for scale in Scale::TABLE {
        let multiplier = scale.multiplier();
        let triple = remaining / multiplier;
        remaining %= multiplier;
        if triple == 0 {
            continue;
        }
        // Each bracket below the top one is under 1000; the top one is at most 18.
        spell_triple(triple as u16, &mut words);
        if scale != Scale::Ones {
            words.push(scale.word());
        }
    }

    words.join(" ")
}

fn spell_triple(value: u16, words: &mut Vec<&'static str>) {
    let hundreds = usize::from(value / 100);
    let rest = usize::from(value % 100);

    if hundreds > 0 {
        words.push(DIGITS[hundreds]);
        words.push("hundred");
    }

    match rest {
        0 => {}
        1..=9 => words.push(DIGITS[rest]),
        10..=19 => words.push(TEENS[rest - 10]),
        _ => {
            words.push(TENS[rest / 10]);
            if rest % 10 > 0 {
                words.push(DIGITS[rest % 10]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_numbers() {
        assert_eq!(spell(0), "zero");
        assert_eq!(spell(7), "seven");
        assert_eq!(spell(13), "thirteen");
        assert_eq!(spell(40), "forty");
        assert_eq!(spell(99), "ninety nine");
        assert_eq!(spell(100), "one hundred");
        assert_eq!(spell(409), "four hundred nine");
        assert_eq!(spell(-210), "negative two hundred ten");
    }

    #[test]
    fn test_brackets() {
        assert_eq!(
            spell(-987654321),
            "negative nine hundred eighty seven million six hundred fifty four thousand three hundred twenty one"
        );
        assert_eq!(spell(109000020), "one hundred nine million twenty");
        assert_eq!(spell(1_000_000_000), "one billion");
    }

    #[test]
    fn test_extremes() {
        assert_eq!(
            spell(i64::MIN),
            "negative nine quintillion two hundred twenty three quadrillion three hundred seventy two trillion \
             thirty six billion eight hundred fifty four million seven hundred seventy five thousand \
             eight hundred eight"
        );
        assert!(spell(i64::MAX).ends_with("eight hundred seven"));
    }
}
