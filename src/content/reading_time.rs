//! Word-count based reading time estimation

use super::ReadingTime;

/// Rate behind the per-post reading time estimate
pub const READING_TIME_WORDS_PER_MINUTE: f64 = 200.0;

/// Rate for listing helpers that take a word count without a rate
pub const DEFAULT_WORDS_PER_MINUTE: f64 = 275.0;

/// Estimate reading time at the per-post rate
pub fn estimate(text: &str) -> ReadingTime {
    estimate_with_rate(text, READING_TIME_WORDS_PER_MINUTE)
}

/// Estimate reading time at `words_per_minute`
pub fn estimate_with_rate(text: &str, words_per_minute: f64) -> ReadingTime {
    let words = count_words(text);
    let exact_minutes = if words_per_minute > 0.0 {
        words as f64 / words_per_minute
    } else {
        0.0
    };
    let minutes = exact_minutes.ceil() as u32;

    ReadingTime {
        text: format!("{} min read", minutes),
        minutes,
        time: (exact_minutes * 60_000.0).round() as u64,
        words,
    }
}

/// Count words; each CJK character counts as one word
pub fn count_words(text: &str) -> usize {
    let mut words = 0;
    let mut in_word = false;

    for c in text.chars() {
        if is_cjk(c) {
            words += 1;
            in_word = false;
        } else if c.is_whitespace() {
            in_word = false;
        } else if !in_word {
            words += 1;
            in_word = true;
        }
    }

    words
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30ff}'
        | '\u{3400}'..='\u{4dbf}'
        | '\u{4e00}'..='\u{9fff}'
        | '\u{f900}'..='\u{faff}'
        | '\u{ac00}'..='\u{d7af}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  one two\tthree\nfour "), 4);
        assert_eq!(count_words("你好 world"), 3);
    }

    #[test]
    fn test_estimate_empty() {
        let rt = estimate("");
        assert_eq!(rt.minutes, 0);
        assert_eq!(rt.time, 0);
        assert_eq!(rt.text, "0 min read");
    }

    #[test]
    fn test_estimate_rounds_up() {
        let text = "word ".repeat(276);
        let rt = estimate(&text);
        assert_eq!(rt.words, 276);
        assert_eq!(rt.minutes, 2);
        assert_eq!(rt.text, "2 min read");
    }

    #[test]
    fn test_estimate_uses_post_rate() {
        let text = "word ".repeat(250);
        let rt = estimate(&text);
        assert_eq!(rt.words, 250);
        assert_eq!(rt.minutes, 2);
        assert_eq!(rt.text, "2 min read");
        assert_eq!(rt.time, 75_000);
    }

    #[test]
    fn test_estimate_custom_rate() {
        let text = "word ".repeat(200);
        let rt = estimate_with_rate(&text, 200.0);
        assert_eq!(rt.minutes, 1);
        assert_eq!(rt.time, 60_000);
    }
}
