//! Byte-level matchers for the three little grammars the extractor understands:
//! date phrases, clock times and connector words.
//!
//! Each grammar yields its candidate matches at a position in the order a
//! backtracking engine would try them (greedy first), so "first candidate
//! that satisfies the boundary rule" reproduces leftmost-greedy semantics.
//! All grammars are ASCII, so multi-byte characters never match and match
//! offsets always fall on char boundaries. For whole-word checks a
//! multi-byte character counts as part of a word.

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Match<C> {
    pub start: usize,
    pub end: usize,
    pub capture: C,
}

pub(crate) trait Pattern {
    type Capture: Clone;

    fn candidates(&self, text: &[u8], start: usize) -> Vec<(usize, Self::Capture)>;
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn is_boundary(text: &[u8], at: usize) -> bool {
    let in_word = |b: u8| is_word(b) || !b.is_ascii();
    let before = at > 0 && in_word(text[at - 1]);
    let after = at < text.len() && in_word(text[at]);
    before != after
}

fn run_len(text: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    text[from.min(text.len())..].iter().take_while(|&&b| pred(b)).count()
}

/// Leftmost match at or after `from`. With `bounded`, both ends must sit on word boundaries.
pub(crate) fn find_from<P: Pattern>(
    pattern: &P,
    text: &str,
    from: usize,
    bounded: bool,
) -> Option<Match<P::Capture>> {
    let bytes = text.as_bytes();
    for start in from..bytes.len() {
        if bounded && !is_boundary(bytes, start) {
            continue;
        }
        let hit = pattern
            .candidates(bytes, start)
            .into_iter()
            .find(|(end, _)| !bounded || is_boundary(bytes, *end));
        if let Some((end, capture)) = hit {
            return Some(Match { start, end, capture });
        }
    }
    None
}

pub(crate) fn find<P: Pattern>(pattern: &P, text: &str) -> Option<Match<P::Capture>> {
    find_from(pattern, text, 0, false)
}

/// Removes every non-overlapping whole-word match, scanning left to right.
pub(crate) fn strip_words<P: Pattern>(pattern: &P, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(m) = find_from(pattern, text, cursor, true) {
        out.push_str(&text[cursor..m.start]);
        cursor = m.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// `today | tomorrow | next <ws>+ <word> | <word>day`
pub(crate) struct DatePhrase;

impl Pattern for DatePhrase {
    type Capture = ();

    fn candidates(&self, text: &[u8], start: usize) -> Vec<(usize, ())> {
        let rest = &text[start..];
        let mut out = Vec::new();

        if rest.starts_with(b"today") {
            out.push((start + 5, ()));
        }
        if rest.starts_with(b"tomorrow") {
            out.push((start + 8, ()));
        }
        if rest.starts_with(b"next") {
            let gap = run_len(text, start + 4, is_space);
            if gap > 0 {
                let word_at = start + 4 + gap;
                let word = run_len(text, word_at, is_word);
                out.extend((1..=word).rev().map(|len| (word_at + len, ())));
            }
        }

        let word = run_len(text, start, is_word);
        for lead in (1..word).rev() {
            if lead + 3 <= word && rest[lead..].starts_with(b"day") {
                out.push((start + lead + 3, ()));
            }
        }

        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Meridiem {
    Am,
    Pm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Clock {
    pub hour: u32,
    pub minute: Option<u32>,
    pub meridiem: Option<Meridiem>,
}

/// `<1-2 digits> [:<2 digits>] [<one ws>] [am|pm]`
pub(crate) struct ClockPattern;

fn two_digits(text: &[u8], at: usize) -> Option<u32> {
    match text.get(at..at + 2) {
        Some([a, b]) if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(((a - b'0') * 10 + (b - b'0')) as u32)
        }
        _ => None,
    }
}

impl Pattern for ClockPattern {
    type Capture = Clock;

    fn candidates(&self, text: &[u8], start: usize) -> Vec<(usize, Clock)> {
        let digits = run_len(text, start, |b| b.is_ascii_digit()).min(2);
        let mut out = Vec::new();

        for len in (1..=digits).rev() {
            let hour = text[start..start + len]
                .iter()
                .fold(0u32, |acc, d| acc * 10 + (d - b'0') as u32);
            let after_hour = start + len;

            let mut minute_opts = Vec::with_capacity(2);
            if text.get(after_hour) == Some(&b':') {
                if let Some(minute) = two_digits(text, after_hour + 1) {
                    minute_opts.push((after_hour + 3, Some(minute)));
                }
            }
            minute_opts.push((after_hour, None));

            for (after_minute, minute) in minute_opts {
                let mut space_opts = Vec::with_capacity(2);
                if text.get(after_minute).copied().is_some_and(is_space) {
                    space_opts.push(after_minute + 1);
                }
                space_opts.push(after_minute);

                for after_space in space_opts {
                    let tail = &text[after_space..];
                    let meridiem = if tail.starts_with(b"am") {
                        Some(Meridiem::Am)
                    } else if tail.starts_with(b"pm") {
                        Some(Meridiem::Pm)
                    } else {
                        None
                    };
                    if meridiem.is_some() {
                        out.push((after_space + 2, Clock { hour, minute, meridiem }));
                    }
                    out.push((after_space, Clock { hour, minute, meridiem: None }));
                }
            }
        }

        out
    }
}

/// Filler words that glue a date or time onto the rest of a title.
pub(crate) struct Connector;

const CONNECTORS: [&str; 5] = ["by", "at", "on", "after", "in"];

impl Pattern for Connector {
    type Capture = ();

    fn candidates(&self, text: &[u8], start: usize) -> Vec<(usize, ())> {
        CONNECTORS
            .iter()
            .filter(|word| text[start..].starts_with(word.as_bytes()))
            .map(|word| (start + word.len(), ()))
            .collect()
    }
}
