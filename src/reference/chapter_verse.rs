use std::mem;

use serde::Serialize;
use tracing::trace;

use super::error::ParseError;

/// Partial-verse marker: "1a", "1b", or "15ff".
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum Suffix {
    #[serde(rename = "a")]
    A,
    #[serde(rename = "b")]
    B,
    #[serde(rename = "ff")]
    Ff,
}

impl Suffix {
    fn from_char(character: char) -> Option<Self> {
        match character.to_ascii_lowercase() {
            'a' => Some(Self::A),
            'b' => Some(Self::B),
            'f' => Some(Self::Ff),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::Ff => "ff",
        }
    }
}

/// One comma-separated element of a reference, e.g. `1:1a-2:4`.
///
/// A verse of 0 means the whole chapter. Start and end hold the same values
/// when the element is not a range.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
pub struct ChapterVerse {
    pub start_chapter: u16,
    pub start_verse: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_suffix: Option<Suffix>,
    pub end_chapter: u16,
    pub end_verse: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_suffix: Option<Suffix>,
}

impl ChapterVerse {
    pub fn chapter(chapter: u16) -> Self {
        Self::span(chapter, 0, chapter, 0)
    }

    pub fn verse(chapter: u16, verse: u16) -> Self {
        Self::span(chapter, verse, chapter, verse)
    }

    pub fn span(start_chapter: u16, start_verse: u16, end_chapter: u16, end_verse: u16) -> Self {
        Self {
            start_chapter,
            start_verse,
            start_suffix: None,
            end_chapter,
            end_verse,
            end_suffix: None,
        }
    }

    pub fn with_start_suffix(mut self, suffix: Suffix) -> Self {
        self.start_suffix = Some(suffix);
        self
    }

    pub fn with_end_suffix(mut self, suffix: Suffix) -> Self {
        self.end_suffix = Some(suffix);
        self
    }

    pub fn is_range(&self) -> bool {
        self.start_chapter != self.end_chapter || self.start_verse != self.end_verse
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Unit {
    Chapter,
    Verse,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Position {
    Start,
    End,
}

/// Parses the chapter/verse portion of a reference ("1:4,6-10", "10:1-11:3").
///
/// Digits accumulate until punctuation flushes them into the slot selected by
/// the current unit (chapter or verse) and position (start or end of a
/// range). Characters that are not digits, separators, or suffix letters are
/// ignored. Elements that never received a number are dropped, so stray or
/// trailing commas vanish and an empty input yields no elements.
pub fn parse_chapter_verse(input: &str) -> Result<Vec<ChapterVerse>, ParseError> {
    let mut scanner = RangeScanner::default();
    for character in input.chars() {
        scanner.consume(character)?;
    }
    scanner.finish()
}

struct RangeScanner {
    ranges: Vec<ChapterVerse>,
    current: ChapterVerse,
    touched: bool,
    unit: Unit,
    position: Position,
    digits: String,
    last_value: u16,
}

impl Default for RangeScanner {
    fn default() -> Self {
        Self {
            ranges: Vec::new(),
            current: ChapterVerse::default(),
            touched: false,
            unit: Unit::Chapter,
            position: Position::Start,
            digits: String::new(),
            last_value: 0,
        }
    }
}

impl RangeScanner {
    fn consume(&mut self, character: char) -> Result<(), ParseError> {
        match character {
            '0'..='9' => self.digits.push(character),
            ':' => {
                self.flush()?;
                if self.unit == Unit::Verse {
                    // A second colon means the number just read was a chapter:
                    // the "y" of "w:x-y:z".
                    self.reinterpret_as_chapter();
                }
                self.unit = Unit::Verse;
            }
            // hyphen, en dash, and em dash are all found in the wild
            '-' | '\u{2013}' | '\u{2014}' => {
                self.flush()?;
                self.position = Position::End;
            }
            ',' => {
                self.flush()?;
                self.close_range();
            }
            _ => match Suffix::from_char(character) {
                Some(suffix) => {
                    self.flush()?;
                    self.attach_suffix(suffix);
                }
                None => trace!(character = %character.escape_debug(), "ignoring noise"),
            },
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<ChapterVerse>, ParseError> {
        self.flush()?;
        if self.touched {
            self.ranges.push(self.current);
        }
        Ok(self.ranges)
    }

    /// Writes the pending digits into the current slot. Nothing pending leaves
    /// the slot as it is.
    fn flush(&mut self) -> Result<(), ParseError> {
        if self.digits.is_empty() {
            return Ok(());
        }

        let digits = mem::take(&mut self.digits);
        let value = digits
            .parse::<u16>()
            .map_err(|_| ParseError::MalformedNumeric { digits })?;

        let range = &mut self.current;
        match (self.unit, self.position) {
            (Unit::Chapter, Position::Start) => {
                range.start_chapter = value;
                range.end_chapter = value;
            }
            (Unit::Chapter, Position::End) => range.end_chapter = value,
            (Unit::Verse, Position::Start) => {
                range.start_verse = value;
                range.end_verse = value;
            }
            (Unit::Verse, Position::End) => range.end_verse = value,
        }

        self.last_value = value;
        self.touched = true;
        Ok(())
    }

    fn reinterpret_as_chapter(&mut self) {
        let value = self.last_value;
        match self.position {
            Position::Start => {
                self.current.start_chapter = value;
                self.current.end_chapter = value;
            }
            Position::End => self.current.end_chapter = value,
        }
    }

    /// Closes the current element. Inside a verse list the next element
    /// inherits the closed element's end chapter, so "1:1-2:4,5" reads the 5
    /// as 2:5.
    fn close_range(&mut self) {
        let closed = mem::take(&mut self.current);
        if self.touched {
            self.ranges.push(closed);
        }

        if self.unit == Unit::Verse {
            self.current.start_chapter = closed.end_chapter;
            self.current.end_chapter = closed.end_chapter;
        }

        self.position = Position::Start;
        self.touched = false;
    }

    fn attach_suffix(&mut self, suffix: Suffix) {
        if self.unit == Unit::Chapter {
            return;
        }

        match self.position {
            Position::Start => self.current.start_suffix = Some(suffix),
            Position::End => self.current.end_suffix = Some(suffix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<ChapterVerse> {
        parse_chapter_verse(input).expect("chapter/verse should parse")
    }

    #[test]
    fn empty_input_yields_no_ranges() {
        assert!(parse("").is_empty());
        assert!(parse("  ").is_empty());
    }

    #[test]
    fn bare_chapters_and_chapter_ranges() {
        assert_eq!(parse("1"), vec![ChapterVerse::chapter(1)]);
        assert_eq!(parse("1-4"), vec![ChapterVerse::span(1, 0, 4, 0)]);
        assert_eq!(
            parse("1,2"),
            vec![ChapterVerse::chapter(1), ChapterVerse::chapter(2)]
        );
    }

    #[test]
    fn comma_in_verse_list_keeps_the_chapter() {
        assert_eq!(
            parse("1:4,6-10,11-14"),
            vec![
                ChapterVerse::verse(1, 4),
                ChapterVerse::span(1, 6, 1, 10),
                ChapterVerse::span(1, 11, 1, 14),
            ]
        );
    }

    #[test]
    fn comma_carries_the_end_chapter_of_a_cross_chapter_range() {
        assert_eq!(
            parse("1:1-2:4,5"),
            vec![ChapterVerse::span(1, 1, 2, 4), ChapterVerse::verse(2, 5)]
        );
    }

    #[test]
    fn colon_after_comma_starts_a_new_chapter() {
        assert_eq!(
            parse("10:1-7,12:9-99"),
            vec![
                ChapterVerse::span(10, 1, 10, 7),
                ChapterVerse::span(12, 9, 12, 99),
            ]
        );
    }

    #[test]
    fn second_colon_turns_end_verse_into_end_chapter() {
        assert_eq!(parse("10:1-11:3"), vec![ChapterVerse::span(10, 1, 11, 3)]);
    }

    #[test]
    fn chapter_range_ending_in_a_verse() {
        assert_eq!(parse("1-2:5"), vec![ChapterVerse::span(1, 0, 2, 5)]);
    }

    #[test]
    fn suffixes_attach_to_the_current_verse() {
        assert_eq!(
            parse("1:1a-2:4"),
            vec![ChapterVerse::span(1, 1, 2, 4).with_start_suffix(Suffix::A)]
        );
        assert_eq!(
            parse("1:1-2:4B"),
            vec![ChapterVerse::span(1, 1, 2, 4).with_end_suffix(Suffix::B)]
        );
        assert_eq!(
            parse("1:15ff"),
            vec![ChapterVerse::verse(1, 15).with_start_suffix(Suffix::Ff)]
        );
    }

    #[test]
    fn suffix_on_a_chapter_is_ignored() {
        assert_eq!(parse("3a"), vec![ChapterVerse::chapter(3)]);
    }

    #[test]
    fn dash_variants_are_equivalent() {
        let hyphen = parse("1:1-10");
        assert_eq!(parse("1:1\u{2013}10"), hyphen);
        assert_eq!(parse("1:1\u{2014}10"), hyphen);
    }

    #[test]
    fn stray_and_trailing_commas_are_dropped() {
        assert_eq!(
            parse("10:1-7,,9-99"),
            vec![
                ChapterVerse::span(10, 1, 10, 7),
                ChapterVerse::span(10, 9, 10, 99),
            ]
        );
        assert_eq!(parse("1:4,"), vec![ChapterVerse::verse(1, 4)]);
        assert_eq!(parse(",1"), vec![ChapterVerse::chapter(1)]);
    }

    #[test]
    fn noise_characters_are_ignored() {
        // noise does not separate digits either
        assert_eq!(parse("1:4 (v.6)"), vec![ChapterVerse::verse(1, 46)]);
        assert_eq!(parse("c1:v4"), vec![ChapterVerse::verse(1, 4)]);
    }

    #[test]
    fn numeric_boundaries() {
        assert_eq!(parse("0"), vec![ChapterVerse::chapter(0)]);
        assert_eq!(parse("007:010"), vec![ChapterVerse::verse(7, 10)]);
        assert_eq!(
            parse("65535:65535"),
            vec![ChapterVerse::verse(u16::MAX, u16::MAX)]
        );
        assert_eq!(
            parse_chapter_verse("65536"),
            Err(ParseError::MalformedNumeric {
                digits: "65536".to_string()
            })
        );
    }

    #[test]
    fn empty_flush_keeps_the_previous_value() {
        // The dash after "a" flushes nothing, so the start verse survives.
        assert_eq!(
            parse("1:1a-"),
            vec![ChapterVerse::verse(1, 1).with_start_suffix(Suffix::A)]
        );
    }
}
