use std::fmt::{self, Write};

use super::Reference;
use super::chapter_verse::{ChapterVerse, Suffix};

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = self.prefix {
            write!(f, "{prefix} ")?;
        }
        f.write_str(self.book.name())?;

        if !self.ranges.is_empty() {
            f.write_char(' ')?;
        }

        let mut previous: Option<&ChapterVerse> = None;
        for range in &self.ranges {
            if previous.is_some() {
                f.write_char(',')?;
            }
            write_range(f, range, previous)?;
            previous = Some(range);
        }

        Ok(())
    }
}

fn write_range(
    f: &mut fmt::Formatter<'_>,
    range: &ChapterVerse,
    previous: Option<&ChapterVerse>,
) -> fmt::Result {
    // A bare number after a comma only reads as a verse when the previous
    // element ended inside a verse, so elide the chapter just then. Whole
    // chapters always name theirs, or "7,7" would render as "7,".
    let continues_verse_list = range.start_verse != 0
        && previous.is_some_and(|previous| {
            previous.end_verse != 0 && previous.end_chapter == range.start_chapter
        });
    let chapter_changed = !continues_verse_list;
    if chapter_changed {
        write!(f, "{}", range.start_chapter)?;
    }

    if range.start_verse != 0 {
        if chapter_changed {
            f.write_char(':')?;
        }
        write!(f, "{}", range.start_verse)?;
        write_suffix(f, range.start_suffix)?;
    }

    if range.is_range() {
        f.write_char('-')?;
    }

    let crosses_chapter = range.end_chapter != range.start_chapter;
    if crosses_chapter {
        write!(f, "{}", range.end_chapter)?;
        if range.end_verse != 0 {
            f.write_char(':')?;
        }
    }

    // "12:3-4:3" needs its end verse even though the numbers match.
    if range.end_verse != range.start_verse || (crosses_chapter && range.end_verse != 0) {
        write!(f, "{}", range.end_verse)?;
        write_suffix(f, range.end_suffix)?;
    }

    Ok(())
}

fn write_suffix(f: &mut fmt::Formatter<'_>, suffix: Option<Suffix>) -> fmt::Result {
    match suffix {
        Some(suffix) => f.write_str(suffix.as_str()),
        None => Ok(()),
    }
}
