use std::fmt;

use serde::{Serialize, Serializer};

/// Leading numeral of books such as "1 John" or "2 Kings".
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Prefix {
    First,
    Second,
    Third,
}

impl Prefix {
    pub fn digit(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digit())
    }
}

impl Serialize for Prefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.digit())
    }
}

/// Canonical book names. Aliases are only used for lookup; rendering always
/// goes through [`Book::name`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Book {
    Genesis,
    Exodus,
    Leviticus,
    Numbers,
    Deuteronomy,
    Joshua,
    Judges,
    Ruth,
    Samuel,
    Kings,
    Chronicles,
    Ezra,
    Nehemiah,
    Esther,
    Job,
    Psalm,
    Psalms,
    Proverbs,
    Ecclesiastes,
    SongOfSongs,
    Isaiah,
    Jeremiah,
    Lamentations,
    Ezekiel,
    Daniel,
    Hosea,
    Joel,
    Amos,
    Obadiah,
    Jonah,
    Micah,
    Nahum,
    Habakkuk,
    Zephaniah,
    Haggai,
    Zechariah,
    Malachi,
    Matthew,
    Mark,
    Luke,
    John,
    Acts,
    Romans,
    Corinthians,
    Galatians,
    Ephesians,
    Philippians,
    Colossians,
    Thessalonians,
    Timothy,
    Titus,
    Philemon,
    Hebrews,
    James,
    Peter,
    Jude,
    Revelation,
    Wisdom,
}

impl Book {
    pub fn name(self) -> &'static str {
        match self {
            Self::Genesis => "Genesis",
            Self::Exodus => "Exodus",
            Self::Leviticus => "Leviticus",
            Self::Numbers => "Numbers",
            Self::Deuteronomy => "Deuteronomy",
            Self::Joshua => "Joshua",
            Self::Judges => "Judges",
            Self::Ruth => "Ruth",
            Self::Samuel => "Samuel",
            Self::Kings => "Kings",
            Self::Chronicles => "Chronicles",
            Self::Ezra => "Ezra",
            Self::Nehemiah => "Nehemiah",
            Self::Esther => "Esther",
            Self::Job => "Job",
            Self::Psalm => "Psalm",
            Self::Psalms => "Psalms",
            Self::Proverbs => "Proverbs",
            Self::Ecclesiastes => "Ecclesiastes",
            Self::SongOfSongs => "Song of Songs",
            Self::Isaiah => "Isaiah",
            Self::Jeremiah => "Jeremiah",
            Self::Lamentations => "Lamentations",
            Self::Ezekiel => "Ezekiel",
            Self::Daniel => "Daniel",
            Self::Hosea => "Hosea",
            Self::Joel => "Joel",
            Self::Amos => "Amos",
            Self::Obadiah => "Obadiah",
            Self::Jonah => "Jonah",
            Self::Micah => "Micah",
            Self::Nahum => "Nahum",
            Self::Habakkuk => "Habakkuk",
            Self::Zephaniah => "Zephaniah",
            Self::Haggai => "Haggai",
            Self::Zechariah => "Zechariah",
            Self::Malachi => "Malachi",
            Self::Matthew => "Matthew",
            Self::Mark => "Mark",
            Self::Luke => "Luke",
            Self::John => "John",
            Self::Acts => "Acts",
            Self::Romans => "Romans",
            Self::Corinthians => "Corinthians",
            Self::Galatians => "Galatians",
            Self::Ephesians => "Ephesians",
            Self::Philippians => "Philippians",
            Self::Colossians => "Colossians",
            Self::Thessalonians => "Thessalonians",
            Self::Timothy => "Timothy",
            Self::Titus => "Titus",
            Self::Philemon => "Philemon",
            Self::Hebrews => "Hebrews",
            Self::James => "James",
            Self::Peter => "Peter",
            Self::Jude => "Jude",
            Self::Revelation => "Revelation",
            Self::Wisdom => "Wisdom",
        }
    }

    /// Books that may carry a "1"/"2"/"3" prefix. John is here because of the
    /// epistles, so a bare "john" still resolves to the gospel.
    pub fn is_prefix_eligible(self) -> bool {
        matches!(
            self,
            Self::Samuel
                | Self::Kings
                | Self::Chronicles
                | Self::Corinthians
                | Self::Thessalonians
                | Self::Timothy
                | Self::Peter
                | Self::John
        )
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Book {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

// "l" forms show up when roman numerals are typed with a lowercase L.
const PREFIX_ALIASES: &[(Prefix, &[&str])] = &[
    (Prefix::First, &["1", "1st", "i", "l", "first"]),
    (Prefix::Second, &["2", "2nd", "ii", "ll", "second"]),
    (Prefix::Third, &["3", "3rd", "iii", "lll", "third"]),
];

const BOOK_ALIASES: &[(Book, &[&str])] = &[
    (Book::Genesis, &["genesis", "gen"]),
    (Book::Exodus, &["exodus", "ex"]),
    (Book::Leviticus, &["leviticus", "lev"]),
    (Book::Numbers, &["numbers", "num"]),
    (Book::Deuteronomy, &["deuteronomy", "deut"]),
    (Book::Joshua, &["joshua", "josh"]),
    (Book::Judges, &["judges", "judg", "jud"]),
    (Book::Ruth, &["ruth"]),
    (Book::Samuel, &["samuel", "sam"]),
    (Book::Kings, &["kings"]),
    (Book::Chronicles, &["chronicles", "chron"]),
    (Book::Ezra, &["ezra"]),
    (Book::Nehemiah, &["nehemiah", "neh"]),
    (Book::Esther, &["esther", "esth"]),
    (Book::Job, &["job"]),
    (Book::Psalm, &["psalm"]),
    (Book::Psalms, &["psalms", "ps"]),
    (Book::Proverbs, &["proverbs", "prov"]),
    (Book::Ecclesiastes, &["ecclesiastes", "eccl"]),
    (Book::SongOfSongs, &["song"]),
    (Book::Isaiah, &["isaiah", "is"]),
    (Book::Jeremiah, &["jeremiah", "jer"]),
    (Book::Lamentations, &["lamentations", "lam"]),
    (Book::Ezekiel, &["ezekiel", "ezek"]),
    (Book::Daniel, &["daniel", "dan"]),
    (Book::Hosea, &["hosea", "hos"]),
    (Book::Joel, &["joel"]),
    (Book::Amos, &["amos"]),
    (Book::Obadiah, &["obadiah", "obad"]),
    (Book::Jonah, &["jonah"]),
    (Book::Micah, &["micah"]),
    (Book::Nahum, &["nahum", "nah"]),
    (Book::Habakkuk, &["habakkuk", "hab"]),
    (Book::Zephaniah, &["zephaniah", "zep"]),
    (Book::Haggai, &["haggai", "hag"]),
    (Book::Zechariah, &["zechariah", "zech"]),
    (Book::Malachi, &["malachi", "mal"]),
    (Book::Matthew, &["matthew", "matt"]),
    (Book::Mark, &["mark"]),
    (Book::Luke, &["luke"]),
    (Book::John, &["john"]),
    (Book::Acts, &["acts"]),
    (Book::Romans, &["romans", "rom"]),
    (Book::Corinthians, &["corinthians", "cor"]),
    (Book::Galatians, &["galatians", "gal"]),
    (Book::Ephesians, &["ephesians", "eph"]),
    (Book::Philippians, &["philippians", "phil"]),
    (Book::Colossians, &["colossians", "col"]),
    (Book::Thessalonians, &["thessalonians", "thess"]),
    (Book::Timothy, &["timothy", "tim"]),
    (Book::Titus, &["titus"]),
    (Book::Philemon, &["philemon", "philem"]),
    (Book::Hebrews, &["hebrews", "heb"]),
    (Book::James, &["james"]),
    (Book::Peter, &["peter"]),
    (Book::Jude, &["jude"]),
    (Book::Revelation, &["revelation", "rev"]),
    (Book::Wisdom, &["wisdom", "wis"]),
];

pub fn resolve_prefix(token: &str) -> Option<Prefix> {
    lookup(PREFIX_ALIASES, token)
}

pub fn resolve_book(token: &str) -> Option<Book> {
    lookup(BOOK_ALIASES, token)
}

fn lookup<T: Copy>(table: &[(T, &[&str])], token: &str) -> Option<T> {
    let candidate = token.strip_suffix('.').unwrap_or(token);
    if candidate.is_empty() {
        return None;
    }

    table
        .iter()
        .find(|(_, aliases)| {
            aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(candidate))
        })
        .map(|(value, _)| *value)
}
