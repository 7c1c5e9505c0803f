use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Noon,
    Midnight,
}

impl Keyword {
    /// Calendar month number (1-12) for month keywords.
    pub fn month_number(self) -> Option<u32> {
        let n = match self {
            Keyword::January => 1,
            Keyword::February => 2,
            Keyword::March => 3,
            Keyword::April => 4,
            Keyword::May => 5,
            Keyword::June => 6,
            Keyword::July => 7,
            Keyword::August => 8,
            Keyword::September => 9,
            Keyword::October => 10,
            Keyword::November => 11,
            Keyword::December => 12,
            _ => return None,
        };
        Some(n)
    }

}

pub struct Keywords;

impl Keywords {
    /// Returns the **global keyword registry** (input → canonical).
    ///
    /// The registry is:
    /// - **Initialized once** on first access (via [`once_cell::sync::Lazy`]).
    /// - **Thread-safe** (wrapped in [`RwLock`]): many readers or one writer.
    /// - **Lowercased**: all keys are stored lowercased for case-insensitive lookups.
    ///
    /// Seeded with full English month and weekday names, their usual
    /// abbreviations (`feb`, `sept`, `thurs`...) and the time words
    /// `noon` / `midnight`.
    fn registry() -> &'static RwLock<HashMap<String, Keyword>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Keyword>>> = Lazy::new(|| {
            let mut m = HashMap::new();
            for keyword in Keyword::iter() {
                m.insert(keyword.as_ref().to_string(), keyword);
                // "may" is its own abbreviation, the rest shorten to three letters.
                if keyword != Keyword::Noon && keyword != Keyword::Midnight {
                    m.insert(keyword.as_ref()[..3].to_string(), keyword);
                }
            }
            m.insert("sept".to_string(), Keyword::September);
            m.insert("tues".to_string(), Keyword::Tuesday);
            m.insert("thur".to_string(), Keyword::Thursday);
            m.insert("thurs".to_string(), Keyword::Thursday);

            RwLock::new(m)
        });
        &REGISTRY
    }

    /// Extends the global registry with user-defined **synonyms**.
    ///
    /// Each pair is `(alias, target)`. The `target` must be a **known** word already
    /// in the registry (a canonical name, an abbreviation, or an earlier synonym).
    /// If `target` isn't known, the pair is ignored silently. An alias that is
    /// already registered keeps its meaning, so `mar = "may"` cannot hijack March.
    ///
    /// All keys are normalized to **lowercase** to keep lookups case-insensitive.
    ///
    /// Typical call site: during `Config::load()`, after reading `[synonyms]`
    /// from `config.toml`:
    ///
    /// ```toml
    /// [synonyms]
    /// febr = "february"
    /// mittag = "noon"
    /// ```
    pub fn extend(synonyms: &[(String, String)]) {
        let mut reg = Self::registry()
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for (alias, target) in synonyms {
            if let Some(&canonical) = reg.get(&target.to_ascii_lowercase()) {
                reg.entry(alias.to_ascii_lowercase()).or_insert(canonical);
            }
        }
    }

    /// Resolves `input` (case-insensitively) to the keyword it names, if any.
    pub fn lookup(input: &str) -> Option<Keyword> {
        let reg = Self::registry()
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        reg.get(&input.to_ascii_lowercase()).copied()
    }

    /// Returns `true` if `input` equals (case-insensitively) the given **canonical keyword**
    /// or any of its registered synonyms.
    pub fn matches(keyword: Keyword, input: &str) -> bool {
        Self::lookup(input).is_some_and(|canon| canon == keyword)
    }

    /// Month number (1-12) named by `input`, e.g. `"Feb"` → `2`.
    pub fn month(input: &str) -> Option<u32> {
        Self::lookup(input).and_then(Keyword::month_number)
    }
}
