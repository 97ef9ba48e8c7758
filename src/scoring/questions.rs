//! The 21 DASS-21 items in questionnaire order.

use serde::Serialize;

use super::SymptomCategory::{self, Anxiety, Depression, Stress};

/// A single questionnaire item.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Item {
    pub number: u8,
    pub category: SymptomCategory,
    pub text: &'static str,
    /// Wordings used by older form exports for the same item.
    #[serde(skip)]
    pub aliases: &'static [&'static str],
}

const fn item(
    number: u8,
    category: SymptomCategory,
    text: &'static str,
    aliases: &'static [&'static str],
) -> Item {
    Item {
        number,
        category,
        text,
        aliases,
    }
}

pub static ITEMS: [Item; 21] = [
    item(1, Depression, "I felt that I had nothing to look forward to", &[]),
    item(2, Depression, "I was unable to become enthusiastic about anything", &[]),
    item(3, Depression, "I feel like I am not worth anything as a person", &[]),
    item(4, Depression, "I believe that life is meaningless", &[]),
    item(5, Depression, "I couldn't seem to experience any positive feelings at all", &[]),
    item(6, Depression, "I found it difficult to work up the initiative to do things", &[]),
    item(7, Depression, "I was downhearted and blue", &[]),
    item(
        8,
        Anxiety,
        "I was aware of dryness of my mouth",
        &["I was aware of the dryness of my mouth"],
    ),
    item(
        9,
        Anxiety,
        "I experienced breathing difficulty (e.g. excessively rapid breathing, breathlessness in the absence of physical exertion)",
        &["I experienced breathing difficulty (e.g. excessively rapid breathing, breathless in the absence of physical exertion)"],
    ),
    item(10, Anxiety, "I experienced trembling (e.g. in the hands)", &[]),
    item(
        11,
        Anxiety,
        "I was worried about situations in which I might panic and make a fool of myself",
        &[],
    ),
    item(12, Anxiety, "I felt I was close to panic", &[]),
    item(
        13,
        Anxiety,
        "I was aware of the action of my heart in the absence of physical exertion (e.g. sense of heart rate increase, heart missing a beat)",
        &["I was aware of the action of my heart in the absence of physical exertion (e.g. sense of heart rate increase, heart missing a beat"],
    ),
    item(14, Anxiety, "I felt scared without any good reason", &[]),
    item(15, Stress, "I found it hard to wind down", &[]),
    item(
        16,
        Stress,
        "I tended to over-react to situations",
        &["I tend to overreact to small-scale circumstances"],
    ),
    item(
        17,
        Stress,
        "I felt that I was using a lot of nervous energy",
        &["I felt like I was using a lot of nervous energy"],
    ),
    item(
        18,
        Stress,
        "I found myself getting agitated",
        &["I found myself getting more agitated"],
    ),
    item(
        19,
        Stress,
        "I found it difficult to relax",
        &["I found it more difficult to relax"],
    ),
    item(
        20,
        Stress,
        "I was intolerant of anything that kept me from getting on with what I was doing",
        &["I was intolerant of anything that kept me from getting on what I was doing"],
    ),
    item(21, Stress, "I felt that I was rather touchy", &[]),
];

/// Items for one subscale, in order.
pub fn for_category(category: SymptomCategory) -> impl Iterator<Item = &'static Item> {
    ITEMS.iter().filter(move |item| item.category == category)
}

/// Canonical form used to compare column headers against item wordings.
pub fn header_key(raw: &str) -> String {
    raw.replace(['\u{2019}', '\u{2018}'], "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Item {
    /// True when a dataset header names this item.
    pub fn matches_header(&self, header: &str) -> bool {
        let key = header_key(header);
        std::iter::once(self.text)
            .chain(self.aliases.iter().copied())
            .any(|wording| header_key(wording) == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_items_per_category() {
        for category in SymptomCategory::ALL {
            assert_eq!(for_category(category).count(), 7, "{category}");
        }
    }

    #[test]
    fn header_matching_folds_quotes_and_case() {
        let item = &ITEMS[4];
        assert!(item.matches_header("I couldn\u{2019}t seem to experience any positive feelings at all"));
        assert!(item.matches_header("  i COULDN'T seem to experience any positive  feelings at all "));
        assert!(!item.matches_header("Timestamp"));
    }

    #[test]
    fn aliases_match_older_exports() {
        let item = &ITEMS[15];
        assert!(item.matches_header("I tend to overreact to small-scale circumstances"));
    }
}
