//! Sections: the five fixed groupings of the weekly agenda.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five agenda sections, in canonical meeting order.
///
/// The derived `Ord` follows declaration order, so sorting by section
/// yields Opening → Treasures → Ministry → Living As → Closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Section {
    Opening,
    Treasures,
    Ministry,
    LivingAs,
    Closing,
}

impl Section {
    /// Every section, in canonical order.
    pub const ALL: [Section; 5] = [
        Section::Opening,
        Section::Treasures,
        Section::Ministry,
        Section::LivingAs,
        Section::Closing,
    ];

    /// Display label, also used as the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Opening => "Opening",
            Self::Treasures => "Treasures",
            Self::Ministry => "Ministry",
            Self::LivingAs => "Living As",
            Self::Closing => "Closing",
        }
    }

    /// Map a loosely written section name onto its canonical section.
    ///
    /// Case, accents, spacing and punctuation are ignored, then the folded
    /// key is looked up in [`ALIASES`]. Returns `None` for unknown names.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let key = fold_key(raw);
        if key.is_empty() {
            return None;
        }
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, section)| *section)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Section> for &'static str {
    fn from(section: Section) -> Self {
        section.label()
    }
}

impl TryFrom<String> for Section {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_lenient(&value).ok_or_else(|| format!("unknown section: {value:?}"))
    }
}

/// Folded spellings accepted for each section.
///
/// Covers the English labels, the Portuguese headings used by existing
/// tables, and the misspellings found in them.
const ALIASES: &[(&str, Section)] = &[
    ("opening", Section::Opening),
    ("abertura", Section::Opening),
    ("inicio", Section::Opening),
    ("treasures", Section::Treasures),
    ("treasuresfromgodsword", Section::Treasures),
    ("tesouros", Section::Treasures),
    ("tesoros", Section::Treasures),
    ("tesourosdapalavradedeus", Section::Treasures),
    ("tesourosdapalavra", Section::Treasures),
    ("ministry", Section::Ministry),
    ("applyyourselftotheministry", Section::Ministry),
    ("ministerio", Section::Ministry),
    ("ministerios", Section::Ministry),
    ("minsterio", Section::Ministry),
    ("facaseumelhornoministerio", Section::Ministry),
    ("empenhesenoministerio", Section::Ministry),
    ("livingas", Section::LivingAs),
    ("livingaschristians", Section::LivingAs),
    ("livingaschristian", Section::LivingAs),
    ("vidacrista", Section::LivingAs),
    ("vidacristao", Section::LivingAs),
    ("nossavidacrista", Section::LivingAs),
    ("nossavidacristao", Section::LivingAs),
    ("viveracomocristaos", Section::LivingAs),
    ("closing", Section::Closing),
    ("encerramento", Section::Closing),
    ("conclusao", Section::Closing),
    ("final", Section::Closing),
];

/// Lowercase, strip accents, keep only ASCII letters and digits.
pub(crate) fn fold_key(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Replace a lowercase accented Latin letter with its base letter.
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_is_declaration_order() {
        let mut shuffled = vec![
            Section::Closing,
            Section::Ministry,
            Section::Opening,
            Section::LivingAs,
            Section::Treasures,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Section::ALL);
    }

    #[test]
    fn labels_parse_back() {
        for section in Section::ALL {
            assert_eq!(Section::parse_lenient(section.label()), Some(section));
        }
    }

    #[test]
    fn portuguese_variants_and_typos_normalize() {
        let cases = [
            ("Tesouros da Palavra de Deus", Section::Treasures),
            ("  MINISTÉRIO ", Section::Ministry),
            ("Ministerios", Section::Ministry),
            ("Faça seu melhor no ministério", Section::Ministry),
            ("Nossa Vida Cristã", Section::LivingAs),
            ("living-as", Section::LivingAs),
            ("Conclusão", Section::Closing),
        ];
        for (raw, expected) in cases {
            assert_eq!(Section::parse_lenient(raw), Some(expected), "{raw}");
        }
    }

    #[test]
    fn unknown_and_empty_names_are_rejected() {
        assert_eq!(Section::parse_lenient("Intermission"), None);
        assert_eq!(Section::parse_lenient("  "), None);
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Section::LivingAs).unwrap();
        assert_eq!(json, "\"Living As\"");
        let back: Section = serde_json::from_str("\"vida crista\"").unwrap();
        assert_eq!(back, Section::LivingAs);
    }
}
