//! Locale-aware name collation
//!
//! Names compare on their base letters first (accents and case ignored), so
//! "Aléria" lands between "Aghione" and "Bastia" instead of after "Z". Ties
//! fall back to accents, then case (lowercase first), so the order is total.

use std::cmp::Ordering;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Primary collation key: NFD-decomposed, combining marks stripped, lowercased,
/// ligatures expanded
pub fn collation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        match c {
            'œ' => key.push_str("oe"),
            'æ' => key.push_str("ae"),
            'ß' => key.push_str("ss"),
            _ => key.push(c),
        }
    }
    key
}

/// Compare two display names the way a French-locale list would order them
///
/// Base letters first, then accents, then case with lowercase first.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| case_cmp(a, b))
}

fn case_cmp(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        return match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        };
    }
    a.chars().count().cmp(&b.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_are_ignored_at_primary_level() {
        assert_eq!(collation_key("Aléria"), "aleria");
        assert_eq!(collation_key("Galéria"), "galeria");
        assert_eq!(locale_cmp("Aléria", "Bastia"), Ordering::Less);
        assert_eq!(locale_cmp("Aghione", "Aléria"), Ordering::Less);
    }

    #[test]
    fn case_does_not_dominate() {
        // Plain byte order would put "Zonza" before "aléria"
        assert_eq!(locale_cmp("aléria", "Zonza"), Ordering::Less);
    }

    #[test]
    fn hyphenated_names_order_by_letters() {
        assert_eq!(
            locale_cmp("Saint-Florent", "San-Gavino-di-Fiumorbo"),
            Ordering::Less
        );
        assert_eq!(
            locale_cmp("San-Gavino-di-Fiumorbo", "Serra-di-Fiumorbo"),
            Ordering::Less
        );
    }

    #[test]
    fn lowercase_sorts_before_uppercase_on_case_ties() {
        assert_eq!(locale_cmp("ecole", "Ecole"), Ordering::Less);
        assert_eq!(locale_cmp("Ecole", "ecole"), Ordering::Greater);
        assert_eq!(locale_cmp("san-Gavino", "San-Gavino"), Ordering::Less);
    }

    #[test]
    fn ligatures_expand_to_their_letters() {
        assert_eq!(collation_key("Œuf"), "oeuf");
        assert_eq!(collation_key("Lætitia"), "laetitia");
        assert_eq!(locale_cmp("Œuf", "Ouvrage"), Ordering::Less);
        assert_eq!(locale_cmp("Oeuf", "Œuf"), Ordering::Less);
    }

    #[test]
    fn ties_are_broken_deterministically() {
        assert_eq!(locale_cmp("Eze", "Èze"), locale_cmp("Eze", "Èze"));
        assert_ne!(locale_cmp("Eze", "Èze"), Ordering::Equal);
        assert_eq!(locale_cmp("Corte", "Corte"), Ordering::Equal);
    }
}
