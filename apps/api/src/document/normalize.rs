//! Field Normalizer: total coercion of loosely formatted field values.
//!
//! Nothing here fails: unparseable input degrades to the documented default of the
//! target type, because a single noisy field must never abort an extraction.

use lazy_static::lazy_static;
use regex::Regex;

use crate::document::models::{ContractType, DegreeLevel, LanguageLevel};
use crate::document::vocabulary::{
    lookup_exact, lookup_substring, CONTRACT_TYPE_SYNONYMS, DEGREE_SYNONYMS,
    LANGUAGE_LEVEL_SYNONYMS, MONTH_NAMES,
};

lazy_static! {
    static ref YEAR_MONTH: Regex = Regex::new(r"^(\d{4})-(\d{2})$").unwrap();
    static ref BARE_YEAR: Regex = Regex::new(r"^(\d{4})$").unwrap();
    static ref MONTH_THEN_YEAR: Regex = Regex::new(r"^(\p{L}+)\.?,?\s+(\d{4})$").unwrap();
    static ref YEAR_THEN_MONTH: Regex = Regex::new(r"^(\d{4})\s+(\p{L}+)\.?$").unwrap();
    static ref ANY_YEAR: Regex = Regex::new(r"(?:^|\D)(\d{4})(?:\D|$)").unwrap();
}

/// Coerces a date into `YYYY-MM`, or `""` when no year can be found.
///
/// Patterns are tried in order, first match wins:
/// `YYYY-MM`, `YYYY`, `<Month> <YYYY>`, `<YYYY> <Month>`, any 4-digit year.
pub fn normalize_date(raw: &str) -> String {
    if let Some(date) = parse_explicit_date(raw) {
        return date;
    }
    let value = clean_string(raw);
    match ANY_YEAR.captures(&value) {
        Some(caps) => format!("{}-01", &caps[1]),
        None => String::new(),
    }
}

/// The strict subset of [`normalize_date`]: only values that are a date and nothing
/// else (`YYYY-MM`, `YYYY`, `<Month> <YYYY>`, `<YYYY> <Month>`).
pub fn parse_explicit_date(raw: &str) -> Option<String> {
    let value = clean_string(raw).to_lowercase();
    if value.is_empty() {
        return None;
    }

    if YEAR_MONTH.is_match(&value) {
        return Some(value);
    }
    if let Some(caps) = BARE_YEAR.captures(&value) {
        return Some(format!("{}-01", &caps[1]));
    }
    if let Some(caps) = MONTH_THEN_YEAR.captures(&value) {
        if let Some(month) = lookup_exact(MONTH_NAMES, &caps[1]) {
            return Some(format!("{}-{:02}", &caps[2], month));
        }
    }
    if let Some(caps) = YEAR_THEN_MONTH.captures(&value) {
        if let Some(month) = lookup_exact(MONTH_NAMES, &caps[2]) {
            return Some(format!("{}-{:02}", &caps[1], month));
        }
    }
    None
}

pub fn normalize_contract_type(raw: &str) -> ContractType {
    let value = raw.trim().to_lowercase();
    if value.is_empty() {
        return ContractType::DEFAULT;
    }
    lookup_substring(CONTRACT_TYPE_SYNONYMS, &value).unwrap_or(ContractType::DEFAULT)
}

/// Matches the whitespace-free form first, so "Bac + 5" resolves like "bac+5", then
/// the raw lowercase text for multi-word synonyms.
pub fn normalize_degree(raw: &str) -> DegreeLevel {
    let value = clean_string(raw).to_lowercase();
    if value.is_empty() {
        return DegreeLevel::DEFAULT;
    }
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    lookup_substring(DEGREE_SYNONYMS, &compact)
        .or_else(|| lookup_substring(DEGREE_SYNONYMS, &value))
        .unwrap_or(DegreeLevel::DEFAULT)
}

pub fn normalize_language_level(raw: &str) -> LanguageLevel {
    let value = clean_string(raw).to_lowercase();
    if value.is_empty() {
        return LanguageLevel::DEFAULT;
    }
    lookup_substring(LANGUAGE_LEVEL_SYNONYMS, &value).unwrap_or(LanguageLevel::DEFAULT)
}

/// Trims and collapses internal whitespace runs to a single space.
pub fn clean_string(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `clean_string` for values that may be missing altogether.
pub fn clean_optional(raw: Option<&str>) -> String {
    raw.map(clean_string).unwrap_or_default()
}

/// Months between two `YYYY-MM` dates, `None` if either is not in that form.
pub fn months_between(start: &str, end: &str) -> Option<i64> {
    let (sy, sm) = parse_year_month(start)?;
    let (ey, em) = parse_year_month(end)?;
    Some((ey - sy) * 12 + (em - sm))
}

fn parse_year_month(value: &str) -> Option<(i64, i64)> {
    let caps = YEAR_MONTH.captures(value)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    Some((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::vocabulary::{
        CONTRACT_TYPE_SYNONYMS, DEGREE_SYNONYMS, LANGUAGE_LEVEL_SYNONYMS,
    };

    #[test]
    fn test_date_month_name_english() {
        assert_eq!(normalize_date("January 2020"), "2020-01");
        assert_eq!(normalize_date("Sept. 2019"), "2019-09");
    }

    #[test]
    fn test_date_month_name_french() {
        assert_eq!(normalize_date("Février 2021"), "2021-02");
        assert_eq!(normalize_date("août 2018"), "2018-08");
        assert_eq!(normalize_date("2017 Décembre"), "2017-12");
    }

    #[test]
    fn test_date_bare_year() {
        assert_eq!(normalize_date("2020"), "2020-01");
    }

    #[test]
    fn test_date_pass_through() {
        assert_eq!(normalize_date("2022-07"), "2022-07");
        assert_eq!(normalize_date("  2022-07 "), "2022-07");
    }

    #[test]
    fn test_date_empty_and_garbage() {
        assert_eq!(normalize_date(""), "");
        assert_eq!(normalize_date("garbage"), "");
        assert_eq!(normalize_date("Present"), "");
    }

    #[test]
    fn test_date_any_year_fallback() {
        assert_eq!(normalize_date("03/2020"), "2020-01");
        assert_eq!(normalize_date("Summer of 2015"), "2015-01");
        // Unknown month word falls through to the year fallback.
        assert_eq!(normalize_date("Foo 2016"), "2016-01");
    }

    #[test]
    fn test_explicit_date_rejects_surrounding_text() {
        assert_eq!(parse_explicit_date("March 2021").as_deref(), Some("2021-03"));
        assert_eq!(parse_explicit_date("Studio 2020"), None);
        assert_eq!(parse_explicit_date("Acme Corp"), None);
    }

    #[test]
    fn test_contract_type_examples() {
        assert_eq!(normalize_contract_type("CDD"), ContractType::Contract);
        assert_eq!(normalize_contract_type("CDI"), ContractType::FullTime);
        assert_eq!(normalize_contract_type("Stage"), ContractType::Internship);
        assert_eq!(normalize_contract_type("Contrat d'apprentissage"), ContractType::Internship);
        assert_eq!(normalize_contract_type("apprenti"), ContractType::Internship);
        assert_eq!(normalize_contract_type("Temporary"), ContractType::Contract);
        assert_eq!(normalize_contract_type(""), ContractType::FullTime);
        assert_eq!(normalize_contract_type("whatever"), ContractType::FullTime);
    }

    #[test]
    fn test_contract_type_every_synonym() {
        for (expected, synonyms) in CONTRACT_TYPE_SYNONYMS {
            for synonym in *synonyms {
                assert_eq!(
                    normalize_contract_type(synonym),
                    *expected,
                    "synonym '{synonym}'"
                );
            }
        }
    }

    #[test]
    fn test_contract_type_labels_round_trip() {
        for ct in [
            ContractType::FullTime,
            ContractType::PartTime,
            ContractType::Contract,
            ContractType::Freelance,
            ContractType::Internship,
        ] {
            assert_eq!(normalize_contract_type(ct.as_str()), ct);
        }
    }

    #[test]
    fn test_degree_examples() {
        assert_eq!(normalize_degree("Bac+5"), DegreeLevel::Master);
        assert_eq!(normalize_degree("Bac + 3"), DegreeLevel::Bachelor);
        assert_eq!(normalize_degree("BTS SIO"), DegreeLevel::Associate);
        assert_eq!(normalize_degree("DUT Informatique"), DegreeLevel::Associate);
        assert_eq!(normalize_degree("MBA"), DegreeLevel::Master);
        assert_eq!(normalize_degree("Doctorat"), DegreeLevel::Phd);
        assert_eq!(normalize_degree("Baccalauréat S"), DegreeLevel::HighSchool);
        assert_eq!(normalize_degree("Certificate in Pottery"), DegreeLevel::Other);
        assert_eq!(normalize_degree(""), DegreeLevel::Other);
    }

    #[test]
    fn test_degree_every_synonym() {
        for (expected, synonyms) in DEGREE_SYNONYMS {
            for synonym in *synonyms {
                assert_eq!(normalize_degree(synonym), *expected, "synonym '{synonym}'");
            }
        }
    }

    #[test]
    fn test_degree_labels_round_trip() {
        for level in [
            DegreeLevel::HighSchool,
            DegreeLevel::Associate,
            DegreeLevel::Bachelor,
            DegreeLevel::Master,
            DegreeLevel::Phd,
            DegreeLevel::Bootcamp,
            DegreeLevel::Other,
        ] {
            assert_eq!(normalize_degree(level.label()), level, "{}", level.label());
        }
    }

    #[test]
    fn test_language_level_examples() {
        assert_eq!(normalize_language_level("Courant"), LanguageLevel::Fluent);
        assert_eq!(normalize_language_level("Langue maternelle"), LanguageLevel::Native);
        assert_eq!(normalize_language_level("B2"), LanguageLevel::Intermediate);
        assert_eq!(normalize_language_level("Notions"), LanguageLevel::Beginner);
        assert_eq!(normalize_language_level(""), LanguageLevel::Intermediate);
        assert_eq!(normalize_language_level("???"), LanguageLevel::Intermediate);
    }

    #[test]
    fn test_language_level_every_synonym() {
        for (expected, synonyms) in LANGUAGE_LEVEL_SYNONYMS {
            for synonym in *synonyms {
                assert_eq!(
                    normalize_language_level(synonym),
                    *expected,
                    "synonym '{synonym}'"
                );
            }
        }
    }

    #[test]
    fn test_clean_string() {
        assert_eq!(clean_string("  Senior   Rust\tEngineer \n"), "Senior Rust Engineer");
        assert_eq!(clean_string(""), "");
        assert_eq!(clean_optional(None), "");
        assert_eq!(clean_optional(Some(" a  b ")), "a b");
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between("2020-01", "2021-03"), Some(14));
        assert_eq!(months_between("2021-03", "2020-01"), Some(-14));
        assert_eq!(months_between("", "2020-01"), None);
    }
}
