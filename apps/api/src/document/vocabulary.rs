//! Synonym tables used by the normalizer and the extractor.
//!
//! Tables are ordered: the first canonical entry whose synonym matches wins, so more
//! specific families come before the ones whose synonyms they contain (e.g. master's
//! "bac+5" before high school's "bac"). All synonyms are lowercase.

use crate::document::models::{ContractType, DegreeLevel, LanguageLevel};

/// Sections the extractor can be in while scanning a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    None,
    Summary,
    Experience,
    Education,
    Skills,
    Languages,
    Certificates,
    Hobbies,
    /// A heading the vocabulary does not know ("Projects", "References"...); its
    /// content is skipped.
    Unrecognized,
}

pub const CONTRACT_TYPE_SYNONYMS: &[(ContractType, &[&str])] = &[
    (
        ContractType::Internship,
        &[
            "internship",
            "stagiaire",
            "stage",
            "apprenti",
            "alternance",
            "apprenticeship",
            "work-study",
        ],
    ),
    (
        ContractType::Freelance,
        &[
            "freelance",
            "free-lance",
            "indépendant",
            "independant",
            "independent",
            "self-employed",
            "auto-entrepreneur",
        ],
    ),
    (
        ContractType::PartTime,
        &["part-time", "part time", "parttime", "temps partiel", "mi-temps"],
    ),
    (
        ContractType::Contract,
        &[
            "cdd",
            "temporary",
            "temporaire",
            "contract",
            "fixed-term",
            "fixed term",
            "intérim",
            "interim",
        ],
    ),
    (
        ContractType::FullTime,
        &["cdi", "permanent", "full-time", "full time", "fulltime", "temps plein"],
    ),
];

pub const DEGREE_SYNONYMS: &[(DegreeLevel, &[&str])] = &[
    (
        DegreeLevel::Phd,
        &["phd", "ph.d", "doctorat", "doctorate", "doctoral", "dphil"],
    ),
    (
        DegreeLevel::Master,
        &[
            "master",
            "mastère",
            "mastere",
            "msc",
            "m.sc",
            "mba",
            "meng",
            "m.eng",
            "bac+5",
            "bac+4",
            "maîtrise",
            "maitrise",
            "dess",
            "ingénieur",
            "ingenieur",
            "engineering degree",
            "grande école",
            "grande ecole",
        ],
    ),
    (
        DegreeLevel::Bachelor,
        &[
            "bachelor",
            "licence",
            "license",
            "bsc",
            "b.sc",
            "beng",
            "b.eng",
            "b.a.",
            "bac+3",
            "undergraduate",
        ],
    ),
    (
        DegreeLevel::Associate,
        &["associate", "bts", "dut", "deug", "bac+2", "hnd"],
    ),
    (
        DegreeLevel::Bootcamp,
        &[
            "bootcamp",
            "boot camp",
            "coding school",
            "formation intensive",
            "nanodegree",
        ],
    ),
    (
        DegreeLevel::HighSchool,
        &[
            "high school",
            "high-school",
            "highschool",
            "baccalauréat",
            "baccalaureat",
            "lycée",
            "lycee",
            "a-levels",
            "a levels",
            "bac",
        ],
    ),
];

pub const LANGUAGE_LEVEL_SYNONYMS: &[(LanguageLevel, &[&str])] = &[
    (
        LanguageLevel::Native,
        &[
            "native",
            "natif",
            "langue maternelle",
            "maternelle",
            "mother tongue",
            "bilingual",
            "bilingue",
        ],
    ),
    (
        LanguageLevel::Fluent,
        &[
            "fluent",
            "courant",
            "couramment",
            "c1",
            "c2",
            "advanced",
            "avancé",
            "avance",
            "professional",
            "professionnel",
            "proficient",
            "full working",
        ],
    ),
    (
        LanguageLevel::Intermediate,
        &[
            "intermediate",
            "intermédiaire",
            "intermediaire",
            "b1",
            "b2",
            "conversational",
            "working knowledge",
            "moyen",
        ],
    ),
    (
        LanguageLevel::Beginner,
        &[
            "beginner",
            "débutant",
            "debutant",
            "a1",
            "a2",
            "basic",
            "basique",
            "notions",
            "elementary",
            "élémentaire",
            "scolaire",
        ],
    ),
];

/// Month names (English and French, full and abbreviated) by month number.
pub const MONTH_NAMES: &[(u32, &[&str])] = &[
    (1, &["january", "jan", "janvier", "janv"]),
    (2, &["february", "feb", "février", "fevrier", "févr", "fevr"]),
    (3, &["march", "mar", "mars"]),
    (4, &["april", "apr", "avril", "avr"]),
    (5, &["may", "mai"]),
    (6, &["june", "jun", "juin"]),
    (7, &["july", "jul", "juillet", "juil"]),
    (8, &["august", "aug", "août", "aout"]),
    (9, &["september", "sep", "sept", "septembre"]),
    (10, &["october", "oct", "octobre"]),
    (11, &["november", "nov", "novembre"]),
    (12, &["december", "dec", "décembre", "decembre", "déc"]),
];

/// End-of-range words meaning the position is ongoing.
pub const CURRENT_MARKERS: &[&str] = &[
    "present",
    "présent",
    "current",
    "currently",
    "actuel",
    "actuellement",
    "aujourd'hui",
    "aujourdhui",
    "now",
    "ongoing",
    "en cours",
    "today",
    "à ce jour",
];

/// Section-title vocabulary. A level-1 heading containing any synonym switches section.
pub const SECTION_TITLES: &[(Section, &[&str])] = &[
    (
        Section::Experience,
        &[
            "experience",
            "expérience",
            "employment",
            "work history",
            "parcours professionnel",
            "emplois",
        ],
    ),
    (
        Section::Education,
        &[
            "education",
            "éducation",
            "formation",
            "études",
            "etudes",
            "academic",
            "diplômes",
            "diplomes",
            "scolarité",
        ],
    ),
    (
        Section::Languages,
        &["languages", "language", "langues", "linguistique"],
    ),
    (
        Section::Skills,
        &[
            "skills",
            "compétences",
            "competences",
            "technologies",
            "tools",
            "outils",
            "expertise",
        ],
    ),
    (
        Section::Certificates,
        &["certification", "certificat", "certificate", "licenses", "accreditation"],
    ),
    (
        Section::Hobbies,
        &[
            "hobbies",
            "interests",
            "centres d'intérêt",
            "centres d'interet",
            "loisirs",
            "intérêts",
            "activities",
        ],
    ),
    (
        Section::Summary,
        &[
            "summary",
            "profile",
            "profil",
            "about",
            "objective",
            "objectif",
            "à propos",
            "a propos",
            "résumé",
        ],
    ),
];

// ────────────────────────────────────────────────────────────────────────────
// Labels for "Key: value" lines
// ────────────────────────────────────────────────────────────────────────────

pub const EMAIL_LABELS: &[&str] = &["email", "e-mail", "mail", "courriel"];
pub const PHONE_LABELS: &[&str] = &["phone", "téléphone", "telephone", "tel", "tél", "mobile"];
pub const LOCATION_LABELS: &[&str] = &[
    "location",
    "localisation",
    "lieu",
    "city",
    "ville",
    "address",
    "adresse",
];
pub const LINKEDIN_LABELS: &[&str] = &["linkedin"];
pub const GITHUB_LABELS: &[&str] = &["github"];
pub const WEBSITE_LABELS: &[&str] = &["website", "site", "portfolio", "web"];
pub const HEADLINE_LABELS: &[&str] = &["headline", "titre", "title"];
pub const INDUSTRY_LABELS: &[&str] = &["industry", "secteur", "sector"];
pub const CONTRACT_LABELS: &[&str] = &["contract", "contrat", "type de contrat", "employment type"];
pub const FIELD_LABELS: &[&str] = &["field", "domaine", "spécialité", "specialite", "major", "filière"];

/// A labeled skills item routes to `tools` when its label contains one of these.
pub const TOOL_BUCKET_LABELS: &[&str] = &[
    "tool",
    "outil",
    "technical",
    "technique",
    "technolog",
    "stack",
    "programming",
    "framework",
    "logiciel",
    "software",
    "hard skills",
];

/// Labels accepted for the soft-skill bucket of a skills item.
pub const SKILL_BUCKET_LABELS: &[&str] = &[
    "skills",
    "soft skills",
    "compétences",
    "competences",
    "methodolog",
    "méthodolog",
    "savoir-être",
];

/// Returns the first canonical value whose synonym is a substring of `haystack`.
pub fn lookup_substring<T: Copy>(table: &[(T, &[&str])], haystack: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, synonyms)| synonyms.iter().any(|s| haystack.contains(s)))
        .map(|(canonical, _)| *canonical)
}

/// Returns the first canonical value with a synonym exactly equal to `word`.
pub fn lookup_exact<T: Copy>(table: &[(T, &[&str])], word: &str) -> Option<T> {
    table
        .iter()
        .find(|(_, synonyms)| synonyms.contains(&word))
        .map(|(canonical, _)| *canonical)
}

pub fn label_in(labels: &[&str], label: &str) -> bool {
    labels.contains(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_substring_first_family_wins() {
        // "bac+5" contains "bac" but master is listed before high school.
        assert_eq!(
            lookup_substring(DEGREE_SYNONYMS, "bac+5"),
            Some(DegreeLevel::Master)
        );
        assert_eq!(
            lookup_substring(DEGREE_SYNONYMS, "bac s"),
            Some(DegreeLevel::HighSchool)
        );
    }

    #[test]
    fn test_lookup_exact_month() {
        assert_eq!(lookup_exact(MONTH_NAMES, "août"), Some(8));
        assert_eq!(lookup_exact(MONTH_NAMES, "sept"), Some(9));
        assert_eq!(lookup_exact(MONTH_NAMES, "septem"), None);
    }

    #[test]
    fn test_every_month_has_english_and_french_name() {
        assert_eq!(MONTH_NAMES.len(), 12);
        for (n, names) in MONTH_NAMES {
            assert!(names.len() >= 2, "month {n} needs at least two names");
        }
    }

    #[test]
    fn test_tables_are_lowercase() {
        let all: Vec<&str> = CONTRACT_TYPE_SYNONYMS
            .iter()
            .flat_map(|(_, s)| s.iter().copied())
            .chain(DEGREE_SYNONYMS.iter().flat_map(|(_, s)| s.iter().copied()))
            .chain(LANGUAGE_LEVEL_SYNONYMS.iter().flat_map(|(_, s)| s.iter().copied()))
            .chain(SECTION_TITLES.iter().flat_map(|(_, s)| s.iter().copied()))
            .collect();
        for synonym in all {
            assert_eq!(synonym, synonym.to_lowercase(), "synonym '{synonym}'");
        }
    }
}
