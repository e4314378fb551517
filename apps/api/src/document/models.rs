use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

/// Employment contract of an experience.
///
/// Unrecognized or empty input resolves to [`ContractType::DEFAULT`] (full-time).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Freelance,
    Internship,
}

impl ContractType {
    pub const DEFAULT: ContractType = ContractType::FullTime;

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::FullTime => "full-time",
            ContractType::PartTime => "part-time",
            ContractType::Contract => "contract",
            ContractType::Freelance => "freelance",
            ContractType::Internship => "internship",
        }
    }
}

/// Highest-level classification of an education entry.
///
/// Unrecognized input resolves to [`DegreeLevel::DEFAULT`] (other).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegreeLevel {
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Phd,
    Bootcamp,
    #[default]
    Other,
}

impl DegreeLevel {
    pub const DEFAULT: DegreeLevel = DegreeLevel::Other;

    pub fn as_str(&self) -> &'static str {
        match self {
            DegreeLevel::HighSchool => "high-school",
            DegreeLevel::Associate => "associate",
            DegreeLevel::Bachelor => "bachelor",
            DegreeLevel::Master => "master",
            DegreeLevel::Phd => "phd",
            DegreeLevel::Bootcamp => "bootcamp",
            DegreeLevel::Other => "other",
        }
    }

    /// Heading label used by the serializer. Normalizes back to the same level.
    pub fn label(&self) -> &'static str {
        match self {
            DegreeLevel::HighSchool => "High School",
            DegreeLevel::Associate => "Associate Degree",
            DegreeLevel::Bachelor => "Bachelor",
            DegreeLevel::Master => "Master",
            DegreeLevel::Phd => "PhD",
            DegreeLevel::Bootcamp => "Bootcamp",
            DegreeLevel::Other => "Other",
        }
    }

    /// phd > master > bachelor > associate > bootcamp > high-school > other
    pub fn rank(&self) -> u8 {
        match self {
            DegreeLevel::Phd => 6,
            DegreeLevel::Master => 5,
            DegreeLevel::Bachelor => 4,
            DegreeLevel::Associate => 3,
            DegreeLevel::Bootcamp => 2,
            DegreeLevel::HighSchool => 1,
            DegreeLevel::Other => 0,
        }
    }
}

/// Spoken-language proficiency.
///
/// Unspecified or unrecognized input resolves to [`LanguageLevel::DEFAULT`] (intermediate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageLevel {
    Native,
    Fluent,
    #[default]
    Intermediate,
    Beginner,
}

impl LanguageLevel {
    pub const DEFAULT: LanguageLevel = LanguageLevel::Intermediate;

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageLevel::Native => "native",
            LanguageLevel::Fluent => "fluent",
            LanguageLevel::Intermediate => "intermediate",
            LanguageLevel::Beginner => "beginner",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            LanguageLevel::Native => 4,
            LanguageLevel::Fluent => 3,
            LanguageLevel::Intermediate => 2,
            LanguageLevel::Beginner => 1,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entities
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
    pub headline: String,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Field-by-field: `self` wins when non-empty, else `fallback`.
    pub fn or_fallback(&self, fallback: &PersonalInfo) -> PersonalInfo {
        fn pick(primary: &str, fallback: &str) -> String {
            if primary.is_empty() {
                fallback.to_string()
            } else {
                primary.to_string()
            }
        }
        PersonalInfo {
            first_name: pick(&self.first_name, &fallback.first_name),
            last_name: pick(&self.last_name, &fallback.last_name),
            email: pick(&self.email, &fallback.email),
            phone: pick(&self.phone, &fallback.phone),
            location: pick(&self.location, &fallback.location),
            linkedin: pick(&self.linkedin, &fallback.linkedin),
            github: pick(&self.github, &fallback.github),
            website: pick(&self.website, &fallback.website),
            headline: pick(&self.headline, &fallback.headline),
        }
    }
}

/// Two experiences with equal keys are the same role, whatever their bullets say.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExperienceKey {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub industry: String,
    pub contract_type: ContractType,
    pub location: String,
    pub responsibilities: Vec<String>,
}

impl Experience {
    pub fn identity_key(&self) -> ExperienceKey {
        ExperienceKey {
            title: self.title.to_lowercase(),
            company: self.company.to_lowercase(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EducationKey {
    pub degree: String,
    pub institution: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub degree: DegreeLevel,
    pub field: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

impl Education {
    pub fn identity_key(&self) -> EducationKey {
        EducationKey {
            degree: self.degree.as_str().to_lowercase(),
            institution: self.institution.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub name: String,
    pub level: LanguageLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

/// Canonical in-memory résumé.
///
/// Produced fresh by every extraction or merge; callers build a new value instead of
/// editing one in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuredDocument {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
    pub skills: Vec<String>,
    pub tools: Vec<String>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
    pub hobbies: Vec<String>,
}

impl StructuredDocument {
    pub fn is_empty(&self) -> bool {
        *self == StructuredDocument::default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profile preferences (work-style tags)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagementExperience {
    pub has_experience: bool,
    pub team_size: String,
}

/// Profile preference fields stored outside the résumé itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub work_preference: String,
    pub management_experience: ManagementExperience,
    pub preferred_environment: Vec<String>,
    /// Fallback for role-type tagging when the document has no title.
    pub target_position: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_type_serde_kebab_case() {
        let json = serde_json::to_string(&ContractType::PartTime).unwrap();
        assert_eq!(json, r#""part-time""#);
        let parsed: ContractType = serde_json::from_str(r#""full-time""#).unwrap();
        assert_eq!(parsed, ContractType::FullTime);
    }

    #[test]
    fn test_degree_serde_high_school() {
        let json = serde_json::to_string(&DegreeLevel::HighSchool).unwrap();
        assert_eq!(json, r#""high-school""#);
    }

    #[test]
    fn test_enum_defaults_are_named_constants() {
        assert_eq!(ContractType::default(), ContractType::DEFAULT);
        assert_eq!(DegreeLevel::default(), DegreeLevel::DEFAULT);
        assert_eq!(LanguageLevel::default(), LanguageLevel::DEFAULT);
        assert_eq!(LanguageLevel::DEFAULT, LanguageLevel::Intermediate);
    }

    #[test]
    fn test_experience_identity_key_ignores_case_and_bullets() {
        let a = Experience {
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: "2020-01".to_string(),
            responsibilities: vec!["Built things".to_string()],
            ..Default::default()
        };
        let b = Experience {
            title: "backend engineer".to_string(),
            company: "ACME".to_string(),
            start_date: "2020-01".to_string(),
            responsibilities: vec![],
            ..Default::default()
        };
        assert_eq!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn test_document_camel_case_json() {
        let doc = StructuredDocument {
            personal_info: PersonalInfo {
                first_name: "Ada".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["personalInfo"]["firstName"], "Ada");
        assert!(value["experiences"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_personal_info_fallback_per_field() {
        let candidate = PersonalInfo {
            email: "new@example.com".to_string(),
            ..Default::default()
        };
        let original = PersonalInfo {
            first_name: "Ada".to_string(),
            email: "old@example.com".to_string(),
            ..Default::default()
        };
        let merged = candidate.or_fallback(&original);
        assert_eq!(merged.first_name, "Ada");
        assert_eq!(merged.email, "new@example.com");
    }
}
