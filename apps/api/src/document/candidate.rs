//! Candidate Reader: turns whatever the upstream generator produced into a
//! [`StructuredDocument`].
//!
//! Accepts a JSON object (bare or inside a markdown code fence) or free text. JSON is
//! read field by field from a [`serde_json::Value`], so a wrong type or a null in one
//! field only loses that field. Anything that is not a JSON object goes through the
//! text extractor.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::document::dedup::dedup_collections;
use crate::document::extractor::{
    extract, is_current_marker, parse_certification, parse_language, split_list,
};
use crate::document::models::{
    Certification, Education, Experience, Language, PersonalInfo, StructuredDocument,
};
use crate::document::normalize::{
    clean_optional, clean_string, normalize_contract_type, normalize_date, normalize_degree,
    normalize_language_level,
};

lazy_static! {
    static ref BULLET_PREFIX: Regex = Regex::new(r"^(?:[-*•–·]|\d{1,2}[.)])\s+").unwrap();
}

/// Reads a candidate payload given as raw text.
pub fn read_candidate(payload: &str) -> StructuredDocument {
    let body = strip_json_fences(payload);
    if body.starts_with('{') {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => return document_from_value(&value),
            Err(e) => warn!("Candidate payload looks like JSON but does not parse ({e}); reading it as text"),
        }
    }
    extract(payload)
}

/// Reads a candidate that already arrived as JSON: an object is read field by field,
/// a string goes through [`read_candidate`].
pub fn read_candidate_value(value: &Value) -> StructuredDocument {
    match value {
        Value::Object(_) => document_from_value(value),
        Value::String(text) => read_candidate(text),
        Value::Null => StructuredDocument::default(),
        other => {
            warn!("Ignoring candidate of unexpected JSON type: {}", json_type(other));
            StructuredDocument::default()
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences around a payload.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text.strip_prefix("```") else {
        return text;
    };
    let stripped = stripped.strip_prefix("json").unwrap_or(stripped);
    stripped
        .trim_start()
        .strip_suffix("```")
        .map(|s| s.trim())
        .unwrap_or(stripped.trim())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ──── Lenient field access ────

/// First non-null value among `keys`.
fn field<'a>(obj: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| obj.get(*k)).find(|v| !v.is_null())
}

/// Strings are cleaned, numbers stringified, everything else is absent.
fn text(obj: &Value, keys: &[&str]) -> String {
    match field(obj, keys) {
        Some(Value::Number(n)) => n.to_string(),
        other => clean_optional(other.and_then(Value::as_str)),
    }
}

fn flag(obj: &Value, keys: &[&str]) -> bool {
    match field(obj, keys) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "oui"),
        _ => false,
    }
}

/// Array items, or a lone non-null value treated as a one-item list.
fn items<'a>(obj: &'a Value, keys: &[&str]) -> Vec<&'a Value> {
    match field(obj, keys) {
        Some(Value::Array(values)) => values.iter().filter(|v| !v.is_null()).collect(),
        Some(value) => vec![value],
        None => Vec::new(),
    }
}

/// Lines of a multi-line string or array of strings, bullet markers removed.
fn lines(obj: &Value, keys: &[&str]) -> Vec<String> {
    items(obj, keys)
        .into_iter()
        .filter_map(|v| v.as_str())
        .flat_map(|s| s.lines())
        .map(|l| clean_string(&BULLET_PREFIX.replace(l.trim(), "")))
        .filter(|l| !l.is_empty())
        .collect()
}

/// Names from strings (comma lists allowed) or `{name: ...}` objects.
fn names(obj: &Value, keys: &[&str]) -> Vec<String> {
    items(obj, keys)
        .into_iter()
        .flat_map(|v| match v {
            Value::String(s) => split_list(s),
            Value::Object(_) => {
                let name = text(v, &["name", "label", "title", "skill"]);
                if name.is_empty() {
                    Vec::new()
                } else {
                    vec![name]
                }
            }
            _ => Vec::new(),
        })
        .collect()
}

// ──── Document ────

fn document_from_value(value: &Value) -> StructuredDocument {
    if !value.is_object() {
        warn!("Candidate JSON is a {}, not an object", json_type(value));
        return StructuredDocument::default();
    }

    let info_source = field(value, &["personalInfo", "personal_info", "contact", "basics"])
        .filter(|v| v.is_object())
        .unwrap_or(value);

    let doc = StructuredDocument {
        personal_info: personal_info_from(info_source),
        summary: text(value, &["summary", "profile", "about", "objective"]),
        experiences: items(value, &["experiences", "experience", "workExperience", "work_experience", "work"])
            .into_iter()
            .filter(|v| v.is_object())
            .map(experience_from)
            .collect(),
        educations: items(value, &["educations", "education"])
            .into_iter()
            .filter(|v| v.is_object())
            .map(education_from)
            .collect(),
        skills: names(value, &["skills", "softSkills", "soft_skills"]),
        tools: names(value, &["tools", "technologies", "techStack", "tech_stack"]),
        languages: items(value, &["languages", "langues"])
            .into_iter()
            .filter_map(language_from)
            .collect(),
        certifications: items(value, &["certifications", "certificates", "certificats"])
            .into_iter()
            .filter_map(certification_from)
            .collect(),
        hobbies: names(value, &["hobbies", "interests", "loisirs"]),
    };

    let doc = dedup_collections(&doc);
    debug!(
        "Read candidate JSON: experiences={}, educations={}",
        doc.experiences.len(),
        doc.educations.len()
    );
    doc
}

fn personal_info_from(obj: &Value) -> PersonalInfo {
    let mut first_name = text(obj, &["firstName", "first_name", "givenName"]);
    let mut last_name = text(obj, &["lastName", "last_name", "familyName"]);
    if first_name.is_empty() && last_name.is_empty() {
        let full = text(obj, &["name", "fullName", "full_name"]);
        let mut words = full.split_whitespace();
        first_name = words.next().unwrap_or_default().to_string();
        last_name = words.collect::<Vec<_>>().join(" ");
    }
    PersonalInfo {
        first_name,
        last_name,
        email: text(obj, &["email", "mail"]),
        phone: text(obj, &["phone", "telephone", "mobile"]),
        location: text(obj, &["location", "city", "address"]),
        linkedin: text(obj, &["linkedin", "linkedIn", "linkedinUrl"]),
        github: text(obj, &["github", "gitHub", "githubUrl"]),
        website: text(obj, &["website", "portfolio", "url"]),
        headline: text(obj, &["headline", "title", "label"]),
    }
}

/// Start, end and `current` with the ongoing-marker rule applied.
fn dates_from(obj: &Value) -> (String, String, bool) {
    let start = text(obj, &["startDate", "start_date", "start", "from"]);
    let end_raw = text(obj, &["endDate", "end_date", "end", "to"]);
    let current = flag(obj, &["current", "isCurrent", "is_current", "ongoing"])
        || (!end_raw.is_empty() && is_current_marker(&end_raw));
    let end = if current {
        String::new()
    } else {
        normalize_date(&end_raw)
    };
    (normalize_date(&start), end, current)
}

fn experience_from(obj: &Value) -> Experience {
    let (start_date, end_date, current) = dates_from(obj);
    Experience {
        title: text(obj, &["title", "position", "role", "jobTitle", "job_title"]),
        company: text(obj, &["company", "employer", "organization", "organisation"]),
        start_date,
        end_date,
        current,
        industry: text(obj, &["industry", "sector"]),
        contract_type: normalize_contract_type(&text(
            obj,
            &["contractType", "contract_type", "contract", "employmentType"],
        )),
        location: text(obj, &["location", "city"]),
        responsibilities: lines(
            obj,
            &[
                "responsibilities",
                "bullets",
                "highlights",
                "achievements",
                "description",
            ],
        ),
    }
}

fn education_from(obj: &Value) -> Education {
    let (start_date, end_date, current) = dates_from(obj);
    Education {
        degree: normalize_degree(&text(obj, &["degree", "diploma", "level", "studyType"])),
        field: text(obj, &["field", "fieldOfStudy", "field_of_study", "major", "area"]),
        institution: text(obj, &["institution", "school", "university", "establishment"]),
        start_date,
        end_date,
        current,
        description: lines(obj, &["description", "details", "highlights"]).join("\n"),
    }
}

fn language_from(value: &Value) -> Option<Language> {
    match value {
        Value::String(s) => parse_language(s),
        Value::Object(_) => {
            let name = text(value, &["name", "language", "langue"]);
            if name.is_empty() {
                return None;
            }
            Some(Language {
                name,
                level: normalize_language_level(&text(value, &["level", "proficiency", "fluency"])),
            })
        }
        _ => None,
    }
}

fn certification_from(value: &Value) -> Option<Certification> {
    match value {
        Value::String(s) => parse_certification(s),
        Value::Object(_) => {
            let name = text(value, &["name", "title"]);
            if name.is_empty() {
                return None;
            }
            Some(Certification {
                name,
                issuer: text(value, &["issuer", "organization", "authority"]),
                date: normalize_date(&text(value, &["date", "year", "issued"])),
            })
        }
        _ => None,
    }
}
