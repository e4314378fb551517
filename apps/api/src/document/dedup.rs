//! Ordered union by key: the single dedup primitive behind every set-like collection
//! (skills, tools, languages, certifications, hobbies).
//!
//! The first occurrence of a key wins, including its display casing and details.
//! Merges rely on this: unioning the candidate first makes the candidate's version
//! visible.

use std::collections::HashSet;

use crate::document::models::{Certification, Language, StructuredDocument};
use crate::document::normalize::clean_string;

/// Normalized comparison key: trimmed, whitespace-collapsed, lowercased.
pub fn name_key(name: &str) -> String {
    clean_string(name).to_lowercase()
}

/// Concatenates `lists` in order, keeping only the first item per key.
/// Items whose key is empty are dropped.
pub fn ordered_union_by<T, K>(lists: &[&[T]], key: K) -> Vec<T>
where
    T: Clone,
    K: Fn(&T) -> String,
{
    let mut seen = HashSet::new();
    lists
        .iter()
        .flat_map(|list| list.iter())
        .filter(|item| {
            let k = key(item);
            !k.is_empty() && seen.insert(k)
        })
        .cloned()
        .collect()
}

pub fn union_names(lists: &[&[String]]) -> Vec<String> {
    ordered_union_by(lists, |s| name_key(s))
        .into_iter()
        .map(|s| clean_string(&s))
        .collect()
}

pub fn union_languages(lists: &[&[Language]]) -> Vec<Language> {
    ordered_union_by(lists, |l| name_key(&l.name))
        .into_iter()
        .map(|l| Language {
            name: clean_string(&l.name),
            level: l.level,
        })
        .collect()
}

pub fn union_certifications(lists: &[&[Certification]]) -> Vec<Certification> {
    ordered_union_by(lists, |c| name_key(&c.name))
        .into_iter()
        .map(|c| Certification {
            name: clean_string(&c.name),
            issuer: clean_string(&c.issuer),
            date: c.date,
        })
        .collect()
}

/// Drops from `skills` anything already listed as a tool.
pub fn disjoint_skills(skills: Vec<String>, tools: &[String]) -> Vec<String> {
    let tool_keys: HashSet<String> = tools.iter().map(|t| name_key(t)).collect();
    skills
        .into_iter()
        .filter(|s| !tool_keys.contains(&name_key(s)))
        .collect()
}

/// Applies the collection rules to a single document: every set-like collection is
/// deduplicated and skills are made disjoint from tools.
pub fn dedup_collections(doc: &StructuredDocument) -> StructuredDocument {
    let tools = union_names(&[&doc.tools]);
    let skills = disjoint_skills(union_names(&[&doc.skills]), &tools);
    StructuredDocument {
        skills,
        tools,
        languages: union_languages(&[&doc.languages]),
        certifications: union_certifications(&[&doc.certifications]),
        hobbies: union_names(&[&doc.hobbies]),
        ..doc.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::models::LanguageLevel;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_union_first_casing_wins() {
        let candidate = strings(&["PostgreSQL", "rust"]);
        let original = strings(&["postgresql", "Rust", "Docker"]);
        assert_eq!(
            union_names(&[&candidate, &original]),
            strings(&["PostgreSQL", "rust", "Docker"])
        );
    }

    #[test]
    fn test_union_normalizes_whitespace_in_key() {
        let items = strings(&["Machine  Learning", " machine learning ", ""]);
        assert_eq!(union_names(&[&items]), strings(&["Machine Learning"]));
    }

    #[test]
    fn test_union_languages_keeps_first_level() {
        let candidate = vec![Language {
            name: "English".to_string(),
            level: LanguageLevel::Fluent,
        }];
        let original = vec![
            Language {
                name: "english".to_string(),
                level: LanguageLevel::Native,
            },
            Language {
                name: "French".to_string(),
                level: LanguageLevel::Native,
            },
        ];
        let merged = union_languages(&[&candidate, &original]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].level, LanguageLevel::Fluent);
        assert_eq!(merged[1].name, "French");
    }

    #[test]
    fn test_disjoint_skills_removes_tools() {
        let tools = strings(&["Python"]);
        let skills = strings(&["python", "Agile"]);
        assert_eq!(disjoint_skills(skills, &tools), strings(&["Agile"]));
    }

    #[test]
    fn test_dedup_collections_leaves_entities_untouched() {
        let doc = StructuredDocument {
            summary: "Engineer".to_string(),
            skills: strings(&["Scrum", "scrum"]),
            ..Default::default()
        };
        let deduped = dedup_collections(&doc);
        assert_eq!(deduped.skills, strings(&["Scrum"]));
        assert_eq!(deduped.summary, "Engineer");
    }
}
