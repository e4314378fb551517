//! Completeness Merge Engine: combines an original document with a candidate rewrite.
//!
//! # Guarantees
//! - Every experience/education identity key of the original is present in the merge,
//!   at least as many times as in the original
//! - Experiences keep the candidate's wording where the candidate has the entity
//! - Every experience respects the [`PageBudget`]
//! - Candidate educations are kept as written; restored ones are truncated
//! - Set-like collections are unions, candidate first
//!
//! Pure and deterministic: same inputs, same output.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;

use serde::Serialize;
use tracing::info;

use crate::document::dedup::{
    dedup_collections, disjoint_skills, union_certifications, union_languages, union_names,
};
use crate::document::models::{Education, Experience, StructuredDocument};
use crate::document::normalize::clean_string;
use crate::layout::PageBudget;

/// What the merge had to do to keep the candidate complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    pub experiences_from_candidate: usize,
    pub experiences_restored: usize,
    pub educations_from_candidate: usize,
    pub educations_restored: usize,
    pub bullets_topped_up: usize,
    pub bullets_trimmed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Merged {
    pub document: StructuredDocument,
    pub report: MergeReport,
}

pub fn merge(
    original: &StructuredDocument,
    candidate: &StructuredDocument,
    budget: &PageBudget,
) -> Merged {
    let mut report = MergeReport::default();

    // ──── Experiences ────
    let (exp_pairs, exp_unpaired) = pair_by_key(
        &original.experiences,
        &candidate.experiences,
        Experience::identity_key,
    );
    let mut experiences = Vec::with_capacity(candidate.experiences.len() + exp_unpaired.len());
    for (exp, counterpart) in candidate.experiences.iter().zip(&exp_pairs) {
        let mut trimmed = budget_experience(exp, budget, &mut report);
        if let Some(i) = counterpart {
            report.bullets_topped_up += top_up(&mut trimmed, &original.experiences[*i], budget);
        }
        experiences.push(trimmed);
    }
    report.experiences_from_candidate = candidate.experiences.len();
    report.experiences_restored = exp_unpaired.len();
    for i in exp_unpaired {
        experiences.push(budget_experience(&original.experiences[i], budget, &mut report));
    }

    // ──── Educations ────
    let (_, edu_unpaired) = pair_by_key(
        &original.educations,
        &candidate.educations,
        Education::identity_key,
    );
    report.educations_from_candidate = candidate.educations.len();
    report.educations_restored = edu_unpaired.len();
    // Candidate educations stay as written; only restored originals are truncated.
    let educations = candidate
        .educations
        .iter()
        .cloned()
        .chain(
            edu_unpaired
                .iter()
                .map(|i| budget_education(&original.educations[*i], budget)),
        )
        .collect();

    // ──── Collections and scalars ────
    let tools = union_names(&[&candidate.tools, &original.tools]);
    let skills = disjoint_skills(union_names(&[&candidate.skills, &original.skills]), &tools);

    let document = StructuredDocument {
        personal_info: candidate.personal_info.or_fallback(&original.personal_info),
        summary: if candidate.summary.is_empty() {
            original.summary.clone()
        } else {
            candidate.summary.clone()
        },
        experiences,
        educations,
        skills,
        tools,
        languages: union_languages(&[&candidate.languages, &original.languages]),
        certifications: union_certifications(&[&candidate.certifications, &original.certifications]),
        hobbies: union_names(&[&candidate.hobbies, &original.hobbies]),
    };

    info!(
        "Merged document: {} experiences ({} restored), {} educations ({} restored), {} bullets topped up",
        document.experiences.len(),
        report.experiences_restored,
        document.educations.len(),
        report.educations_restored,
        report.bullets_topped_up
    );

    Merged { document, report }
}

/// Trims a single document to the budget: experience bullets, education descriptions,
/// then the collection dedup rules.
pub fn apply_budget(doc: &StructuredDocument, budget: &PageBudget) -> StructuredDocument {
    let mut report = MergeReport::default();
    let trimmed = StructuredDocument {
        experiences: doc
            .experiences
            .iter()
            .map(|exp| budget_experience(exp, budget, &mut report))
            .collect(),
        educations: doc
            .educations
            .iter()
            .map(|edu| budget_education(edu, budget))
            .collect(),
        ..doc.clone()
    };
    dedup_collections(&trimmed)
}

/// Pairs each candidate with the first still-unpaired original of the same key.
///
/// Returns the original index paired with each candidate, and the originals left
/// unpaired, in document order.
fn pair_by_key<T, K, F>(originals: &[T], candidates: &[T], key: F) -> (Vec<Option<usize>>, Vec<usize>)
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut pending: HashMap<K, VecDeque<usize>> = HashMap::new();
    for (i, item) in originals.iter().enumerate() {
        pending.entry(key(item)).or_default().push_back(i);
    }

    let pairs: Vec<Option<usize>> = candidates
        .iter()
        .map(|c| pending.get_mut(&key(c)).and_then(|queue| queue.pop_front()))
        .collect();

    let paired: HashSet<usize> = pairs.iter().flatten().copied().collect();
    let unpaired = (0..originals.len()).filter(|i| !paired.contains(i)).collect();
    (pairs, unpaired)
}

fn budget_experience(exp: &Experience, budget: &PageBudget, report: &mut MergeReport) -> Experience {
    let responsibilities = budget.trim_bullets(&exp.responsibilities);
    let before = exp
        .responsibilities
        .iter()
        .filter(|b| !b.trim().is_empty())
        .count();
    report.bullets_trimmed += before.saturating_sub(responsibilities.len());
    Experience {
        responsibilities,
        ..exp.clone()
    }
}

fn budget_education(edu: &Education, budget: &PageBudget) -> Education {
    Education {
        description: budget.truncate_description(&edu.description),
        ..edu.clone()
    }
}

/// Adds bullets from the original counterpart until the experience reaches
/// `min_bullets`. Returns how many were added.
fn top_up(exp: &mut Experience, source: &Experience, budget: &PageBudget) -> usize {
    if exp.responsibilities.len() >= budget.min_bullets {
        return 0;
    }
    let mut seen: HashSet<String> = exp
        .responsibilities
        .iter()
        .map(|b| b.to_lowercase())
        .collect();
    let mut added = 0;
    for bullet in &source.responsibilities {
        if exp.responsibilities.len() >= budget.min_bullets {
            break;
        }
        let bullet = budget.cap_words(&clean_string(bullet));
        if !bullet.is_empty() && seen.insert(bullet.to_lowercase()) {
            exp.responsibilities.push(bullet);
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::models::{DegreeLevel, Language, LanguageLevel, PersonalInfo};
    use pretty_assertions::assert_eq;

    fn bullets(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix} bullet {i}")).collect()
    }

    fn experience(title: &str, company: &str, n: usize) -> Experience {
        Experience {
            title: title.to_string(),
            company: company.to_string(),
            start_date: "2020-01".to_string(),
            responsibilities: bullets(title, n),
            ..Default::default()
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_restores_dropped_experience() {
        let original = StructuredDocument {
            experiences: vec![
                experience("Lead", "Acme", 6),
                experience("Dev", "Globex", 4),
                experience("Intern", "Initech", 3),
            ],
            ..Default::default()
        };
        let candidate = StructuredDocument {
            experiences: vec![experience("Lead", "Acme", 4), experience("Dev", "Globex", 5)],
            ..Default::default()
        };
        let merged = merge(&original, &candidate, &PageBudget::default());

        let titles: Vec<&str> = merged
            .document
            .experiences
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Lead", "Dev", "Intern"]);
        for exp in &merged.document.experiences {
            assert!((3..=5).contains(&exp.responsibilities.len()));
        }
        assert_eq!(merged.report.experiences_restored, 1);
        assert_eq!(merged.report.experiences_from_candidate, 2);
    }

    #[test]
    fn test_candidate_wording_wins_for_matched_entity() {
        let original = StructuredDocument {
            experiences: vec![experience("Dev", "Acme", 3)],
            ..Default::default()
        };
        let mut rewritten = experience("dev", "ACME", 3);
        rewritten.responsibilities = strings(&["Rewritten one", "Rewritten two", "Rewritten three"]);
        let candidate = StructuredDocument {
            experiences: vec![rewritten.clone()],
            ..Default::default()
        };
        let merged = merge(&original, &candidate, &PageBudget::default());
        assert_eq!(merged.document.experiences, vec![rewritten]);
    }

    #[test]
    fn test_duplicate_keys_are_counted() {
        let original = StructuredDocument {
            experiences: vec![experience("Dev", "Acme", 3), experience("Dev", "Acme", 3)],
            ..Default::default()
        };
        let candidate = StructuredDocument {
            experiences: vec![experience("Dev", "Acme", 3)],
            ..Default::default()
        };
        let merged = merge(&original, &candidate, &PageBudget::default());
        assert_eq!(merged.document.experiences.len(), 2);
        assert_eq!(merged.report.experiences_restored, 1);
    }

    #[test]
    fn test_top_up_from_original_counterpart() {
        let mut original_exp = experience("Dev", "Acme", 0);
        original_exp.responsibilities = strings(&["Shipped search", "Cut latency", "Mentored juniors"]);
        let mut candidate_exp = experience("Dev", "Acme", 0);
        candidate_exp.responsibilities = strings(&["shipped search"]);

        let merged = merge(
            &StructuredDocument {
                experiences: vec![original_exp],
                ..Default::default()
            },
            &StructuredDocument {
                experiences: vec![candidate_exp],
                ..Default::default()
            },
            &PageBudget::default(),
        );
        assert_eq!(
            merged.document.experiences[0].responsibilities,
            strings(&["shipped search", "Cut latency", "Mentored juniors"])
        );
        assert_eq!(merged.report.bullets_topped_up, 2);
    }

    #[test]
    fn test_no_top_up_without_counterpart() {
        let candidate = StructuredDocument {
            experiences: vec![experience("Founder", "Startup", 1)],
            ..Default::default()
        };
        let merged = merge(&StructuredDocument::default(), &candidate, &PageBudget::default());
        assert_eq!(merged.document.experiences[0].responsibilities.len(), 1);
    }

    #[test]
    fn test_restored_education_description_truncated() {
        let long = "x".repeat(500);
        let original = StructuredDocument {
            educations: vec![Education {
                degree: DegreeLevel::Master,
                institution: "ENS".to_string(),
                description: long,
                ..Default::default()
            }],
            ..Default::default()
        };
        let merged = merge(&original, &StructuredDocument::default(), &PageBudget::default());
        assert_eq!(merged.document.educations[0].description.chars().count(), 300);
        assert_eq!(merged.report.educations_restored, 1);
    }

    #[test]
    fn test_candidate_education_description_kept_as_written() {
        let long = "y".repeat(400);
        let education = Education {
            degree: DegreeLevel::Master,
            institution: "ENS".to_string(),
            description: long.clone(),
            ..Default::default()
        };
        let original = StructuredDocument {
            educations: vec![education.clone()],
            ..Default::default()
        };
        let candidate = StructuredDocument {
            educations: vec![education],
            ..Default::default()
        };
        let merged = merge(&original, &candidate, &PageBudget::default());
        assert_eq!(merged.document.educations.len(), 1);
        assert_eq!(merged.document.educations[0].description, long);
        assert_eq!(merged.report.educations_restored, 0);
    }

    #[test]
    fn test_collections_union_candidate_first() {
        let original = StructuredDocument {
            skills: strings(&["Agile", "python"]),
            tools: strings(&["Docker"]),
            languages: vec![Language {
                name: "French".to_string(),
                level: LanguageLevel::Native,
            }],
            hobbies: strings(&["Chess"]),
            ..Default::default()
        };
        let candidate = StructuredDocument {
            tools: strings(&["Python"]),
            languages: vec![Language {
                name: "french".to_string(),
                level: LanguageLevel::Fluent,
            }],
            ..Default::default()
        };
        let merged = merge(&original, &candidate, &PageBudget::default()).document;
        assert_eq!(merged.tools, strings(&["Python", "Docker"]));
        assert_eq!(merged.skills, strings(&["Agile"]));
        assert_eq!(merged.languages.len(), 1);
        assert_eq!(merged.languages[0].level, LanguageLevel::Fluent);
        assert_eq!(merged.hobbies, strings(&["Chess"]));
    }

    #[test]
    fn test_scalars_fall_back_to_original() {
        let original = StructuredDocument {
            personal_info: PersonalInfo {
                first_name: "Ada".to_string(),
                email: "ada@old.dev".to_string(),
                ..Default::default()
            },
            summary: "Original summary".to_string(),
            ..Default::default()
        };
        let candidate = StructuredDocument {
            personal_info: PersonalInfo {
                email: "ada@new.dev".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let merged = merge(&original, &candidate, &PageBudget::default()).document;
        assert_eq!(merged.personal_info.first_name, "Ada");
        assert_eq!(merged.personal_info.email, "ada@new.dev");
        assert_eq!(merged.summary, "Original summary");
    }

    #[test]
    fn test_long_bullets_capped() {
        let mut exp = experience("Dev", "Acme", 0);
        exp.responsibilities = vec![(0..40).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")];
        let doc = StructuredDocument {
            experiences: vec![exp],
            ..Default::default()
        };
        let trimmed = apply_budget(&doc, &PageBudget::default());
        assert_eq!(
            trimmed.experiences[0].responsibilities[0].split_whitespace().count(),
            20
        );
    }

    mod proptests {
        use super::*;
        use crate::document::models::ExperienceKey;
        use proptest::prelude::*;

        fn experience_strategy() -> impl Strategy<Value = Experience> {
            (
                prop::sample::select(vec!["Dev", "Lead", "Analyst"]),
                prop::sample::select(vec!["Acme", "Globex"]),
                prop::sample::select(vec!["", "2019-01", "2021-06"]),
                prop::collection::vec("[a-z]{1,6}( [a-z]{1,6}){0,30}", 0..9),
            )
                .prop_map(|(title, company, start, responsibilities)| Experience {
                    title: title.to_string(),
                    company: company.to_string(),
                    start_date: start.to_string(),
                    responsibilities,
                    ..Default::default()
                })
        }

        fn education_strategy() -> impl Strategy<Value = Education> {
            (
                prop::sample::select(vec![DegreeLevel::Master, DegreeLevel::Bachelor]),
                prop::sample::select(vec!["MIT", "ENS"]),
                "[a-z ]{0,400}",
            )
                .prop_map(|(degree, institution, description)| Education {
                    degree,
                    institution: institution.to_string(),
                    description,
                    ..Default::default()
                })
        }

        fn document_strategy() -> impl Strategy<Value = StructuredDocument> {
            let names = || prop::collection::vec(prop::sample::select(vec!["Rust", "rust", "Go", "SQL", "Agile"]), 0..5);
            (
                prop::collection::vec(experience_strategy(), 0..5),
                prop::collection::vec(education_strategy(), 0..3),
                names(),
                names(),
            )
                .prop_map(|(experiences, educations, skills, tools)| StructuredDocument {
                    experiences,
                    educations,
                    skills: skills.into_iter().map(String::from).collect(),
                    tools: tools.into_iter().map(String::from).collect(),
                    ..Default::default()
                })
        }

        /// Distinct non-empty bullets across `sources`, compared the way the merge does.
        fn distinct_bullets(sources: &[&[String]], budget: &PageBudget) -> usize {
            sources
                .iter()
                .flat_map(|s| s.iter())
                .map(|b| budget.cap_words(&clean_string(b)).to_lowercase())
                .filter(|b| !b.is_empty())
                .collect::<HashSet<_>>()
                .len()
        }

        fn key_counts<T, K: Eq + Hash>(items: &[T], key: impl Fn(&T) -> K) -> HashMap<K, usize> {
            let mut counts = HashMap::new();
            for item in items {
                *counts.entry(key(item)).or_insert(0) += 1;
            }
            counts
        }

        proptest! {
            #[test]
            fn merge_never_loses_original_entities(original in document_strategy(), candidate in document_strategy()) {
                let merged = merge(&original, &candidate, &PageBudget::default()).document;
                let before = key_counts(&original.experiences, Experience::identity_key);
                let after = key_counts(&merged.experiences, Experience::identity_key);
                for (key, count) in before {
                    prop_assert!(after.get(&key).copied().unwrap_or(0) >= count);
                }
                let before = key_counts(&original.educations, Education::identity_key);
                let after = key_counts(&merged.educations, Education::identity_key);
                for (key, count) in before {
                    prop_assert!(after.get(&key).copied().unwrap_or(0) >= count);
                }
            }

            #[test]
            fn merge_respects_bullet_budget(original in document_strategy(), candidate in document_strategy()) {
                let budget = PageBudget::default();
                let merged = merge(&original, &candidate, &budget).document;
                for exp in &merged.experiences {
                    prop_assert!(exp.responsibilities.len() <= budget.max_bullets);
                    for bullet in &exp.responsibilities {
                        prop_assert!(bullet.split_whitespace().count() <= budget.max_words_per_bullet);
                    }
                }
                prop_assert_eq!(&merged.educations[..candidate.educations.len()], &candidate.educations[..]);
                for edu in &merged.educations[candidate.educations.len()..] {
                    prop_assert!(edu.description.chars().count() <= budget.max_description_chars);
                }
            }

            #[test]
            fn merge_tops_up_to_min_bullets(original in document_strategy(), candidate in document_strategy()) {
                let budget = PageBudget::default();
                let merged = merge(&original, &candidate, &budget).document;
                let mut seen_keys: HashMap<ExperienceKey, usize> = HashMap::new();
                for (i, exp) in merged.experiences.iter().enumerate() {
                    let mut sources: Vec<&[String]> = vec![exp.responsibilities.as_slice()];
                    if let Some(written) = candidate.experiences.get(i) {
                        let key = written.identity_key();
                        let nth = seen_keys.entry(key.clone()).or_insert(0);
                        let counterpart = original
                            .experiences
                            .iter()
                            .filter(|o| o.identity_key() == key)
                            .nth(*nth);
                        *nth += 1;
                        sources = vec![written.responsibilities.as_slice()];
                        if let Some(o) = counterpart {
                            sources.push(o.responsibilities.as_slice());
                        }
                    }
                    let available = distinct_bullets(&sources, &budget);
                    prop_assert!(exp.responsibilities.len() >= budget.min_bullets.min(available));
                }
            }

            #[test]
            fn merge_collections_are_deduplicated(original in document_strategy(), candidate in document_strategy()) {
                let merged = merge(&original, &candidate, &PageBudget::default()).document;
                let tools: HashSet<String> = merged.tools.iter().map(|t| t.to_lowercase()).collect();
                let skills: HashSet<String> = merged.skills.iter().map(|s| s.to_lowercase()).collect();
                prop_assert_eq!(tools.len(), merged.tools.len());
                prop_assert_eq!(skills.len(), merged.skills.len());
                prop_assert!(tools.is_disjoint(&skills));
            }

            #[test]
            fn merge_with_empty_candidate_is_apply_budget(original in document_strategy()) {
                let budget = PageBudget::default();
                let merged = merge(&original, &StructuredDocument::default(), &budget).document;
                prop_assert_eq!(merged, apply_budget(&original, &budget));
            }

            #[test]
            fn merge_is_deterministic(original in document_strategy(), candidate in document_strategy()) {
                let budget = PageBudget::default();
                prop_assert_eq!(merge(&original, &candidate, &budget), merge(&original, &candidate, &budget));
            }
        }
    }
}
