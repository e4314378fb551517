use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};

use crate::document::models::{
    DegreeLevel, Experience, LanguageLevel, Preferences, StructuredDocument,
};
use crate::document::normalize::months_between;
use crate::tagging::normalize_tag;
use crate::tagging::tables::{
    canonical_technology, family_for, technology_priority, BACKEND_KEYWORDS, DOMAIN_KEYWORDS,
    DOMAIN_THRESHOLD, ENVIRONMENT_SYNONYMS, FRONTEND_KEYWORDS, INDUSTRY_SYNONYMS,
    LEADERSHIP_TITLE, ROLE_PATTERNS, UNKNOWN_TECHNOLOGY_SCORE, WORK_MODE_SYNONYMS,
};

pub const MAX_TAGS: usize = 20;

// Per-category caps, in emission order.
const SENIORITY_CAP: usize = 2;
const TECHNOLOGY_CAP: usize = 6;
const INDUSTRY_CAP: usize = 3;
const ROLE_CAP: usize = 2;
const DOMAIN_CAP: usize = 3;
const EDUCATION_CAP: usize = 1;
const LANGUAGE_CAP: usize = 2;
const WORK_STYLE_CAP: usize = 2;

/// Derives tags as of today (UTC).
pub fn derive_tags(doc: &StructuredDocument, prefs: &Preferences) -> Vec<String> {
    derive_tags_at(doc, prefs, Utc::now().date_naive())
}

/// Derives at most [`MAX_TAGS`] tags; `today` closes ongoing experiences.
pub fn derive_tags_at(doc: &StructuredDocument, prefs: &Preferences, today: NaiveDate) -> Vec<String> {
    let categories = [
        (seniority_tags(doc, today), SENIORITY_CAP),
        (technology_tags(doc), TECHNOLOGY_CAP),
        (industry_tags(doc), INDUSTRY_CAP),
        (role_tags(doc, prefs), ROLE_CAP),
        (domain_tags(doc), DOMAIN_CAP),
        (education_tags(doc), EDUCATION_CAP),
        (language_tags(doc), LANGUAGE_CAP),
        (work_style_tags(prefs), WORK_STYLE_CAP),
    ];

    let mut seen = HashSet::new();
    categories
        .into_iter()
        .flat_map(|(tags, cap)| {
            let mut local = HashSet::new();
            tags.iter()
                .map(|t| normalize_tag(t))
                .filter(|t| !t.is_empty() && local.insert(t.clone()))
                .take(cap)
                .collect::<Vec<_>>()
        })
        .filter(|t| seen.insert(t.clone()))
        .take(MAX_TAGS)
        .collect()
}

// ──── Seniority ────

/// Total months of experience; `None` when no experience has a usable span.
fn experience_months(experiences: &[Experience], today: NaiveDate) -> Option<i64> {
    let today = today.format("%Y-%m").to_string();
    let spans: Vec<i64> = experiences
        .iter()
        .filter_map(|exp| {
            if exp.start_date.is_empty() {
                return None;
            }
            let end = if exp.current {
                today.as_str()
            } else if !exp.end_date.is_empty() {
                exp.end_date.as_str()
            } else {
                return None;
            };
            months_between(&exp.start_date, end).map(|m| m.max(0))
        })
        .collect();
    if spans.is_empty() {
        None
    } else {
        Some(spans.iter().sum())
    }
}

fn seniority_tags(doc: &StructuredDocument, today: NaiveDate) -> Vec<String> {
    let Some(months) = experience_months(&doc.experiences, today) else {
        return Vec::new();
    };
    let leadership = most_recent(&doc.experiences)
        .map(|exp| LEADERSHIP_TITLE.is_match(&exp.title))
        .unwrap_or(false);

    let tags: &[&str] = match months {
        m if m >= 96 && leadership => &["principal", "executive"],
        m if m < 24 => &["junior"],
        m if m < 60 => &["mid-level"],
        m if m < 96 => &["senior"],
        m if m < 144 => &["lead", "staff"],
        _ => &["principal"],
    };
    tags.iter().map(|t| t.to_string()).collect()
}

/// Current experience first, else the latest end/start date; ties go to document order.
fn most_recent(experiences: &[Experience]) -> Option<&Experience> {
    experiences
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| recency(a).cmp(&recency(b)).then(ib.cmp(ia)))
        .map(|(_, exp)| exp)
}

fn recency(exp: &Experience) -> (bool, &str) {
    let date = if exp.end_date.is_empty() {
        exp.start_date.as_str()
    } else {
        exp.end_date.as_str()
    };
    (exp.current, date)
}

// ──── Technology ────

fn technology_tags(doc: &StructuredDocument) -> Vec<String> {
    let mut scored: Vec<(u32, usize, String)> = doc
        .tools
        .iter()
        .enumerate()
        .map(|(i, tool)| {
            let score = technology_priority(tool).unwrap_or(UNKNOWN_TECHNOLOGY_SCORE);
            (score, i, canonical_technology(tool))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, _, tag)| tag).collect()
}

// ──── Industry ────

fn industry_tags(doc: &StructuredDocument) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (i, exp) in doc.experiences.iter().enumerate() {
        let lower = exp.industry.trim().to_lowercase();
        if lower.is_empty() {
            continue;
        }
        let tag = family_for(INDUSTRY_SYNONYMS, &lower)
            .map(str::to_string)
            .unwrap_or_else(|| normalize_tag(&lower));
        if tag.is_empty() {
            continue;
        }
        counts.entry(tag).or_insert((0, i)).0 += 1;
    }
    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (ca, fa)), (_, (cb, fb))| cb.cmp(ca).then(fa.cmp(fb)));
    ranked.into_iter().map(|(tag, _)| tag).collect()
}

// ──── Role type ────

fn role_tags(doc: &StructuredDocument, prefs: &Preferences) -> Vec<String> {
    let title = most_recent(&doc.experiences)
        .map(|exp| exp.title.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| prefs.target_position.trim());
    if title.is_empty() {
        return Vec::new();
    }
    ROLE_PATTERNS
        .iter()
        .filter(|(_, pattern)| pattern.is_match(title))
        .map(|(family, _)| family.to_string())
        .collect()
}

// ──── Domain ────

fn domain_hits(items: &[String], keywords: &[&str]) -> usize {
    items
        .iter()
        .filter(|item| {
            let padded = format!("-{item}-");
            keywords.iter().any(|k| padded.contains(&format!("-{k}-")))
        })
        .count()
}

fn domain_tags(doc: &StructuredDocument) -> Vec<String> {
    let items: Vec<String> = doc
        .tools
        .iter()
        .chain(&doc.skills)
        .map(|s| canonical_technology(s))
        .filter(|s| !s.is_empty())
        .collect();

    let mut tags = Vec::new();
    let frontend = domain_hits(&items, FRONTEND_KEYWORDS) >= DOMAIN_THRESHOLD;
    let backend = domain_hits(&items, BACKEND_KEYWORDS) >= DOMAIN_THRESHOLD;
    match (frontend, backend) {
        (true, true) => tags.push("full-stack".to_string()),
        (true, false) => tags.push("frontend".to_string()),
        (false, true) => tags.push("backend".to_string()),
        (false, false) => {}
    }
    for (domain, keywords) in DOMAIN_KEYWORDS {
        if domain_hits(&items, keywords) >= DOMAIN_THRESHOLD {
            tags.push(domain.to_string());
        }
    }
    tags
}

// ──── Education ────

fn education_tags(doc: &StructuredDocument) -> Vec<String> {
    let highest = doc.educations.iter().map(|e| e.degree).max_by_key(|d| d.rank());
    let tag = match highest {
        Some(DegreeLevel::Phd) => "phd",
        Some(DegreeLevel::Master) => "masters",
        Some(DegreeLevel::Bachelor) => "bachelors",
        Some(DegreeLevel::Associate) => "associate-degree",
        Some(DegreeLevel::Bootcamp) => "bootcamp",
        Some(DegreeLevel::HighSchool) => "high-school",
        Some(DegreeLevel::Other) | None => return Vec::new(),
    };
    vec![tag.to_string()]
}

// ──── Languages ────

fn language_tags(doc: &StructuredDocument) -> Vec<String> {
    let mut strong: Vec<_> = doc
        .languages
        .iter()
        .filter(|l| matches!(l.level, LanguageLevel::Native | LanguageLevel::Fluent))
        .collect();
    // Stable: equal levels keep document order.
    strong.sort_by(|a, b| b.level.rank().cmp(&a.level.rank()));
    strong
        .into_iter()
        .filter_map(|l| {
            let name = normalize_tag(&l.name);
            (!name.is_empty()).then(|| format!("{}-{}", name, l.level.as_str()))
        })
        .collect()
}

// ──── Work style ────

fn work_style_tags(prefs: &Preferences) -> Vec<String> {
    let mut tags = Vec::new();
    let mode = prefs.work_preference.trim().to_lowercase();
    if let Some(family) = family_for(WORK_MODE_SYNONYMS, &mode) {
        tags.push(family.to_string());
    }
    if prefs.management_experience.has_experience {
        tags.push("people-manager".to_string());
    }
    if let Some(env) = prefs
        .preferred_environment
        .iter()
        .map(|e| e.trim().to_lowercase())
        .find(|e| !e.is_empty())
    {
        let tag = family_for(ENVIRONMENT_SYNONYMS, &env)
            .map(str::to_string)
            .unwrap_or(env);
        tags.push(tag);
    }
    tags
}
