//! Document Extractor: markdown-ish résumé text to [`StructuredDocument`].
//!
//! A single pass over the lines with two pieces of state: the current [`Section`] and
//! the entity being accumulated ([`Block`]). A block is only ever finished by
//! [`Extractor::close_block`], which runs on every new heading and at end of input.
//!
//! Extraction never fails. Lines that fit nowhere are dropped; the worst case is an
//! empty document.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::document::dedup::dedup_collections;
use crate::document::models::{
    Certification, DegreeLevel, Education, Experience, Language, PersonalInfo,
    StructuredDocument,
};
use crate::document::normalize::{
    clean_string, normalize_contract_type, normalize_date, normalize_degree,
    normalize_language_level, parse_explicit_date,
};
use crate::document::vocabulary::{
    label_in, lookup_exact, lookup_substring, Section, CONTRACT_LABELS, CURRENT_MARKERS,
    EMAIL_LABELS, FIELD_LABELS, GITHUB_LABELS, HEADLINE_LABELS, INDUSTRY_LABELS,
    LANGUAGE_LEVEL_SYNONYMS, LINKEDIN_LABELS, LOCATION_LABELS, PHONE_LABELS, SECTION_TITLES,
    SKILL_BUCKET_LABELS, TOOL_BUCKET_LABELS, WEBSITE_LABELS,
};
use crate::tagging::tables::is_known_technology;

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"^(#{1,6})(?:\s+(.*))?$").unwrap();
    static ref BULLET: Regex = Regex::new(r"^(?:[-*•–·▪◦]|\d{1,2}[.)])\s+(.*)$").unwrap();
    static ref ENTITY_SPLIT: Regex =
        Regex::new(r"(?i)^(.*?)\s+(?:-|–|—|\||@|at|chez)\s+(.+)$").unwrap();
    static ref FIELD_CONNECTOR: Regex = Regex::new(r"(?i)^.*\s(?:in|en|of|ès)\s+(.+)$").unwrap();
    static ref LABELED: Regex = Regex::new(r"^([^:]{1,40}?)\s*:\s*(.*)$").unwrap();

    static ref DATE_RANGE: Regex =
        Regex::new(r"(?i)^(.+?)\s*(?:\s-\s|–|—|\sto\s|\sau\s|\sà\s|\suntil\s)\s*(.+)$").unwrap();
    static ref YEAR_DASH: Regex = Regex::new(r"^(\d{4})\s*-\s*(.+)$").unwrap();
    static ref SINCE: Regex = Regex::new(r"(?i)^(?:since|depuis|starting)\s+(.+)$").unwrap();
    static ref FROM: Regex = Regex::new(r"(?i)^(?:from|dès|à partir de)\s+(.+)$").unwrap();
    static ref UNTIL: Regex =
        Regex::new(r"(?i)^(?:until|jusqu'en|jusqu'à|jusqu'au)\s+(.+)$").unwrap();

    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref PHONE: Regex = Regex::new(r"^\+?[\d\s().\-]{7,20}$").unwrap();
    static ref YEAR_SPAN: Regex = Regex::new(r"^\d{4}\s*[-–/]\s*\d{4}$").unwrap();
    static ref URL: Regex = Regex::new(
        r"(?i)^(?:https?://|www\.)\S+$|^[\w.\-]+\.(?:com|io|dev|fr|net|org|me|co|app)(?:/\S*)?$"
    )
    .unwrap();

    static ref LANGUAGE_PAREN: Regex = Regex::new(r"^(.+)\(([^()]+)\)$").unwrap();
    static ref LANGUAGE_SEP: Regex = Regex::new(r"^(.+?)\s*(?::|\s-\s|–|—)\s*(.+)$").unwrap();
    static ref CERT_DATE: Regex = Regex::new(r"^(.*?)\s*\(([^()]*\d{4}[^()]*)\)$").unwrap();
    static ref CERT_ISSUER: Regex = Regex::new(r"(?i)^(.+?)\s+(?:-|–|—|by|par)\s+(.+)$").unwrap();
}

// ────────────────────────────────────────────────────────────────────────────
// Scanner state
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct ExperienceDraft {
    title: String,
    company: String,
    start_date: String,
    end_date: String,
    current: bool,
    industry: String,
    contract_type: String,
    location: String,
    bullets: Vec<String>,
}

#[derive(Debug, Default)]
struct EducationDraft {
    degree: String,
    field: String,
    institution: String,
    start_date: String,
    end_date: String,
    current: bool,
    lines: Vec<String>,
}

/// The entity currently being accumulated.
#[derive(Debug)]
enum Block {
    Experience(ExperienceDraft),
    Education(EducationDraft),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkillBucket {
    Tools,
    Skills,
}

#[derive(Debug, PartialEq)]
enum Line<'a> {
    Blank,
    Heading { level: usize, text: String },
    Bullet(&'a str),
    Plain(&'a str),
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if let Some(caps) = HEADING.captures(line) {
        let text = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        return Line::Heading {
            level: caps[1].len(),
            text: strip_emphasis(text),
        };
    }
    if let Some(caps) = BULLET.captures(line) {
        let text = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        return Line::Bullet(text.trim());
    }
    Line::Plain(line)
}

/// Removes markdown bold/italic markers and trailing colons from a heading.
fn strip_emphasis(text: &str) -> String {
    clean_string(
        text.replace("**", "")
            .replace("__", "")
            .trim_matches(|c: char| c == '*' || c == '_' || c == ':' || c.is_whitespace()),
    )
}

struct Extractor {
    section: Section,
    /// Heading level that opened the current section (0 when opened by a plain line).
    section_level: usize,
    /// Heading level of the entities seen in the current section.
    entity_level: Option<usize>,
    block: Option<Block>,
    bucket: Option<SkillBucket>,
    doc: StructuredDocument,
    summary_lines: Vec<String>,
}

/// Extracts a [`StructuredDocument`] from résumé text. Total: never fails.
pub fn extract(text: &str) -> StructuredDocument {
    let mut extractor = Extractor::new();
    for line in text.lines() {
        extractor.feed(line);
    }
    let doc = extractor.finish();
    debug!(
        "Extracted document: experiences={}, educations={}, skills={}, tools={}, languages={}",
        doc.experiences.len(),
        doc.educations.len(),
        doc.skills.len(),
        doc.tools.len(),
        doc.languages.len()
    );
    doc
}

impl Extractor {
    fn new() -> Self {
        Self {
            section: Section::None,
            section_level: 0,
            entity_level: None,
            block: None,
            bucket: None,
            doc: StructuredDocument::default(),
            summary_lines: Vec::new(),
        }
    }

    fn feed(&mut self, raw: &str) {
        match classify(raw) {
            Line::Blank => {}
            Line::Heading { level, text } => self.on_heading(level, &text),
            Line::Bullet(text) => self.on_bullet(text),
            Line::Plain(text) => self.on_plain(text),
        }
    }

    fn switch(&mut self, section: Section, level: usize) {
        self.close_block();
        self.section = section;
        self.section_level = level;
        self.entity_level = None;
        self.bucket = None;
    }

    fn in_entity_section(&self) -> bool {
        matches!(self.section, Section::Experience | Section::Education)
    }

    // ──── Headings ────

    /// The section a heading opens, if any.
    fn heading_section(&self, level: usize, text: &str) -> Option<Section> {
        if self.in_entity_section() && level >= 2 {
            // Deeper headings are entities unless they are exactly a section title.
            if level > self.section_level.max(1) {
                return section_exact(text);
            }
            // Entities nested below this level: the heading is a sibling section.
            if self.entity_level.is_some_and(|l| l > level) {
                return section_containing(text);
            }
            // Same depth as the entities: a `Title - Company` heading is never a section.
            if split_entity_heading(text).1.is_empty() {
                return section_exact(text).or_else(|| section_words(text));
            }
            return section_exact(text);
        }

        let info = &self.doc.personal_info;
        let awaiting_name = info.first_name.is_empty() && info.last_name.is_empty();
        if self.section == Section::None && level == 1 && awaiting_name {
            section_words(text)
        } else {
            section_containing(text)
        }
    }

    fn on_heading(&mut self, level: usize, text: &str) {
        let matched = self.heading_section(level, text);

        if level >= 2 && self.section == Section::Skills && matched == Some(Section::Skills) {
            self.bucket = bucket_for_label(text);
            return;
        }
        if let Some(section) = matched {
            self.switch(section, level);
            return;
        }

        match self.section {
            Section::None => {
                let info = &mut self.doc.personal_info;
                if level == 1 && info.first_name.is_empty() && info.last_name.is_empty() {
                    let mut words = text.split_whitespace();
                    info.first_name = words.next().unwrap_or_default().to_string();
                    info.last_name = words.collect::<Vec<_>>().join(" ");
                } else if level == 1 {
                    self.switch(Section::Unrecognized, level);
                }
            }
            Section::Experience | Section::Education => {
                self.close_block();
                self.entity_level = Some(level);
                self.block = Some(self.open_block(text));
            }
            Section::Skills if level > self.section_level.max(1) => {
                self.bucket = bucket_for_label(text)
            }
            _ => {
                if level <= self.section_level.max(1) {
                    self.switch(Section::Unrecognized, level);
                }
            }
        }
    }

    fn open_block(&self, heading: &str) -> Block {
        let (left, right) = split_entity_heading(heading);
        match self.section {
            Section::Education => {
                let field = match FIELD_CONNECTOR.captures(&left) {
                    Some(caps) => clean_string(&caps[1]),
                    None if normalize_degree(&left) == DegreeLevel::Other
                        && !left.eq_ignore_ascii_case(DegreeLevel::Other.label()) =>
                    {
                        left.clone()
                    }
                    None => String::new(),
                };
                Block::Education(EducationDraft {
                    degree: left,
                    field,
                    institution: right,
                    ..Default::default()
                })
            }
            _ => Block::Experience(ExperienceDraft {
                title: left,
                company: right,
                ..Default::default()
            }),
        }
    }

    fn empty_block(&self) -> Block {
        match self.section {
            Section::Education => Block::Education(EducationDraft::default()),
            _ => Block::Experience(ExperienceDraft::default()),
        }
    }

    // ──── Bullets and plain lines ────

    fn on_bullet(&mut self, text: &str) {
        match self.section {
            Section::None | Section::Unrecognized => {}
            Section::Summary => self.summary_lines.push(text.to_string()),
            Section::Experience | Section::Education => {
                if self.block.is_none() {
                    self.block = Some(self.empty_block());
                }
                if let Some(block) = self.block.as_mut() {
                    push_entity_line(block, text);
                }
            }
            _ => self.on_item(text),
        }
    }

    fn on_plain(&mut self, text: &str) {
        if let Some(section) = section_exact(&strip_emphasis(text)) {
            self.switch(section, 0);
            return;
        }
        match self.section {
            Section::None => self.on_header_line(text),
            Section::Summary => self.summary_lines.push(text.to_string()),
            Section::Unrecognized => {}
            Section::Experience | Section::Education => {
                if self.block.is_none() {
                    self.block = Some(self.empty_block());
                }
                if let Some(block) = self.block.as_mut() {
                    on_entity_plain(block, text);
                }
            }
            _ => self.on_item(text),
        }
    }

    fn on_item(&mut self, text: &str) {
        match self.section {
            Section::Skills => self.push_skill_item(text),
            Section::Languages => {
                let parsed = split_list(text).into_iter().filter_map(|l| parse_language(&l));
                self.doc.languages.extend(parsed);
            }
            Section::Certificates => {
                if let Some(cert) = parse_certification(text) {
                    self.doc.certifications.push(cert);
                }
            }
            Section::Hobbies => self.doc.hobbies.extend(split_list(text)),
            _ => {}
        }
    }

    fn push_skill_item(&mut self, text: &str) {
        if let Some(caps) = LABELED.captures(text) {
            if let Some(bucket) = bucket_for_label(&caps[1]) {
                for item in split_list(&caps[2]) {
                    self.push_to_bucket(bucket, item);
                }
                return;
            }
        }
        for item in split_list(text) {
            let bucket = self.bucket.unwrap_or(if is_known_technology(&item) {
                SkillBucket::Tools
            } else {
                SkillBucket::Skills
            });
            self.push_to_bucket(bucket, item);
        }
    }

    fn push_to_bucket(&mut self, bucket: SkillBucket, item: String) {
        match bucket {
            SkillBucket::Tools => self.doc.tools.push(item),
            SkillBucket::Skills => self.doc.skills.push(item),
        }
    }

    // ──── Header (name, contact, headline) ────

    fn on_header_line(&mut self, text: &str) {
        let pieces: Vec<String> = text
            .split(|c| c == '|' || c == '•' || c == '·')
            .map(clean_string)
            .filter(|p| !p.is_empty())
            .collect();
        let multi = pieces.len() > 1;
        let info = &mut self.doc.personal_info;
        for piece in pieces {
            if assign_contact(info, &piece) {
                continue;
            }
            if multi && info.location.is_empty() {
                info.location = piece;
            } else if info.headline.is_empty() {
                info.headline = piece;
            } else {
                self.summary_lines.push(piece);
            }
        }
    }

    // ──── Block transition ────

    /// The only place an entity leaves the scanner: normalizes the draft and appends it.
    fn close_block(&mut self) {
        match self.block.take() {
            Some(Block::Experience(d)) => {
                let current = d.current;
                self.doc.experiences.push(Experience {
                    title: clean_string(&d.title),
                    company: clean_string(&d.company),
                    start_date: normalize_date(&d.start_date),
                    end_date: if current {
                        String::new()
                    } else {
                        normalize_date(&d.end_date)
                    },
                    current,
                    industry: clean_string(&d.industry),
                    contract_type: normalize_contract_type(&d.contract_type),
                    location: clean_string(&d.location),
                    responsibilities: clean_lines(&d.bullets),
                });
            }
            Some(Block::Education(d)) => {
                let current = d.current;
                self.doc.educations.push(Education {
                    degree: normalize_degree(&d.degree),
                    field: clean_string(&d.field),
                    institution: clean_string(&d.institution),
                    start_date: normalize_date(&d.start_date),
                    end_date: if current {
                        String::new()
                    } else {
                        normalize_date(&d.end_date)
                    },
                    current,
                    description: clean_lines(&d.lines).join("\n"),
                });
            }
            None => {}
        }
    }

    fn finish(mut self) -> StructuredDocument {
        self.close_block();
        self.doc.summary = clean_string(&self.summary_lines.join(" "));
        self.doc.personal_info = clean_personal_info(&self.doc.personal_info);
        dedup_collections(&self.doc)
    }
}

fn clean_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|l| clean_string(l))
        .filter(|l| !l.is_empty())
        .collect()
}

fn clean_personal_info(info: &PersonalInfo) -> PersonalInfo {
    PersonalInfo {
        first_name: clean_string(&info.first_name),
        last_name: clean_string(&info.last_name),
        email: clean_string(&info.email),
        phone: clean_string(&info.phone),
        location: clean_string(&info.location),
        linkedin: clean_string(&info.linkedin),
        github: clean_string(&info.github),
        website: clean_string(&info.website),
        headline: clean_string(&info.headline),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section vocabulary
// ────────────────────────────────────────────────────────────────────────────

fn section_containing(text: &str) -> Option<Section> {
    let lower = text.to_lowercase();
    if lower.is_empty() {
        return None;
    }
    lookup_substring(SECTION_TITLES, &lower)
}

/// Whole-word variant of [`section_containing`]; a plural `s` still matches.
fn section_words(text: &str) -> Option<Section> {
    let lower = text.to_lowercase();
    SECTION_TITLES
        .iter()
        .find(|(_, titles)| titles.iter().any(|t| contains_words(&lower, t)))
        .map(|(section, _)| *section)
}

fn contains_words(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let rest = &haystack[start + needle.len()..];
        let rest = rest.strip_prefix('s').unwrap_or(rest);
        let before = haystack[..start].chars().next_back();
        !before.is_some_and(char::is_alphanumeric)
            && !rest.chars().next().is_some_and(char::is_alphanumeric)
    })
}

fn section_exact(text: &str) -> Option<Section> {
    let lower = text
        .trim_matches(|c: char| c == ':' || c == '*' || c.is_whitespace())
        .to_lowercase();
    lookup_exact(SECTION_TITLES, &lower)
}

fn bucket_for_label(label: &str) -> Option<SkillBucket> {
    let lower = label.trim().to_lowercase();
    if TOOL_BUCKET_LABELS.iter().any(|l| lower.contains(l)) {
        Some(SkillBucket::Tools)
    } else if SKILL_BUCKET_LABELS.iter().any(|l| lower.contains(l)) {
        Some(SkillBucket::Skills)
    } else {
        None
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entity lines
// ────────────────────────────────────────────────────────────────────────────

/// `<A> <sep> <B>`; a heading starting with a separator has an empty left side.
fn split_entity_heading(text: &str) -> (String, String) {
    for prefix in ["- ", "– ", "— ", "| ", "@ "] {
        if let Some(rest) = text.strip_prefix(prefix) {
            return (String::new(), clean_string(rest));
        }
    }
    match ENTITY_SPLIT.captures(text) {
        Some(caps) => (clean_string(&caps[1]), clean_string(&caps[2])),
        None => (clean_string(text), String::new()),
    }
}

fn push_entity_line(block: &mut Block, text: &str) {
    match block {
        Block::Experience(d) => d.bullets.push(text.to_string()),
        Block::Education(d) => d.lines.push(text.to_string()),
    }
}

/// Plain line inside an entity: date line, then meta line, then a missing
/// company/institution, else content.
fn on_entity_plain(block: &mut Block, text: &str) {
    let single_is_end = matches!(block, Block::Education(_));
    if let Some(span) = parse_date_line(text, single_is_end) {
        match block {
            Block::Experience(d) => span.apply(&mut d.start_date, &mut d.end_date, &mut d.current),
            Block::Education(d) => span.apply(&mut d.start_date, &mut d.end_date, &mut d.current),
        }
        return;
    }
    if let Some(fields) = parse_meta_line(text) {
        for (field, value) in fields {
            match (&mut *block, field) {
                (Block::Experience(d), MetaField::Location) => d.location = value,
                (Block::Experience(d), MetaField::Industry) => d.industry = value,
                (Block::Experience(d), MetaField::Contract) => d.contract_type = value,
                (Block::Education(d), MetaField::Field) => d.field = value,
                _ => {}
            }
        }
        return;
    }
    let value = strip_emphasis(text);
    let backfilled = match block {
        Block::Experience(d) if d.company.is_empty() && !value.is_empty() => {
            d.company = value;
            true
        }
        Block::Education(d) if d.institution.is_empty() && !value.is_empty() => {
            d.institution = value;
            true
        }
        _ => false,
    };
    if !backfilled {
        push_entity_line(block, text);
    }
}

#[derive(Debug, Default, PartialEq)]
struct DateSpan {
    start: String,
    end: String,
    current: bool,
}

impl DateSpan {
    fn apply(&self, start: &mut String, end: &mut String, current: &mut bool) {
        if !self.start.is_empty() {
            *start = self.start.clone();
        }
        if !self.end.is_empty() {
            *end = self.end.clone();
        }
        if self.current {
            *current = true;
            end.clear();
        }
    }
}

pub(crate) fn is_current_marker(text: &str) -> bool {
    let value = clean_string(text)
        .to_lowercase()
        .trim_matches(|c: char| c == '.' || c == ')' || c == '(')
        .to_string();
    CURRENT_MARKERS
        .iter()
        .any(|m| value == *m || value.starts_with(&format!("{m} ")))
}

/// Recognizes a line made only of dates. `single_is_end` decides what a lone date
/// means (graduation date for educations, start date for experiences).
fn parse_date_line(text: &str, single_is_end: bool) -> Option<DateSpan> {
    let ranges = [&*DATE_RANGE, &*YEAR_DASH];
    for pattern in ranges {
        if let Some(caps) = pattern.captures(text) {
            let start = normalize_date(&caps[1]);
            if start.is_empty() {
                continue;
            }
            if is_current_marker(&caps[2]) {
                return Some(DateSpan {
                    start,
                    end: String::new(),
                    current: true,
                });
            }
            let end = normalize_date(&caps[2]);
            if !end.is_empty() {
                return Some(DateSpan {
                    start,
                    end,
                    current: false,
                });
            }
        }
    }

    if let Some(caps) = SINCE.captures(text) {
        let start = normalize_date(&caps[1]);
        if !start.is_empty() {
            return Some(DateSpan {
                start,
                end: String::new(),
                current: true,
            });
        }
    }
    if let Some(caps) = FROM.captures(text) {
        let start = normalize_date(&caps[1]);
        if !start.is_empty() {
            return Some(DateSpan {
                start,
                ..Default::default()
            });
        }
    }
    if let Some(caps) = UNTIL.captures(text) {
        if is_current_marker(&caps[1]) {
            return Some(DateSpan {
                current: true,
                ..Default::default()
            });
        }
        let end = normalize_date(&caps[1]);
        if !end.is_empty() {
            return Some(DateSpan {
                end,
                ..Default::default()
            });
        }
    }

    let date = parse_explicit_date(text)?;
    Some(if single_is_end {
        DateSpan {
            end: date,
            ..Default::default()
        }
    } else {
        DateSpan {
            start: date,
            ..Default::default()
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaField {
    Location,
    Industry,
    Contract,
    Field,
}

/// `Label: value | Label: value`. Every piece must carry a known label.
fn parse_meta_line(text: &str) -> Option<Vec<(MetaField, String)>> {
    let mut fields = Vec::new();
    for piece in text.split('|') {
        let caps = LABELED.captures(piece.trim())?;
        let label = caps[1].trim().to_lowercase();
        let field = if label_in(LOCATION_LABELS, &label) {
            MetaField::Location
        } else if label_in(INDUSTRY_LABELS, &label) {
            MetaField::Industry
        } else if label_in(CONTRACT_LABELS, &label) {
            MetaField::Contract
        } else if label_in(FIELD_LABELS, &label) {
            MetaField::Field
        } else {
            return None;
        };
        fields.push((field, clean_string(&caps[2])));
    }
    Some(fields)
}

// ────────────────────────────────────────────────────────────────────────────
// Header contact pieces
// ────────────────────────────────────────────────────────────────────────────

fn set_once(slot: &mut String, value: &str) {
    if slot.is_empty() {
        *slot = clean_string(value);
    }
}

/// Returns false when the piece is neither a known label nor a recognizable shape.
fn assign_contact(info: &mut PersonalInfo, piece: &str) -> bool {
    if let Some(caps) = LABELED.captures(piece) {
        let label = caps[1].trim().to_lowercase();
        let value = &caps[2];
        let slot = if label_in(EMAIL_LABELS, &label) {
            Some(&mut info.email)
        } else if label_in(PHONE_LABELS, &label) {
            Some(&mut info.phone)
        } else if label_in(LOCATION_LABELS, &label) {
            Some(&mut info.location)
        } else if label_in(LINKEDIN_LABELS, &label) {
            Some(&mut info.linkedin)
        } else if label_in(GITHUB_LABELS, &label) {
            Some(&mut info.github)
        } else if label_in(WEBSITE_LABELS, &label) {
            Some(&mut info.website)
        } else if label_in(HEADLINE_LABELS, &label) {
            Some(&mut info.headline)
        } else {
            None
        };
        if let Some(slot) = slot {
            set_once(slot, value);
            return true;
        }
    }

    if EMAIL.is_match(piece) {
        set_once(&mut info.email, piece);
    } else if URL.is_match(piece) {
        let lower = piece.to_lowercase();
        if lower.contains("linkedin") {
            set_once(&mut info.linkedin, piece);
        } else if lower.contains("github") {
            set_once(&mut info.github, piece);
        } else {
            set_once(&mut info.website, piece);
        }
    } else if PHONE.is_match(piece)
        && !YEAR_SPAN.is_match(piece)
        && piece.chars().filter(|c| c.is_ascii_digit()).count() >= 7
    {
        set_once(&mut info.phone, piece);
    } else {
        return false;
    }
    true
}

// ────────────────────────────────────────────────────────────────────────────
// List items
// ────────────────────────────────────────────────────────────────────────────

/// Splits on `,` `;` `|` and `•` outside parentheses.
pub(crate) fn split_list(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' | '[' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' | ';' | '|' | '•' if depth == 0 => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    items.push(current);
    items
        .iter()
        .map(|i| clean_string(i))
        .filter(|i| !i.is_empty())
        .collect()
}

pub(crate) fn parse_language(text: &str) -> Option<Language> {
    let (name, level) = if let Some(caps) = LANGUAGE_PAREN.captures(text) {
        (clean_string(&caps[1]), clean_string(&caps[2]))
    } else if let Some(caps) = LANGUAGE_SEP.captures(text) {
        (clean_string(&caps[1]), clean_string(&caps[2]))
    } else {
        split_trailing_level(text)
    };
    if name.is_empty() {
        return None;
    }
    Some(Language {
        name,
        level: normalize_language_level(&level),
    })
}

/// "Anglais courant" → ("Anglais", "courant"); tries a two-word level first.
fn split_trailing_level(text: &str) -> (String, String) {
    let words: Vec<&str> = text.split_whitespace().collect();
    for take in [2usize, 1] {
        if words.len() > take {
            let tail = words[words.len() - take..].join(" ").to_lowercase();
            if lookup_exact(LANGUAGE_LEVEL_SYNONYMS, &tail).is_some() {
                return (words[..words.len() - take].join(" "), tail);
            }
        }
    }
    (clean_string(text), String::new())
}

pub(crate) fn parse_certification(text: &str) -> Option<Certification> {
    let (rest, date) = match CERT_DATE.captures(text) {
        Some(caps) => (caps[1].to_string(), normalize_date(&caps[2])),
        None => (text.to_string(), String::new()),
    };
    let (name, issuer) = match CERT_ISSUER.captures(&rest) {
        Some(caps) => (clean_string(&caps[1]), clean_string(&caps[2])),
        None => (clean_string(&rest), String::new()),
    };
    if name.is_empty() {
        return None;
    }
    Some(Certification { name, issuer, date })
}
