//! Document Serializer: renders a [`StructuredDocument`] back to the canonical text
//! format the extractor reads. Empty sections and empty fields are omitted.

use crate::document::models::{ContractType, Education, Experience, StructuredDocument};

pub fn serialize(doc: &StructuredDocument) -> String {
    let mut blocks: Vec<String> = Vec::new();

    let header = render_header(doc);
    if !header.is_empty() {
        blocks.push(header);
    }

    if !doc.summary.is_empty() {
        blocks.push(format!("# Summary\n{}", doc.summary));
    }

    if !doc.experiences.is_empty() {
        blocks.push("# Experience".to_string());
        blocks.extend(doc.experiences.iter().map(render_experience));
    }

    if !doc.educations.is_empty() {
        blocks.push("# Education".to_string());
        blocks.extend(doc.educations.iter().map(render_education));
    }

    if !doc.tools.is_empty() || !doc.skills.is_empty() {
        let mut md = String::from("# Skills");
        if !doc.tools.is_empty() {
            md.push_str(&format!("\n- Tools: {}", doc.tools.join(", ")));
        }
        if !doc.skills.is_empty() {
            md.push_str(&format!("\n- Skills: {}", doc.skills.join(", ")));
        }
        blocks.push(md);
    }

    if !doc.languages.is_empty() {
        let mut md = String::from("# Languages");
        for language in &doc.languages {
            md.push_str(&format!("\n- {} ({})", language.name, language.level.as_str()));
        }
        blocks.push(md);
    }

    if !doc.certifications.is_empty() {
        let mut md = String::from("# Certifications");
        for cert in &doc.certifications {
            let mut line = cert.name.clone();
            if !cert.issuer.is_empty() {
                line.push_str(&format!(" - {}", cert.issuer));
            }
            if !cert.date.is_empty() {
                line.push_str(&format!(" ({})", cert.date));
            }
            md.push_str(&format!("\n- {line}"));
        }
        blocks.push(md);
    }

    if !doc.hobbies.is_empty() {
        let mut md = String::from("# Hobbies");
        for hobby in &doc.hobbies {
            md.push_str(&format!("\n- {hobby}"));
        }
        blocks.push(md);
    }

    let mut text = blocks.join("\n\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

fn render_header(doc: &StructuredDocument) -> String {
    let info = &doc.personal_info;
    let mut lines = Vec::new();

    let name = info.full_name();
    if !name.is_empty() {
        lines.push(format!("# {name}"));
    }
    if !info.headline.is_empty() {
        lines.push(info.headline.clone());
    }

    let contact = labeled_pieces(&[
        ("Email", &info.email),
        ("Phone", &info.phone),
        ("Location", &info.location),
    ]);
    if !contact.is_empty() {
        lines.push(contact);
    }
    let links = labeled_pieces(&[
        ("LinkedIn", &info.linkedin),
        ("GitHub", &info.github),
        ("Website", &info.website),
    ]);
    if !links.is_empty() {
        lines.push(links);
    }

    lines.join("\n")
}

/// `Label: value | Label: value`, skipping empty values.
fn labeled_pieces(pieces: &[(&str, &String)]) -> String {
    pieces
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_experience(exp: &Experience) -> String {
    let mut lines = vec![entity_heading(&exp.title, &exp.company)];

    if let Some(dates) = date_line(&exp.start_date, &exp.end_date, exp.current, false) {
        lines.push(dates);
    }

    let contract = if exp.contract_type == ContractType::DEFAULT {
        String::new()
    } else {
        exp.contract_type.as_str().to_string()
    };
    let meta = labeled_pieces(&[
        ("Location", &exp.location),
        ("Industry", &exp.industry),
        ("Contract", &contract),
    ]);
    if !meta.is_empty() {
        lines.push(meta);
    }

    lines.extend(exp.responsibilities.iter().map(|b| format!("- {b}")));
    lines.join("\n")
}

fn render_education(edu: &Education) -> String {
    let mut lines = vec![entity_heading(edu.degree.label(), &edu.institution)];

    if let Some(dates) = date_line(&edu.start_date, &edu.end_date, edu.current, true) {
        lines.push(dates);
    }
    if !edu.field.is_empty() {
        lines.push(format!("Field: {}", edu.field));
    }

    lines.extend(
        edu.description
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| format!("- {}", l.trim())),
    );
    lines.join("\n")
}

fn entity_heading(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (_, true) if left.is_empty() => "##".to_string(),
        (_, true) => format!("## {left}"),
        (true, false) => format!("## - {right}"),
        (false, false) => format!("## {left} - {right}"),
    }
}

/// A lone date reads as a start date for experiences and as a graduation date for
/// educations, so the other half gets an explicit `From`/`Until` prefix.
fn date_line(start: &str, end: &str, current: bool, lone_is_end: bool) -> Option<String> {
    match (start.is_empty(), end.is_empty(), current) {
        (false, _, true) => Some(format!("{start} - Present")),
        (true, _, true) => Some("Until Present".to_string()),
        (false, false, false) => Some(format!("{start} - {end}")),
        (false, true, false) if lone_is_end => Some(format!("From {start}")),
        (false, true, false) => Some(start.to_string()),
        (true, false, false) if lone_is_end => Some(end.to_string()),
        (true, false, false) => Some(format!("Until {end}")),
        (true, true, false) => None,
    }
}
