// Tag Deriver: bounded, deduplicated classification tags for search and matching.
// Tags are only ever produced here; nothing upstream hand-authors them.

pub mod deriver;
pub mod tables;

pub use deriver::derive_tags;

/// Lowercases, folds accents to ASCII, collapses every non-alphanumeric run into a
/// single hyphen and strips leading/trailing hyphens. May return an empty string.
pub fn normalize_tag(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_hyphen = false;
    for c in raw.to_lowercase().chars() {
        let folded = fold_accent(c);
        for f in folded.chars() {
            if f.is_ascii_alphanumeric() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(f);
            } else {
                pending_hyphen = true;
            }
        }
    }
    out
}

fn fold_accent(c: char) -> String {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'œ' => "oe",
        'æ' => "ae",
        'ß' => "ss",
        _ => return c.to_string(),
    };
    folded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag_collapses_separators() {
        assert_eq!(normalize_tag("  Machine   Learning "), "machine-learning");
        assert_eq!(normalize_tag("CI/CD -- pipelines"), "ci-cd-pipelines");
        assert_eq!(normalize_tag("--edge--"), "edge");
    }

    #[test]
    fn test_normalize_tag_folds_accents() {
        assert_eq!(normalize_tag("Français"), "francais");
        assert_eq!(normalize_tag("Sécurité"), "securite");
        assert_eq!(normalize_tag("Œuvre"), "oeuvre");
    }

    #[test]
    fn test_normalize_tag_empty_after_normalization() {
        assert_eq!(normalize_tag("+++"), "");
        assert_eq!(normalize_tag(""), "");
        assert_eq!(normalize_tag("中文"), "");
    }
}
