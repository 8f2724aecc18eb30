use std::sync::OnceLock;

use regex::Regex;

/// Minimum length for a sentence fragment to stand as its own step.
const MIN_STEP_LEN: usize = 20;

fn numbered_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?mi)^\s*(?:step\s*\d+\s*[:.)-]?|\d+\s*[.)])\s*").expect("valid regex")
    })
}

fn bare_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*step\s*\d*\s*$").expect("valid regex"))
}

/// Lowercases, strips punctuation and collapses whitespace. Used as the
/// grouping key for dedup and as the searchable title key in metadata.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes tag-like inputs. Each element may itself be a comma-joined
/// string (a recurring upstream shape); the output is always a flat list,
/// trimmed, with empties dropped and case-insensitive duplicates removed.
pub fn normalize_tags(raw: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    let mut out = Vec::new();

    for chunk in raw {
        for part in chunk.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let key = part.to_lowercase();
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            out.push(part.to_string());
        }
    }

    out
}

/// Splits a free-text instruction blob into steps, trying in order:
/// numbered markers, blank-line paragraphs, sentence boundaries. Falls
/// back to the trimmed blob as a single step.
pub fn split_instructions(blob: &str) -> Vec<String> {
    let blob = blob.trim();
    if blob.is_empty() {
        return Vec::new();
    }

    if numbered_marker().find_iter(blob).count() >= 2 {
        let steps = clean_steps(numbered_marker().split(blob));
        if steps.len() >= 2 {
            return steps;
        }
    }

    let paragraphs = clean_steps(blob.split("\r\n\r\n").flat_map(|p| p.split("\n\n")));
    if paragraphs.len() >= 2 {
        return paragraphs;
    }

    let sentences = split_sentences(blob);
    if sentences.len() >= 2 {
        return sentences;
    }

    clean_steps(std::iter::once(blob))
}

fn clean_steps<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<String> {
    parts
        .map(|p| p.trim().trim_matches(|c| c == '\r' || c == '\n').trim())
        .filter(|p| !p.is_empty() && !bare_heading().is_match(p))
        .map(|p| p.to_string())
        .collect()
}

/// Splits on `.`, `!` or `?` followed by whitespace; fragments shorter
/// than the floor are merged into the previous step so that abbreviations
/// and stray fragments do not become steps of their own.
fn split_sentences(blob: &str) -> Vec<String> {
    let mut fragments: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut chars = blob.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|n| n.is_whitespace()) {
            fragments.push(current.trim().to_string());
            current.clear();
        }
    }
    if !current.trim().is_empty() {
        fragments.push(current.trim().to_string());
    }

    let mut steps: Vec<String> = Vec::new();
    for fragment in fragments {
        if fragment.len() < MIN_STEP_LEN {
            if let Some(last) = steps.last_mut() {
                last.push(' ');
                last.push_str(&fragment);
                continue;
            }
        }
        steps.push(fragment);
    }

    clean_steps(steps.iter().map(|s| s.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title_strips_punctuation_and_case() {
        assert_eq!(normalize_title("  Chicken  Curry! "), "chicken curry");
        assert_eq!(normalize_title("Mac & Cheese (easy)"), "mac cheese easy");
    }

    #[test]
    fn test_normalize_tags_splits_comma_joined() {
        let tags = normalize_tags(vec![
            "Spicy, Dinner".to_string(),
            "dinner".to_string(),
            " ".to_string(),
            "Quick".to_string(),
        ]);
        assert_eq!(tags, vec!["Spicy", "Dinner", "Quick"]);
    }

    #[test]
    fn test_split_instructions_numbered_markers() {
        let blob = "1. Chop the onions\n2. Fry until golden\n3) Add the spices and stir";
        let steps = split_instructions(blob);
        assert_eq!(
            steps,
            vec![
                "Chop the onions",
                "Fry until golden",
                "Add the spices and stir"
            ]
        );
    }

    #[test]
    fn test_split_instructions_step_headings() {
        let blob = "STEP 1\nPreheat the oven to 180C.\n\nSTEP 2\nMix the flour and butter together well.";
        let steps = split_instructions(blob);
        assert_eq!(steps.len(), 2);
        assert!(steps[0].starts_with("Preheat"));
        assert!(steps[1].starts_with("Mix"));
    }

    #[test]
    fn test_split_instructions_blank_lines() {
        let blob = "Bring a pot of water to the boil\n\nAdd the pasta and cook for ten minutes";
        let steps = split_instructions(blob);
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_split_instructions_sentences() {
        let blob = "Bring a large pot of salted water to the boil. Cook the pasta until al dente. Drain and toss with the sauce.";
        let steps = split_instructions(blob);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[2], "Drain and toss with the sauce.");
    }

    #[test]
    fn test_split_instructions_short_fragment_merges() {
        let blob = "Simmer the sauce for twenty minutes over low heat. Serve hot.";
        let steps = split_instructions(blob);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].ends_with("Serve hot."));
    }

    #[test]
    fn test_split_instructions_single_blob() {
        let steps = split_instructions("Mix everything together");
        assert_eq!(steps, vec!["Mix everything together"]);
        assert!(split_instructions("   ").is_empty());
    }
}
