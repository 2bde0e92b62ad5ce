//! Response Parser — recovers the three contract sections from the provider's raw reply.
//!
//! Never fails. Missing headings degrade to empty lists; a reply with no recognizable
//! headings at all is passed through as the optimized prompt.

use crate::optimizer::input::{OptimizedResult, ResultSource};
use crate::optimizer::prompts::REQUIRED_HEADINGS;

/// Parses a raw provider reply into an `OptimizedResult`.
pub fn parse(raw: &str) -> OptimizedResult {
    let text = strip_code_fences(raw);
    let lines: Vec<&str> = text.lines().collect();

    // Line index of each heading, in contract order.
    let positions: Vec<Option<usize>> = REQUIRED_HEADINGS
        .iter()
        .map(|heading| lines.iter().position(|line| is_heading(line, heading)))
        .collect();

    let body = |section: usize| -> Option<String> {
        let start = positions[section]?;
        let end = positions
            .iter()
            .flatten()
            .copied()
            .filter(|&p| p > start)
            .min()
            .unwrap_or(lines.len());
        Some(lines[start + 1..end].join("\n").trim().to_string())
    };

    let optimized_prompt = body(0).unwrap_or_else(|| {
        // No prompt heading: keep whatever precedes the first recognized heading.
        let first = positions.iter().flatten().copied().min().unwrap_or(lines.len());
        lines[..first].join("\n").trim().to_string()
    });

    OptimizedResult {
        optimized_prompt,
        thought_process: body(1).map(|b| split_bullets(&b)).unwrap_or_default(),
        input_checklist: body(2).map(|b| split_bullets(&b)).unwrap_or_default(),
        raw_response: Some(raw.to_string()),
        source: ResultSource::Provider,
    }
}

/// A heading line matches at any `#` depth of two or more, case-insensitively.
fn is_heading(line: &str, heading: &str) -> bool {
    let wanted = heading.trim_start_matches('#').trim();
    let line = line.trim();
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes < 2 {
        return false;
    }
    let title = line[hashes..].trim().trim_end_matches(':').trim();
    title.eq_ignore_ascii_case(wanted)
}

/// Splits a section body into bullet strings, dropping list markers and blank lines.
fn split_bullets(body: &str) -> Vec<String> {
    body.lines()
        .map(strip_bullet_marker)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_bullet_marker(line: &str) -> &str {
    let line = line.trim();
    for marker in ["- ", "* ", "• ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return rest.trim();
        }
    }
    // Numbered markers: "1." or "1)", followed by whitespace or nothing ("1.5x" is text).
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return rest.trim();
            }
        }
    }
    line
}

/// Strips a code fence wrapping the whole reply, e.g. ```markdown ... ```.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("markdown", "md", ...) on the opening line.
    let stripped = match stripped.find('\n') {
        Some(newline) => &stripped[newline + 1..],
        None => stripped,
    };
    stripped
        .trim_end()
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(stripped.trim())
}
