//! Response Parser — raw model text → structured `GeneratedContent`.
//!
//! Parsing never fails. Model output is inherently fuzzy, so every extraction
//! degrades to the static default for that field instead of raising; the
//! output document always carries all fields. Missing sections are logged as
//! informational notes only.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::generation::defaults::{
    self, padding_strengths, padding_weaknesses, DEFAULT_BENCHMARK_SCORE,
};
use crate::generation::prompts::SECTION_NAMES;
use crate::models::{GeneratedContent, TraitItem};

const TRAIT_ITEM_COUNT: usize = 3;
const MAX_TITLE_LEN: usize = 80;

/// Item-start markers for strengths/weaknesses lists, in priority order:
/// `**Title**: desc`, `1. Title: desc`, `- Title: desc`.
static ITEM_START_RES: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"\*\*([^:\n*]+?)\*\*\s*:").unwrap(),
        Regex::new(r"(?m)^\s*\d+\.\s*\*{0,2}([^:\n]+?)\*{0,2}\s*:").unwrap(),
        Regex::new(r"(?m)^\s*-\s*\*{0,2}([^:\n]+?)\*{0,2}\s*:").unwrap(),
    ]
});

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)benchmark\s*score[^\d\n]*(\d+(?:\.\d+)?)").unwrap());

#[derive(Debug, Clone, Copy)]
pub enum TraitKind {
    Strengths,
    Weaknesses,
}

/// Parses one raw response into the full content structure. Deterministic:
/// parsing the same text twice yields identical content.
pub fn parse_sections(raw: &str, symbol: &str) -> GeneratedContent {
    let mut content = defaults::default_content(symbol);

    let mut fill = |field: &mut String, name: &str| match extract_section(raw, name) {
        Some(text) => *field = text,
        None => debug!("Section '{name}' not found or empty, keeping default"),
    };

    fill(&mut content.value_generation.description, "Value Generation");
    fill(&mut content.market_position.description, "Market Position");
    fill(&mut content.project_size.description, "Project Size");
    fill(&mut content.real_world_impact.description, "Real World Impact");
    fill(&mut content.founders.description, "Founders");
    fill(&mut content.problem_solving.description, "Problem Solving");
    fill(&mut content.whitepaper.summary, "Whitepaper Summary");

    content.strengths = extract_trait_items(
        extract_section(raw, "Strengths").as_deref(),
        TraitKind::Strengths,
    );
    content.weaknesses = extract_trait_items(
        extract_section(raw, "Weaknesses").as_deref(),
        TraitKind::Weaknesses,
    );
    content.benchmark_score = extract_benchmark_score(raw);

    content
}

/// Extracts the body of a named section: everything after its heading line up
/// to the next recognizable section heading (or end of text). Returns `None`
/// when the heading is absent or the body is empty after trimming.
pub fn extract_section(text: &str, name: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.iter().position(|l| is_section_heading(l, name))?;

    let mut collected: Vec<&str> = Vec::new();
    if let Some(rest) = inline_remainder(lines[start], name) {
        if !rest.is_empty() {
            collected.push(rest);
        }
    }
    for line in &lines[start + 1..] {
        if SECTION_NAMES.iter().any(|n| is_section_heading(line, n)) {
            break;
        }
        collected.push(line);
    }

    let body = clean_section_body(&collected.join("\n"));
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}

/// A heading line starts with the section name after markdown/numbering noise,
/// and is not prose that merely begins with the same words.
fn is_section_heading(line: &str, name: &str) -> bool {
    let trimmed = line.trim().trim_start_matches(|c: char| {
        c.is_ascii_digit() || matches!(c, '#' | '*' | '-' | '.' | ')' | ' ')
    });
    let lower = trimmed.to_lowercase();
    let name_lower = name.to_lowercase();
    if !lower.starts_with(&name_lower) {
        return false;
    }
    let rest = lower[name_lower.len()..].trim_start();
    rest.is_empty() || !rest.starts_with(|c: char| c.is_alphanumeric())
}

/// Text after the first colon following the section name on its heading line.
/// The name is located byte-wise on the original line; lowercasing a copy can
/// shift offsets when a character's lowercase form has a different byte length.
fn inline_remainder<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let end = line
        .as_bytes()
        .windows(name.len())
        .position(|w| w.eq_ignore_ascii_case(name.as_bytes()))
        .map(|i| i + name.len())?;
    let after = line.get(end..)?;
    let colon = after.find(':')?;
    Some(after[colon + 1..].trim())
}

fn clean_section_body(body: &str) -> String {
    body.lines()
        .filter(|l| {
            let t = l.trim();
            // drop "---" separator lines the model sometimes emits
            t.is_empty() || !t.chars().all(|c| matches!(c, '-' | '—' | '–'))
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Extracts exactly three titled items from a strengths/weaknesses section
/// body. Tries the marker patterns first, then paragraph splitting, then pads
/// from the per-kind default list.
pub fn extract_trait_items(section: Option<&str>, kind: TraitKind) -> Vec<TraitItem> {
    let mut padding = match kind {
        TraitKind::Strengths => padding_strengths(),
        TraitKind::Weaknesses => padding_weaknesses(),
    };

    let Some(section) = section else {
        debug!("No {kind:?} section found, using defaults");
        return padding;
    };

    let mut items = match_itemized(section);
    if items.len() < TRAIT_ITEM_COUNT {
        paragraph_items(section, &mut items);
    }
    while items.len() < TRAIT_ITEM_COUNT && !padding.is_empty() {
        items.push(padding.remove(0));
    }
    items.truncate(TRAIT_ITEM_COUNT);
    items
}

/// First marker pattern with at least one usable match wins.
fn match_itemized(section: &str) -> Vec<TraitItem> {
    for re in ITEM_START_RES.iter() {
        let markers: Vec<(String, usize, usize)> = re
            .captures_iter(section)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let title = caps.get(1)?.as_str().replace('*', "").trim().to_string();
                Some((title, whole.start(), whole.end()))
            })
            .collect();
        if markers.is_empty() {
            continue;
        }

        let mut items = Vec::new();
        for (i, (title, _, body_start)) in markers.iter().enumerate() {
            let body_end = markers
                .get(i + 1)
                .map(|(_, next_start, _)| *next_start)
                .unwrap_or(section.len());
            let description = section[*body_start..body_end]
                .trim()
                .trim_end_matches('*')
                .trim()
                .to_string();
            if !title.is_empty() && !description.is_empty() {
                items.push(TraitItem {
                    title: title.clone(),
                    description,
                });
            }
        }
        if !items.is_empty() {
            return items;
        }
    }
    Vec::new()
}

/// Paragraph-based salvage for sections without recognizable item markers.
fn paragraph_items(section: &str, items: &mut Vec<TraitItem>) {
    for para in section.split("\n\n") {
        if items.len() >= TRAIT_ITEM_COUNT {
            break;
        }
        let para = para.trim();
        if para.is_empty() || items.iter().any(|it| para.contains(&it.description)) {
            continue;
        }

        let (title, description) = if let Some((t, d)) = para.split_once(':') {
            (t.to_string(), d.to_string())
        } else if let Some(pos) = para.find(". ") {
            (para[..pos + 1].to_string(), para[pos + 2..].to_string())
        } else {
            continue;
        };

        let title = title.replace('*', "").trim().to_string();
        let description = description.trim().to_string();
        if !title.is_empty()
            && !description.is_empty()
            && title.len() <= MAX_TITLE_LEN
            && !items.iter().any(|it| it.title == title)
        {
            items.push(TraitItem { title, description });
        }
    }
}

/// Pulls the numeric benchmark score out of the raw text, tolerant of
/// surrounding words ("Benchmark Score: 8.5/10" → 8.5). Clamped to 0–10;
/// anything unrecognizable falls back to the neutral default.
pub fn extract_benchmark_score(text: &str) -> f64 {
    SCORE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|score| score.clamp(0.0, 10.0))
        .unwrap_or(DEFAULT_BENCHMARK_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::defaults::default_content;

    const SAMPLE: &str = "\
Here is the content for Algorand:

**1. Value Generation (50-70 words)**:
Algorand creates value by charging tiny fees on every transaction. These fees reward the \
people who keep the network running, and holding ALGO lets users earn a share of new coins.

**2. Market Position (70-100 words)**:
Algorand is best known for being fast and cheap without sacrificing security.

**3. Project Size (70-100 words)**:
Algorand ranks among the larger blockchain platforms by usage and market value.

**4. Real World Impact (70-100 words)**:
Algorand is used by governments and companies in Europe and Latin America.

**5. Founders (70-100 words)**:
Algorand was founded in 2017 by Silvio Micali, a Turing Award winning cryptographer at MIT.

**6. Problem Solving (70-100 words)**:
Algorand solves the problem of slow and expensive blockchains.

**7. Strengths**:
**Fast Transactions**: Payments settle in seconds. This speed makes everyday use practical.
**Low Fees**: Sending money costs a fraction of a cent. This keeps the network affordable for everyone.
**Green Design**: The network uses very little energy. This makes it one of the most eco-friendly chains.

**8. Weaknesses**:
**Tough Competition**: Larger platforms attract more developers. This makes it harder to stand out.
**Limited Awareness**: Many retail investors have never heard of it. This slows mainstream adoption.
**Token Unlocks**: Early backers still hold large amounts. Sales by them can push the price down.

**9. Whitepaper Summary (100-200 words)**:
Algorand's whitepaper describes a lottery-like system where coin holders are randomly picked \
to confirm transactions. Think of it as a raffle where every ticket holder helps keep the \
books honest.

**10. Benchmark Score**:
Benchmark Score: 7.5/10
";

    #[test]
    fn test_parse_extracts_every_narrative_section() {
        let content = parse_sections(SAMPLE, "algo");
        assert!(content
            .value_generation
            .description
            .starts_with("Algorand creates value"));
        assert!(content.market_position.description.contains("fast and cheap"));
        assert!(content
            .project_size
            .description
            .contains("larger blockchain platforms"));
        assert!(content.real_world_impact.description.contains("Latin America"));
        assert!(content.founders.description.contains("Silvio Micali"));
        assert!(content
            .problem_solving
            .description
            .contains("slow and expensive"));
        assert!(content.whitepaper.summary.contains("lottery-like system"));
        // the trailing score line stays out of the whitepaper summary
        assert!(!content.whitepaper.summary.contains("Benchmark Score"));
    }

    #[test]
    fn test_parse_extracts_trait_items() {
        let content = parse_sections(SAMPLE, "algo");
        assert_eq!(content.strengths.len(), 3);
        assert_eq!(content.strengths[0].title, "Fast Transactions");
        assert!(content.strengths[0].description.contains("settle in seconds"));
        assert_eq!(content.weaknesses[2].title, "Token Unlocks");
    }

    #[test]
    fn test_parse_extracts_benchmark_score() {
        let content = parse_sections(SAMPLE, "algo");
        assert_eq!(content.benchmark_score, 7.5);
    }

    #[test]
    fn test_parse_keeps_default_heading_symbol() {
        let content = parse_sections(SAMPLE, "algo");
        assert_eq!(content.value_generation.heading, "How ALGO Generates Value");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse_sections(SAMPLE, "algo");
        let second = parse_sections(SAMPLE, "algo");
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_section_falls_back_to_default() {
        let raw = "**Value Generation**: Makes money from fees.\n\nBenchmark Score: 6/10\n";
        let content = parse_sections(raw, "cvx");
        let defaults = default_content("cvx");
        assert_eq!(content.value_generation.description, "Makes money from fees.");
        assert_eq!(
            content.market_position.description,
            defaults.market_position.description
        );
        assert_eq!(content.founders.description, defaults.founders.description);
        assert_eq!(content.benchmark_score, 6.0);
    }

    #[test]
    fn test_garbage_input_degrades_to_defaults() {
        let content = parse_sections("complete nonsense with no headings at all", "cvx");
        let defaults = default_content("cvx");
        assert_eq!(
            content.value_generation.description,
            defaults.value_generation.description
        );
        assert_eq!(content.whitepaper.summary, defaults.whitepaper.summary);
        assert_eq!(content.benchmark_score, DEFAULT_BENCHMARK_SCORE);
        // absent list sections take the extraction defaults
        assert_eq!(content.strengths[0].title, "Strong Ecosystem Integration");
        assert_eq!(content.weaknesses.len(), 3);
    }

    #[test]
    fn test_empty_section_body_counts_as_missing() {
        let raw = "Value Generation:\n\nMarket Position:\nKnown for speed.\n";
        let content = parse_sections(raw, "cvx");
        let defaults = default_content("cvx");
        assert_eq!(
            content.value_generation.description,
            defaults.value_generation.description
        );
        assert_eq!(content.market_position.description, "Known for speed.");
    }

    #[test]
    fn test_heading_detection_tolerates_markdown_noise() {
        assert!(is_section_heading(
            "**3. Project Size (70-100 words)**:",
            "Project Size"
        ));
        assert!(is_section_heading("PROJECT SIZE", "Project Size"));
        assert!(is_section_heading("## Project Size", "Project Size"));
        // prose that begins with the section words is not a heading
        assert!(!is_section_heading(
            "Value generation is achieved through fees",
            "Value Generation"
        ));
    }

    #[test]
    fn test_inline_remainder_with_length_changing_lowercase() {
        // U+212A (KELVIN SIGN) lowercases to a shorter byte sequence, so
        // offsets found on a lowercased copy would land mid-character here
        let line = "\u{212A}\u{212A}\u{212A}\u{212A}\u{212A}\u{212A}Founders: x";
        assert_eq!(inline_remainder(line, "Founders"), Some("x"));
    }

    #[test]
    fn test_extract_section_with_separator_lines() {
        let raw = "Founders\n---\nStarted by two cryptographers in 2018.\n\nProblem Solving\n---\nFixes slow payments.";
        let body = extract_section(raw, "Founders").unwrap();
        assert_eq!(body, "Started by two cryptographers in 2018.");
    }

    #[test]
    fn test_trait_items_numbered_format() {
        let section = "1. Speed: Very fast settlement. Users never wait.\n\
                       2. Cost: Fees are tiny. Anyone can afford to transact.\n\
                       3. Uptime: The chain has never halted. Reliability builds trust.";
        let items = extract_trait_items(Some(section), TraitKind::Strengths);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Speed");
        assert!(items[0].description.contains("never wait"));
        assert_eq!(items[2].title, "Uptime");
    }

    #[test]
    fn test_trait_items_dash_format_pads_to_three() {
        let section = "- Speed: Very fast settlement. Users never wait.\n\
                       - Cost: Fees are tiny. Anyone can afford to transact.";
        let items = extract_trait_items(Some(section), TraitKind::Strengths);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Speed");
        // third slot padded from the default list
        assert_eq!(items[2].title, "Strong Ecosystem Integration");
    }

    #[test]
    fn test_trait_items_paragraph_fallback() {
        let section = "Global Reach. The project is used on every continent and keeps growing.\n\n\
                       Battle Tested. Years in production without a major incident.";
        let items = extract_trait_items(Some(section), TraitKind::Strengths);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title, "Global Reach.");
        assert_eq!(items[1].title, "Battle Tested.");
    }

    #[test]
    fn test_trait_items_missing_section_uses_defaults() {
        let strengths = extract_trait_items(None, TraitKind::Strengths);
        assert_eq!(strengths.len(), 3);
        assert_eq!(strengths[0].title, "Strong Ecosystem Integration");

        let weaknesses = extract_trait_items(None, TraitKind::Weaknesses);
        assert_eq!(weaknesses[2].title, "Regulatory Uncertainty");
    }

    #[test]
    fn test_benchmark_score_variants() {
        assert_eq!(extract_benchmark_score("Benchmark Score: 8.5/10"), 8.5);
        assert_eq!(extract_benchmark_score("benchmark score is 7 out of 10"), 7.0);
        assert_eq!(extract_benchmark_score("BENCHMARK SCORE - 9/10"), 9.0);
    }

    #[test]
    fn test_benchmark_score_clamps_out_of_range() {
        assert_eq!(extract_benchmark_score("Benchmark Score: 55/10"), 10.0);
    }

    #[test]
    fn test_benchmark_score_default_when_absent() {
        assert_eq!(
            extract_benchmark_score("no score anywhere in this text"),
            DEFAULT_BENCHMARK_SCORE
        );
    }
}
