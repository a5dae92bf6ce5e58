//! Static fallback content — the safety net behind the response parser.
//!
//! Every field of a project brief has a default here, so a run always
//! produces a complete document even when the model returns nothing usable.

use chrono::Local;

use crate::models::{GeneratedContent, SectionContent, TraitItem, WhitepaperContent};

/// Neutral midpoint on the 0–10 scale, used when no score line is found.
pub const DEFAULT_BENCHMARK_SCORE: f64 = 5.0;

const SECTION_READ_TIME: u32 = 3;
const WHITEPAPER_READ_TIME: u32 = 5;
const TAG_BEGINNER: &str = "Beginner friendly";
const TAG_INTERMEDIATE: &str = "Intermediate";

fn section(title: &str, heading: String, description: &str) -> SectionContent {
    SectionContent {
        description: description.to_string(),
        title: title.to_string(),
        heading,
        read_time: SECTION_READ_TIME,
        dificulty_tag: TAG_BEGINNER.to_string(),
    }
}

fn item(title: &str, description: &str) -> TraitItem {
    TraitItem {
        title: title.to_string(),
        description: description.to_string(),
    }
}

/// The full default content table for one project, headings formatted with the
/// uppercase symbol. This is both the starting point for parsing and the
/// whole-project fallback when a generation call fails.
pub fn default_content(symbol: &str) -> GeneratedContent {
    let sym = symbol.to_uppercase();
    GeneratedContent {
        value_generation: section(
            "Value Generation",
            format!("How {sym} Generates Value"),
            "This project generates value by providing a valuable service in the cryptocurrency \
             ecosystem. Users benefit from its utility while token holders receive a portion of \
             the fees generated.",
        ),
        market_position: section(
            "Market Position",
            format!("What is {sym} Best Known For"),
            "The project is known for innovation in its sector. It addresses key challenges and \
             offers unique solutions that differentiate it from competitors in the blockchain \
             space.",
        ),
        project_size: section(
            "Project Size",
            format!("How Significant is {sym} in the Crypto Space"),
            "This project has established itself as a notable player in the cryptocurrency \
             ecosystem. It has gained recognition for its technology and utility.",
        ),
        real_world_impact: section(
            "Real World Impact",
            format!("Where Does {sym} Have Influence"),
            "The project has applications across various geographic regions and industries. It \
             provides solutions to real-world problems and has influenced the broader blockchain \
             ecosystem.",
        ),
        founders: section(
            "Founders",
            format!("Who Created {sym}"),
            "The project was created by a team of blockchain experts with backgrounds in \
             technology and finance. They launched the project with a vision to address key \
             challenges in the sector.",
        ),
        problem_solving: section(
            "Problem Solving",
            format!("What challenges does {sym} solve?"),
            "This project solves fundamental challenges in the blockchain space by providing \
             innovative solutions. Its approach addresses inefficiencies and creates new \
             opportunities for users.",
        ),
        strengths: default_strengths(),
        weaknesses: default_weaknesses(),
        whitepaper: WhitepaperContent {
            summary: "The project provides a blockchain-based solution that addresses key \
                      challenges in its sector. It utilizes innovative technology to create value \
                      for users and token holders while maintaining security and efficiency."
                .to_string(),
            last_updated: Local::now().format("%Y-%m-%d").to_string(),
            read_time: WHITEPAPER_READ_TIME,
            dificulty_tag: TAG_INTERMEDIATE.to_string(),
        },
        benchmark_score: DEFAULT_BENCHMARK_SCORE,
    }
}

pub fn default_strengths() -> Vec<TraitItem> {
    vec![
        item(
            "Technical Innovation",
            "The project utilizes cutting-edge technology to deliver its services. This \
             technical foundation provides a competitive advantage in the market.",
        ),
        item(
            "Strong Community",
            "The project has built a dedicated user base that supports its development. This \
             community engagement helps drive adoption and improvement.",
        ),
        item(
            "Practical Utility",
            "The project offers real-world applications that solve tangible problems. This \
             utility creates sustainable demand for its services.",
        ),
    ]
}

pub fn default_weaknesses() -> Vec<TraitItem> {
    vec![
        item(
            "Market Competition",
            "The project faces competition from established players in the space. This \
             competitive landscape could impact its growth potential.",
        ),
        item(
            "Technical Complexity",
            "Some aspects of the project may be difficult for beginners to understand. This \
             complexity could limit mainstream adoption.",
        ),
        item(
            "Regulatory Considerations",
            "The project operates in an evolving regulatory environment. Changes in regulations \
             could affect its operations in certain regions.",
        ),
    ]
}

/// Padding items used when a strengths section was found but yielded fewer
/// than three entries. Distinct from `default_strengths` so a partially parsed
/// list is distinguishable from a whole-section fallback.
pub fn padding_strengths() -> Vec<TraitItem> {
    vec![
        item(
            "Strong Ecosystem Integration",
            "The project effectively integrates with other blockchain protocols. This \
             connectivity enhances its utility and user experience.",
        ),
        item(
            "Active Development",
            "The project maintains an active development roadmap with regular updates. This \
             ongoing development helps keep the technology relevant.",
        ),
        item(
            "User-Focused Design",
            "The platform is designed with user experience as a priority. This user-centric \
             approach helps drive adoption and retention.",
        ),
    ]
}

pub fn padding_weaknesses() -> Vec<TraitItem> {
    vec![
        item(
            "Market Competition",
            "The project faces competition from other protocols in the same space. This \
             competitive environment could limit growth potential.",
        ),
        item(
            "Technical Complexity",
            "Some aspects of the system may be difficult for new users to understand. This \
             learning curve could slow mainstream adoption.",
        ),
        item(
            "Regulatory Uncertainty",
            "Like many blockchain projects, it operates in an evolving regulatory landscape. \
             Future regulatory changes could impact operations.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_content_formats_headings_with_symbol() {
        let content = default_content("algo");
        assert_eq!(content.value_generation.heading, "How ALGO Generates Value");
        assert_eq!(
            content.problem_solving.heading,
            "What challenges does ALGO solve?"
        );
    }

    #[test]
    fn test_default_content_is_complete() {
        let content = default_content("cvx");
        assert_eq!(content.strengths.len(), 3);
        assert_eq!(content.weaknesses.len(), 3);
        assert!(!content.whitepaper.summary.is_empty());
        assert_eq!(content.benchmark_score, DEFAULT_BENCHMARK_SCORE);
    }

    #[test]
    fn test_whitepaper_last_updated_is_iso_date() {
        let content = default_content("cvx");
        let date = &content.whitepaper.last_updated;
        assert_eq!(date.len(), 10);
        assert_eq!(date.matches('-').count(), 2);
    }
}
