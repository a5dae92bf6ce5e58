//! Prompt Builder — the fixed briefing template and its interpolation.
//!
//! The template is configuration, not derived data: building a prompt is pure
//! textual substitution and never fails. Missing market data interpolates the
//! "N/A" placeholders.

use crate::models::{MarketData, ProjectRecord};

/// Section headers the model is asked to emit, in order. The parser splits the
/// response on these same names.
pub const SECTION_NAMES: &[&str] = &[
    "Value Generation",
    "Market Position",
    "Project Size",
    "Real World Impact",
    "Founders",
    "Problem Solving",
    "Strengths",
    "Weaknesses",
    "Whitepaper Summary",
    "Benchmark Score",
];

/// The briefing prompt. Replace `{name}`, `{symbol}`, `{sector}`,
/// `{description}` and the four market snapshot placeholders before sending.
pub const PROMPT_TEMPLATE: &str = "\
You are creating content for a crypto analytics platform aimed at retail investors moving over \
from traditional finance. Generate jargon-free, beginner-friendly content for a cryptocurrency \
project. Use simple language, avoid technical terms, and make it engaging.

**Project Details**:
- Name: {name}
- Symbol: {symbol}
- Sector: {sector}
- Description: {description}

**Market Snapshot**:
- Market Cap: {market_cap}
- Trading Volume: {trading_volume}
- Circulating Supply: {circulating_supply}
- Total Supply: {total_supply}

For each section below, provide concise and informative content:

1. **Value Generation (50-70 words)**:
   Explain how the project makes money or creates value for its users and token holders.

2. **Market Position (70-100 words)**:
   Highlight what the project is best known for and its main innovation.

3. **Project Size (70-100 words)**:
   Describe the project's importance in the crypto space (e.g., market rank, adoption).

4. **Real World Impact (70-100 words)**:
   Explain where the project is used (regions, industries) and its influence.

5. **Founders (70-100 words)**:
   Describe who created the project, when, and their background.

6. **Problem Solving (70-100 words)**:
   Explain the main problem the project solves and why it matters.

7. **Strengths**:
   List 3 key strengths, each with a title and 2 sentences of description.
   Format each as: **Title**: Description.

8. **Weaknesses**:
   List 3 potential concerns, each with a title and 2 sentences of description.
   Format each as: **Title**: Description.

9. **Whitepaper Summary (100-200 words)**:
   Summarize the project's core idea, innovation, token use, and problem solved.

10. **Benchmark Score**:
    Rate the project's overall outlook for a long-term investor on a scale of 0 to 10.
    Format the line exactly as: Benchmark Score: X/10

FORMAT YOUR RESPONSE WITH CLEAR SECTION HEADERS.
";

/// Builds the generation prompt for one project.
pub fn build_prompt(record: &ProjectRecord, market_data: &MarketData) -> String {
    PROMPT_TEMPLATE
        .replace("{name}", &record.name)
        .replace("{symbol}", &record.symbol.to_uppercase())
        .replace("{sector}", &record.sector)
        .replace("{description}", &describe(record))
        .replace("{market_cap}", &market_data.market_cap)
        .replace("{trading_volume}", &market_data.trading_volume)
        .replace("{circulating_supply}", &market_data.circulating_supply)
        .replace("{total_supply}", &market_data.total_supply)
}

/// One-line project description synthesized from the sheet fields.
pub fn describe(record: &ProjectRecord) -> String {
    format!(
        "{} is a decentralized protocol in the {} sector.",
        record.name, record.sector
    )
}
