//! Profile assembly — merges parsed content, sheet scores, and market data
//! into the per-project output document.

use uuid::Uuid;

use crate::generation::prompts::describe;
use crate::models::{
    AssetOverview, BarDatum, BenchmarkScores, GeneratedContent, MarketBenchmarkScores, MarketData,
    ProjectNarrative, ProjectProfile, ProjectRecord, ProjectSizeSection, ResearchAnalysis,
};

const PLACEHOLDER_COIN_ID: &str = "00000000-0000-0000-0000-000000000000";
/// Neutral percentile used when a score cell was empty on the sheet.
const DEFAULT_SHEET_SCORE: f64 = 50.0;

pub fn build_profile(
    record: &ProjectRecord,
    content: &GeneratedContent,
    market_data: &MarketData,
) -> ProjectProfile {
    let growth = record.scores.growth.unwrap_or(DEFAULT_SHEET_SCORE);
    let earning = record.scores.earning.unwrap_or(DEFAULT_SHEET_SCORE);
    let fair_value = record.scores.fair_value.unwrap_or(DEFAULT_SHEET_SCORE);
    let safety = record.scores.safety.unwrap_or(DEFAULT_SHEET_SCORE);

    let slug = record.name.to_lowercase().replace(' ', "-");

    ProjectProfile {
        id: Uuid::new_v4(),
        coin_id: PLACEHOLDER_COIN_ID.to_string(),
        name: record.name.clone(),
        title: format!("{} Analysis", record.name),
        logo: format!("https://cryptologos.cc/logos/{slug}-{}-logo.svg", record.symbol),
        description: describe(record),
        asset_overview: AssetOverview {
            value_generation: content.value_generation.clone(),
            market_position: content.market_position.clone(),
            project_size: ProjectSizeSection {
                section: content.project_size.clone(),
                key_stats: market_data.clone(),
            },
            real_world_impact: content.real_world_impact.clone(),
        },
        project_narrative: ProjectNarrative {
            founders: content.founders.clone(),
            problem_solving: content.problem_solving.clone(),
        },
        research_analysis: ResearchAnalysis {
            strengths: content.strengths.clone(),
            weaknesses: content.weaknesses.clone(),
        },
        benchmark_scores: BenchmarkScores {
            growth,
            earning,
            fair_value,
            safety,
            model_score: content.benchmark_score,
            bar_data: vec![
                bar("User Growth", growth, "#4CAF50"),
                bar("Earnings Quality", earning, "#2196F3"),
                bar("Fair Value", fair_value, "#FFC107"),
                bar("Safety Score", safety, "#9C27B0"),
            ],
        },
        whitepaper: content.whitepaper.clone(),
        market_benchmark_scores: MarketBenchmarkScores {
            description: format!(
                "These scores compare {name}'s growth, revenue generation, valuation, and \
                 financial health to the overall cryptocurrency market. Higher scores indicate \
                 better performance and show {name}'s percentile in these areas. Compare scores \
                 across different cryptocurrencies to identify more attractive investments!",
                name = record.name
            ),
        },
    }
}

fn bar(label: &str, value: f64, color: &str) -> BarDatum {
    BarDatum {
        label: label.to_string(),
        value,
        color: color.to_string(),
    }
}
