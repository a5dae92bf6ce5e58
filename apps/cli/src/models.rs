//! Core data model: score-sheet rows, market snapshots, and the generated
//! content shapes written to disk.
//!
//! Wire names follow the downstream consumer schema, camelCase throughout.
//! Note the `dificultyTag` spelling: the consumer keys on the misspelling.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the project score sheet. Immutable after load.
#[derive(Debug, Clone)]
pub struct ProjectRecord {
    pub name: String,
    /// Lowercase ticker symbol — the unique processing key.
    pub symbol: String,
    pub sector: String,
    pub scores: BenchmarkInputs,
}

/// Analyst scores from the sheet. `None` when a cell is empty or not numeric;
/// a neutral 50.0 is substituted when the profile is assembled.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkInputs {
    pub growth: Option<f64>,
    pub earning: Option<f64>,
    pub fair_value: Option<f64>,
    pub safety: Option<f64>,
}

/// Market snapshot for one symbol, pre-formatted as display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketData {
    pub market_cap: String,
    pub trading_volume: String,
    pub circulating_supply: String,
    pub total_supply: String,
}

impl Default for MarketData {
    fn default() -> Self {
        MarketData {
            market_cap: "N/A".to_string(),
            trading_volume: "N/A".to_string(),
            circulating_supply: "N/A".to_string(),
            total_supply: "N/A".to_string(),
        }
    }
}

/// One narrative content section of a project brief.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionContent {
    pub description: String,
    pub title: String,
    pub heading: String,
    #[serde(rename = "readTime")]
    pub read_time: u32,
    #[serde(rename = "dificultyTag")]
    pub dificulty_tag: String,
}

/// A single strength or weakness entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitItem {
    pub title: String,
    pub description: String,
}

/// Whitepaper summary block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhitepaperContent {
    pub summary: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    #[serde(rename = "readTime")]
    pub read_time: u32,
    #[serde(rename = "dificultyTag")]
    pub dificulty_tag: String,
}

/// Structured view of one model response: the fixed set of content sections
/// plus the model-reported benchmark score. Produced once per project per run;
/// any section the parser cannot recover is populated from the default table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(rename = "valueGeneration")]
    pub value_generation: SectionContent,
    #[serde(rename = "marketPosition")]
    pub market_position: SectionContent,
    #[serde(rename = "projectSize")]
    pub project_size: SectionContent,
    #[serde(rename = "RealWorldImpact")]
    pub real_world_impact: SectionContent,
    pub founders: SectionContent,
    #[serde(rename = "problemSolving")]
    pub problem_solving: SectionContent,
    pub strengths: Vec<TraitItem>,
    pub weaknesses: Vec<TraitItem>,
    pub whitepaper: WhitepaperContent,
    /// Model self-assessment on a 0–10 scale, parsed from the closing line.
    #[serde(rename = "benchmarkScore")]
    pub benchmark_score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Output profile — the per-project JSON document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetOverview {
    pub value_generation: SectionContent,
    pub market_position: SectionContent,
    pub project_size: ProjectSizeSection,
    #[serde(rename = "RealWorldImpact")]
    pub real_world_impact: SectionContent,
}

/// Project Size carries the market snapshot alongside the narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSizeSection {
    #[serde(flatten)]
    pub section: SectionContent,
    #[serde(rename = "keyStats")]
    pub key_stats: MarketData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNarrative {
    pub founders: SectionContent,
    pub problem_solving: SectionContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchAnalysis {
    pub strengths: Vec<TraitItem>,
    pub weaknesses: Vec<TraitItem>,
}

/// One row of the benchmark bar chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkScores {
    pub growth: f64,
    pub earning: f64,
    pub fair_value: f64,
    pub safety: f64,
    /// The model-reported 0–10 outlook from the generated text.
    pub model_score: f64,
    pub bar_data: Vec<BarDatum>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketBenchmarkScores {
    pub description: String,
}

/// The full per-project output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProfile {
    pub id: Uuid,
    pub coin_id: String,
    pub name: String,
    pub title: String,
    pub logo: String,
    pub description: String,
    pub asset_overview: AssetOverview,
    pub project_narrative: ProjectNarrative,
    pub research_analysis: ResearchAnalysis,
    pub benchmark_scores: BenchmarkScores,
    pub whitepaper: WhitepaperContent,
    pub market_benchmark_scores: MarketBenchmarkScores,
}

/// All profiles produced by one run, keyed by lowercase symbol.
/// Insertion order is processing order — `IndexMap` preserves it on disk.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CombinedOutput {
    pub projects: IndexMap<String, ProjectProfile>,
}
