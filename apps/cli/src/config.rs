use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only the generate command needs this — `combine` runs offline.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// The default processing roster: every ticker on the master score sheet.
/// Overridable per run with `--symbols`.
pub const DEFAULT_TARGET_SYMBOLS: &[&str] = &[
    "cvx", "algo", "apt", "avax", "bnb", "celo", "atom", "eth", "fil", "inj", "icp", "egld",
    "near", "dot", "red", "ron", "sol", "s", "trx", "arb", "g", "imx", "zk", "gmx", "pendle",
    "snx", "aero", "crv", "ena", "moca", "cake", "sushi", "link", "aave", "savax", "comp", "mpl",
    "vet", "vusdt", "jto", "ldo", "ethx", "ngl", "trac", "sky",
];
