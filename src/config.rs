use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub database_url: String,
    pub top_n: u64,
    pub report_format: ReportFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // First CLI argument wins over DATA_DIR.
        let data_dir = std::env::args()
            .nth(1)
            .or_else(|| std::env::var("DATA_DIR").ok())
            .unwrap_or_else(|| ".".to_string());

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://cinedex.db?mode=rwc".to_string());

        let top_n: u64 = std::env::var("TOP_N").ok().and_then(|s| s.parse().ok()).unwrap_or(10);

        let report_format = match std::env::var("REPORT_FORMAT").as_deref() {
            Ok("json") => ReportFormat::Json,
            _ => ReportFormat::Text,
        };

        Ok(Self { data_dir: PathBuf::from(data_dir), database_url, top_n, report_format })
    }
}
