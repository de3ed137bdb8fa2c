use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub ticket_count: u32,
    pub event_name: String,
    pub pass_base_url: String,
    pub template_pdf: PathBuf,
    pub output_dir: PathBuf,
    pub qr_scale: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        Ok(Self {
            database_url,
            ticket_count: std::env::var("TICKET_COUNT")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            event_name: std::env::var("EVENT_NAME")
                .unwrap_or_else(|_| "Cypher Fest 2025".into()),
            pass_base_url: std::env::var("PASS_BASE_URL")
                .unwrap_or_else(|_| "https://cypherscanner.vercel.app/pass".into()),
            template_pdf: std::env::var("TEMPLATE_PDF")
                .unwrap_or_else(|_| "pass.pdf".into())
                .into(),
            output_dir: std::env::var("OUTPUT_DIR")
                .unwrap_or_else(|_| ".".into())
                .into(),
            qr_scale: std::env::var("QR_SCALE")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(6),
        })
    }
}
