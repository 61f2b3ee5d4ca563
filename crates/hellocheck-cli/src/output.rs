use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use hellocheck_core::hello::types::ExtractedHandshake;
use hellocheck_core::verify::VerifyReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Invalid output format '{}'. Expected 'text' or 'json'.", s),
        }
    }
}

#[derive(Serialize)]
struct JsonRecord<'a, T: Serialize> {
    timestamp: String,
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    passed: Option<bool>,
    #[serde(flatten)]
    body: &'a T,
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

pub fn print_handshake(source: &Path, hello: &ExtractedHandshake, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("  Source:     {}", source.display());
            println!("  Ciphers:    {} suites", hello.cipher_suites.len());
            for name in &hello.cipher_suites {
                println!("              {}", name);
            }
            if !hello.protocol_versions.is_empty() {
                println!("  Sup. vers:  {}", hello.protocol_versions.join(", "));
            }
            if !hello.alpn_protocols.is_empty() {
                println!("  ALPN:       {}", hello.alpn_protocols.join(", "));
            }
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        }
        OutputFormat::Json => {
            let record = JsonRecord {
                timestamp: timestamp(),
                source: source.display().to_string(),
                passed: None,
                body: hello,
            };
            println!("{}", serde_json::to_string(&record)?);
        }
    }
    Ok(())
}

pub fn print_report(source: &Path, report: &VerifyReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("  Source:     {}", source.display());
            println!("  ──────────────────────────────────────────────────");
            for line in report.to_string().lines() {
                println!("  {}", line);
            }
            println!("  ──────────────────────────────────────────────────");
            println!("  Result:     {}", if report.passed() { "PASS" } else { "FAIL" });
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        }
        OutputFormat::Json => {
            let record = JsonRecord {
                timestamp: timestamp(),
                source: source.display().to_string(),
                passed: Some(report.passed()),
                body: report,
            };
            println!("{}", serde_json::to_string(&record)?);
        }
    }
    Ok(())
}
