//! Batch client: feeds a directory of PDFs to a running docfield service.
//!
//! Files named `identity_*.pdf` are submitted with the identity-document
//! schema, `ledger_*.pdf` with the ledger schema; everything else is
//! skipped. Results land in `extraction_report.json` next to the inputs.
//!
//! Usage: docfield-batch <pdf-dir> [api-url]

use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine;
use serde_json::{json, Value};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const REPORT_FILE: &str = "extraction_report.json";

fn identity_schema() -> Value {
    json!({
        "name": "Card holder name",
        "registration_number": "Professional registration number"
    })
}

fn ledger_schema() -> Value {
    json!({
        "reference_date": "Statement reference date",
        "overdue_balance": "Amount already due",
        "upcoming_balance": "Amount not yet due",
        "total": "Total amount"
    })
}

struct BatchClient {
    api_url: String,
    client: reqwest::blocking::Client,
}

impl BatchClient {
    fn new(api_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Schema selected by filename prefix; None for files this client
    /// doesn't recognize.
    fn schema_for(filename: &str) -> Option<Value> {
        if filename.starts_with("identity_") {
            Some(identity_schema())
        } else if filename.starts_with("ledger_") {
            Some(ledger_schema())
        } else {
            None
        }
    }

    fn submit(&self, path: &Path, schema: Value) -> Result<Value, String> {
        let bytes = std::fs::read(path).map_err(|e| format!("read failed: {e}"))?;
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let body = json!({
            "label": label,
            "extraction_schema": schema,
            "pdf": base64::engine::general_purpose::STANDARD.encode(&bytes),
        });

        let response = self
            .client
            .post(format!("{}/extract", self.api_url))
            .json(&body)
            .send()
            .map_err(|e| format!("request failed: {e}"))?;

        let status = response.status();
        let payload: Value = response
            .json()
            .map_err(|e| format!("unreadable response: {e}"))?;

        if !status.is_success() {
            return Err(format!("HTTP {status}: {payload}"));
        }
        Ok(payload)
    }

    fn process_dir(&self, dir: &Path) -> Value {
        let mut entries: Vec<PathBuf> = match std::fs::read_dir(dir) {
            Ok(read) => read
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.extension().is_some_and(|ext| ext == "pdf")
                        && p.file_name()
                            .is_some_and(|n| Self::schema_for(&n.to_string_lossy()).is_some())
                })
                .collect(),
            Err(e) => {
                eprintln!("Cannot read {}: {e}", dir.display());
                return Value::Object(Default::default());
            }
        };
        entries.sort();

        let mut results = serde_json::Map::new();
        for path in entries {
            let filename = path.file_name().unwrap_or_default().to_string_lossy();
            let schema = Self::schema_for(&filename).expect("filtered above");
            let label = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();

            match self.submit(&path, schema) {
                Ok(result) => {
                    println!("{label}: ok");
                    results.insert(label, result);
                }
                Err(e) => {
                    eprintln!("{label}: {e}");
                    results.insert(label, json!({ "error": e }));
                }
            }
        }
        Value::Object(results)
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let dir = match args.next() {
        Some(dir) => PathBuf::from(dir),
        None => {
            eprintln!("Usage: docfield-batch <pdf-dir> [api-url]");
            std::process::exit(2);
        }
    };
    let api_url = args.next().unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let client = BatchClient::new(&api_url);
    let results = client.process_dir(&dir);

    let report_path = dir.join(REPORT_FILE);
    match serde_json::to_string_pretty(&results)
        .map_err(|e| e.to_string())
        .and_then(|report| std::fs::write(&report_path, report).map_err(|e| e.to_string()))
    {
        Ok(()) => println!("Report written to {}", report_path.display()),
        Err(e) => {
            eprintln!("Failed to write report: {e}");
            std::process::exit(1);
        }
    }
}
