use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "docfield";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// OCR languages, fixed: Brazilian Portuguese documents with occasional
/// English passages. Tesseract multi-language syntax.
pub const OCR_LANGUAGES: &str = "por+eng";

/// Rendering DPI for the OCR fallback path.
/// 200 DPI balances recognition quality and rasterization cost.
pub const RENDER_DPI: u32 = 200;

/// Default listen address for the extraction API.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Get the application data directory.
/// ~/.docfield/ unless overridden via DOCFIELD_DATA_DIR.
pub fn app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DOCFIELD_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".docfield")
}

/// Directory holding the extracted-text cache database.
pub fn cache_dir() -> PathBuf {
    app_data_dir().join("cache")
}

/// Path of the append-only knowledge store document.
pub fn knowledge_base_path() -> PathBuf {
    app_data_dir().join("knowledge_base.json")
}

/// Listen address, overridable via DOCFIELD_BIND_ADDR.
pub fn bind_addr() -> SocketAddr {
    std::env::var("DOCFIELD_BIND_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            DEFAULT_BIND_ADDR
                .parse()
                .expect("default bind address is valid")
        })
}

/// Tesseract language data directory, overridable via TESSDATA_PREFIX.
pub fn tessdata_dir() -> PathBuf {
    std::env::var("TESSDATA_PREFIX")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/usr/share/tesseract-ocr/5/tessdata"))
}

/// Optional per-document OCR budget via DOCFIELD_OCR_BUDGET_SECS.
/// Unset means unbounded, matching the historical behavior.
pub fn ocr_budget() -> Option<std::time::Duration> {
    let secs: u64 = std::env::var("DOCFIELD_OCR_BUDGET_SECS").ok()?.parse().ok()?;
    Some(std::time::Duration::from_secs(secs))
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{APP_NAME}=info")
}
