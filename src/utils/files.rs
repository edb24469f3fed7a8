use crate::error::{Error, Result};
use std::path::Path;
use tokio::fs;

const ALLOWED_EXTS: [&str; 4] = ["pdf", "doc", "docx", "txt"];
pub const MAX_CV_BYTES: usize = 10 * 1024 * 1024;

/// Validates and persists an uploaded CV, returning the stored path.
pub async fn save_cv_file(filename: &str, data: &bytes::Bytes) -> Result<String> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    if !ALLOWED_EXTS.contains(&ext.as_str()) {
        return Err(Error::BadRequest(format!(
            "File type .{} is not allowed",
            ext
        )));
    }
    if data.len() > MAX_CV_BYTES {
        return Err(Error::BadRequest("File too large, maximum is 10MB".into()));
    }
    if ext == "pdf" && !data.starts_with(b"%PDF") {
        return Err(Error::BadRequest("Invalid PDF file content".into()));
    }

    let base = crate::config::get_config()
        .uploads_dir
        .clone()
        .unwrap_or_else(|| "./uploads".to_string());
    let upload_dir = format!("{}/cv", base);
    fs::create_dir_all(&upload_dir)
        .await
        .map_err(|e| Error::Internal(e.to_string()))?;

    let file_id = uuid::Uuid::new_v4();
    let file_path = format!("{}/{}.{}", upload_dir, file_id, ext);

    fs::write(&file_path, data).await.map_err(|e| {
        tracing::error!("Failed to write CV file: {}", e);
        Error::Internal(format!("Failed to save file: {}", e))
    })?;

    Ok(file_path)
}

/// Best-effort plain-text extraction. Returns an empty string when the
/// document cannot be read; the caller treats that as a parse failure.
pub async fn extract_text_from_file(file_path: &str) -> String {
    let ext = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "pdf" => {
            let output = tokio::process::Command::new("pdftotext")
                .arg("-layout")
                .arg(file_path)
                .arg("-")
                .output()
                .await;

            match output {
                Ok(out) => String::from_utf8_lossy(&out.stdout).to_string(),
                Err(e) => {
                    tracing::error!("Failed to run pdftotext on {}: {}", file_path, e);
                    String::new()
                }
            }
        }
        "txt" => match fs::read_to_string(file_path).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Failed to read txt file {}: {}", file_path, e);
                String::new()
            }
        },
        _ => String::new(),
    }
}
