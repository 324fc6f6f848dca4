//! Export downloads with server-provided filenames.

use crate::error::ApiError;
use crate::http::ApiClient;

const DEFAULT_EXPORT_FILENAME: &str = "export";

/// A fetched export: the embedder triggers the actual save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    /// Fetch a binary export. The filename comes from the
    /// `Content-Disposition` response header, with a neutral fallback
    /// when the server omits one.
    pub async fn fetch_export(&self, path: &str) -> Result<Download, ApiError> {
        let response = self.send_raw(path).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }

        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string());

        let bytes = response.bytes().await?.to_vec();
        Ok(Download { filename, bytes })
    }
}

/// Extract a filename from a `Content-Disposition` header value.
///
/// Prefers the RFC 5987 `filename*=` form; falls back to a plain
/// (possibly quoted) `filename=`.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;

    for part in header.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix("filename*=") {
            // charset'language'percent-encoded-name
            let mut pieces = value.splitn(3, '\'');
            if let (Some(_charset), Some(_language), Some(encoded)) =
                (pieces.next(), pieces.next(), pieces.next())
            {
                match percent_decode(encoded) {
                    Some(decoded) if !decoded.is_empty() => return Some(decoded),
                    _ => {}
                }
            }
        } else if let Some(value) = part.strip_prefix("filename=") {
            let trimmed = value.trim().trim_matches('"');
            if !trimmed.is_empty() {
                plain = Some(trimmed.to_string());
            }
        }
    }

    plain
}

fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hex = core::str::from_utf8(hex).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
