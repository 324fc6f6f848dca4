//! The page envelope returned by every collection endpoint.

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Server-side pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 0-based page index, echoed from the request unless the server clamps.
    pub number: u32,
    pub size: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    #[serde(rename = "totalElements")]
    pub total_elements: u64,
}

/// One page of rows plus its pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub content: Vec<T>,
    pub page: PageInfo,
}

impl<T> ListResult<T> {
    /// Check the envelope invariant `content.len() <= size`.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.content.len() > self.page.size as usize {
            return Err(FetchError::Envelope(format!(
                "content has {} rows but page size is {}",
                self.content.len(),
                self.page.size
            )));
        }
        Ok(())
    }
}
