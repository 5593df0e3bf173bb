//! Pagination and sorting types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Sort direction for title-ordered listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Direction used by the "reverse sort" link
    pub fn reverse(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(AppError::BadRequest(format!(
                "Invalid sort direction '{}', expected 'asc' or 'desc'",
                other
            ))),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 1-based page request with a fixed size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    /// Build a request for `page_number`. Page 0 is served as the first page.
    pub fn new(page_number: i64, size: i64) -> Result<Self, AppError> {
        if page_number < 0 {
            return Err(AppError::BadRequest(format!(
                "Page number must not be negative, got {}",
                page_number
            )));
        }
        if size < 1 {
            return Err(AppError::Internal(format!("Invalid page size {}", size)));
        }
        Ok(Self {
            page: page_number.max(1),
            size,
        })
    }

    /// Rows to skip. Saturates for huge page numbers, which then read past
    /// the end of any table and come back empty.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }
}

/// A bounded slice of a larger ordered collection plus total counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: i64,
    pub page_size: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_items: i64) -> Self {
        let total_pages = (total_items + request.size - 1) / request.size;
        Self {
            content,
            page_number: request.page,
            page_size: request.size,
            total_items,
            total_pages,
        }
    }
}
