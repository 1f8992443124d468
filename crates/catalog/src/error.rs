use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid page {requested} (catalog has {page_count} pages)")]
    InvalidPage { requested: i64, page_count: usize },

    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    #[error("Empty topic label")]
    EmptyLabel,

    #[error("Duplicate topic label: {0}")]
    DuplicateLabel(String),

    #[error("Duplicate topic text: {0}")]
    DuplicateText(String),
}
