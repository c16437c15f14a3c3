use thiserror::Error;

pub type SheetsResult<T> = Result<T, SheetsError>;

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Workbook drift: {0}")]
    Drift(String),
}

impl From<rust_xlsxwriter::XlsxError> for SheetsError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        SheetsError::Export(e.to_string())
    }
}
