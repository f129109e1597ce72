//! Local dataset files
//!
//! Reads a `.json` array of records or a `.csv` file whose header row uses the
//! table's column names.

use super::{DatasetSource, LoadError};
use crate::models::Destination;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// On-disk dataset format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Csv,
}

impl DatasetFormat {
    /// Detect the format from a path's extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Decode records from dataset text
///
/// # Errors
///
/// Returns `LoadError` if the text does not match the record shape.
pub fn parse_records(text: &str, format: DatasetFormat) -> Result<Vec<Destination>, LoadError> {
    match format {
        DatasetFormat::Json => Ok(serde_json::from_str(text)?),
        DatasetFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(text.as_bytes());
            reader
                .deserialize()
                .collect::<Result<Vec<Destination>, _>>()
                .map_err(Into::into)
        }
    }
}

/// Dataset read from a local file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<Destination>, LoadError> {
        let format = DatasetFormat::from_path(&self.path)
            .ok_or_else(|| LoadError::UnsupportedFormat(self.path.display().to_string()))?;
        let text = tokio::fs::read_to_string(&self.path).await?;
        parse_records(&text, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_format_detection() {
        assert_eq!(DatasetFormat::from_path(Path::new("a.json")), Some(DatasetFormat::Json));
        assert_eq!(DatasetFormat::from_path(Path::new("a.CSV")), Some(DatasetFormat::Csv));
        assert_eq!(DatasetFormat::from_path(Path::new("a.xlsx")), None);
        assert_eq!(DatasetFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_parse_csv_with_optional_columns() {
        let text = "\
id,name,district,category,description,rating,best_time_to_visit,latitude,longitude
1,Rishikesh,Dehradun,Spiritual,Yoga Capital,4.8,Sep-Mar,30.0869,78.2676
2,Nainital,Nainital,Lake City,City of Lakes,4.7,,,
";
        let records = parse_records(text, DatasetFormat::Csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].best_time_to_visit.as_deref(), Some("Sep-Mar"));
        assert_eq!(records[0].coordinates(), Some((30.0869, 78.2676)));
        assert!(records[1].coordinates().is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_records("{not json", DatasetFormat::Json),
            Err(LoadError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_file_source_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("destinations.json");
        fs::write(
            &path,
            r#"[{"id":1,"name":"Auli","district":"Chamoli","category":"Skiing","description":"","rating":4.9}]"#,
        )
        .unwrap();

        let records = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Auli");
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));
        assert!(matches!(source.fetch().await, Err(LoadError::Io(_))));
    }

    #[tokio::test]
    async fn test_file_source_unsupported_extension() {
        let source = FileSource::new("destinations.xlsx");
        assert!(matches!(source.fetch().await, Err(LoadError::UnsupportedFormat(_))));
    }
}
