//! Data preparation for raw catalog exports
//!
//! Turns a raw spreadsheet export (CSV, or the first sheet of an `.xlsx`/`.xls`
//! workbook) into clean records ready to publish. Columns are read by
//! position, the header row is skipped:
//!
//! ```text
//! Name, District, Category, Description, Rating, Best_Time_to_Visit, Latitude, Longitude
//! ```
//!
//! Cleaning rules, in order:
//! 1. trim every cell
//! 2. in Name, commas become spaces and whitespace runs collapse
//! 3. drop rows with a blank Name or District
//! 4. Category: stray symbols become spaces, whitespace collapses, then each
//!    letter run is capitalized (`rock & roll` becomes `Rock & Roll`)
//! 5. blank Description / Best_Time_to_Visit become "Not Available"
//! 6. unparsable Rating takes the median of the valid ratings
//! 7. drop rows whose Latitude or Longitude is not a number

use super::error::CleanError;
use crate::models::{Destination, DestinationId};
use calamine::{Reader, open_workbook_auto};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Placeholder for missing descriptive text
pub const NOT_AVAILABLE: &str = "Not Available";

/// One cleaned row, shaped like the table minus its generated identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    pub name: String,
    pub district: String,
    pub category: String,
    pub description: String,
    pub rating: f64,
    pub best_time_to_visit: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CleanRecord {
    /// Attach an identifier to produce a catalog record
    #[must_use]
    pub fn into_destination(self, id: DestinationId) -> Destination {
        Destination::new(id, self.name, self.district, self.category, self.rating)
            .with_description(self.description)
            .with_best_time(self.best_time_to_visit)
            .with_location(self.latitude, self.longitude)
    }
}

/// Result of a cleaning run
#[derive(Debug, Clone, PartialEq)]
pub struct CleanReport {
    pub records: Vec<CleanRecord>,
    /// Data rows in the input, header excluded
    pub original_rows: usize,
    /// Median used to fill invalid ratings; `None` when no rating was valid
    pub median_rating: Option<f64>,
}

impl CleanReport {
    #[must_use]
    pub fn cleaned_rows(&self) -> usize {
        self.records.len()
    }

    /// Cleaned records with sequential identifiers starting at 1
    #[must_use]
    pub fn destinations(&self) -> Vec<Destination> {
        self.records
            .iter()
            .cloned()
            .zip(1u64..)
            .map(|(record, id)| record.into_destination(DestinationId(id)))
            .collect()
    }
}

/// A row that kept its name and district, rating and location still unresolved
struct PartialRow {
    record: CleanRecord,
    rating: Option<f64>,
    location: Option<(f64, f64)>,
}

/// Compiled cleaning rules
pub struct Cleaner {
    name_commas: Regex,
    whitespace: Regex,
    category_symbols: Regex,
}

impl Cleaner {
    /// # Errors
    ///
    /// Returns `CleanError::Pattern` if a rule fails to compile.
    pub fn new() -> Result<Self, CleanError> {
        Ok(Self {
            name_commas: Regex::new(r"\s*,\s*")?,
            whitespace: Regex::new(r"\s+")?,
            category_symbols: Regex::new(r"[,|@#%^*~`$<>/\\]+")?,
        })
    }

    /// Normalize a destination name
    #[must_use]
    pub fn clean_name(&self, raw: &str) -> String {
        let spaced = self.name_commas.replace_all(raw.trim(), " ");
        self.whitespace.replace_all(&spaced, " ").trim().to_string()
    }

    /// Normalize a category label
    #[must_use]
    pub fn clean_category(&self, raw: &str) -> String {
        let spaced = self.category_symbols.replace_all(raw.trim(), " ");
        let collapsed = self.whitespace.replace_all(&spaced, " ");
        title_case(collapsed.trim())
    }

    /// Clean CSV text
    ///
    /// # Errors
    ///
    /// Returns `CleanError::Csv` if the input is not readable CSV.
    pub fn clean_reader<R: Read>(&self, reader: R) -> Result<CleanReport, CleanError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let rows = csv.records().map(|result| -> Result<Vec<String>, CleanError> {
            let row = result?;
            Ok(row.iter().map(str::to_string).collect())
        });
        self.clean_rows(rows)
    }

    /// Clean the first worksheet of a workbook
    ///
    /// # Errors
    ///
    /// Returns `CleanError::Spreadsheet` if the workbook cannot be read, or
    /// `CleanError::EmptyWorkbook` if it has no sheets.
    pub fn clean_workbook(&self, path: &Path) -> Result<CleanReport, CleanError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| CleanError::EmptyWorkbook(path.display().to_string()))??;

        let rows = range
            .rows()
            .skip(1)
            .map(|row| -> Result<Vec<String>, CleanError> {
                Ok(row.iter().map(ToString::to_string).collect())
            });
        self.clean_rows(rows)
    }

    /// Clean a raw export, choosing the reader by extension
    ///
    /// `.xlsx`, `.xlsm`, `.xls` and `.ods` are read as workbooks, anything
    /// else as CSV.
    ///
    /// # Errors
    ///
    /// Returns `CleanError` if the file cannot be opened or parsed.
    pub fn clean_file(&self, path: &Path) -> Result<CleanReport, CleanError> {
        if is_workbook(path) {
            return self.clean_workbook(path);
        }
        let file = fs::File::open(path)?;
        self.clean_reader(file)
    }

    /// Apply the cleaning rules to data rows (header already skipped)
    fn clean_rows<I>(&self, rows: I) -> Result<CleanReport, CleanError>
    where
        I: IntoIterator<Item = Result<Vec<String>, CleanError>>,
    {
        let mut original_rows = 0;
        let mut partial = Vec::new();

        for result in rows {
            let row = result?;
            original_rows += 1;
            let cell = |i: usize| row.get(i).map(|c| c.trim()).unwrap_or_default();

            let name = self.clean_name(cell(0));
            let district = cell(1).to_string();
            if name.is_empty() || district.is_empty() {
                debug!(row = original_rows, "Dropping row without name or district");
                continue;
            }

            partial.push(PartialRow {
                record: CleanRecord {
                    name,
                    district,
                    category: self.clean_category(cell(2)),
                    description: or_not_available(cell(3)),
                    rating: 0.0,
                    best_time_to_visit: or_not_available(cell(5)),
                    latitude: 0.0,
                    longitude: 0.0,
                },
                rating: parse_number(cell(4)),
                location: parse_number(cell(6)).zip(parse_number(cell(7))),
            });
        }

        // Rows later dropped for their location still count toward the median
        let median_rating = median(partial.iter().filter_map(|r| r.rating).collect());
        if median_rating.is_none() && !partial.is_empty() {
            warn!("No valid ratings found, missing ratings default to 0");
        }

        let records = partial
            .into_iter()
            .filter_map(|row| {
                let Some((latitude, longitude)) = row.location else {
                    debug!(name = %row.record.name, "Dropping row with invalid location");
                    return None;
                };
                Some(CleanRecord {
                    rating: row.rating.or(median_rating).unwrap_or_default(),
                    latitude,
                    longitude,
                    ..row.record
                })
            })
            .collect::<Vec<_>>();

        info!(original_rows, cleaned_rows = records.len(), "Cleaned dataset");
        Ok(CleanReport {
            records,
            original_rows,
            median_rating,
        })
    }
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "xlsx" | "xlsm" | "xls" | "ods"))
}

/// Uppercase the first letter of every letter run, lowercase the rest
///
/// Non-letters are kept and end the current run.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn or_not_available(cell: &str) -> String {
    if cell.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        cell.to_string()
    }
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Write cleaned output; format chosen by extension (`.csv` or `.json`)
///
/// JSON output carries sequential identifiers so it can be loaded directly
/// as a dataset file.
///
/// # Errors
///
/// Returns `CleanError` if the extension is unsupported or writing fails.
pub fn write_report(report: &CleanReport, path: &Path) -> Result<(), CleanError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    match ext.as_str() {
        "csv" => {
            let mut writer = csv::Writer::from_path(path)?;
            for dest in report.destinations() {
                writer.serialize(CsvRow::from(&dest))?;
            }
            writer.flush()?;
        }
        "json" => {
            let json = serde_json::to_string_pretty(&report.destinations())?;
            fs::write(path, json)?;
        }
        _ => return Err(CleanError::UnsupportedFormat(path.display().to_string())),
    }

    info!(path = %path.display(), rows = report.cleaned_rows(), "Wrote cleaned dataset");
    Ok(())
}

/// Flat CSV row; the csv writer cannot serialize absent optional columns
#[derive(Serialize)]
struct CsvRow<'a> {
    id: DestinationId,
    name: &'a str,
    district: &'a str,
    category: &'a str,
    description: &'a str,
    rating: f64,
    best_time_to_visit: Option<&'a str>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl<'a> From<&'a Destination> for CsvRow<'a> {
    fn from(dest: &'a Destination) -> Self {
        Self {
            id: dest.id,
            name: &dest.name,
            district: &dest.district,
            category: &dest.category,
            description: &dest.description,
            rating: dest.rating,
            best_time_to_visit: dest.best_time_to_visit.as_deref(),
            latitude: dest.latitude,
            longitude: dest.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DatasetFormat, parse_records};

    const RAW: &str = "\
Name,District,Category,Description,Rating,Best_Time_to_Visit,Latitude,Longitude
  Rishikesh ,Dehradun,Spiritual,Yoga Capital,4.8,Sep-Mar,30.0869,78.2676
Nainital,Nainital,lake city,City of Lakes,4.7,Mar-Jun,29.3919,79.4542
Auli,Chamoli, skiing destination ,Perfect for skiing,4.9,Nov-Mar,30.5332,79.5638
Mussoorie ,Dehradun,Hill Station,,4.6,Sep-Jun,30.4598,78.0644
Valley of Flowers,Chamoli,trekking,Alpine flowers,invalid_rating,Jun-Oct,30.7266,79.6053
Kedarnath,Rudraprayag,Temple,Lord Shiva Temple,4.9,,30.7352,79.0669
,Pauri,Temple,A temple,3.5,All Year,30.1473,78.7766
Badrinath,Chamoli,Temple,Lord Vishnu Temple,,May-Oct,30.7433,79.4938
Nowhere,Chamoli,Temple,No map,4.0,May-Oct,north,79.0
";

    fn cleaner() -> Cleaner {
        Cleaner::new().unwrap()
    }

    #[test]
    fn test_clean_sample_export() {
        let report = cleaner().clean_reader(RAW.as_bytes()).unwrap();

        assert_eq!(report.original_rows, 9);
        // Blank name and unparsable latitude are dropped
        assert_eq!(report.cleaned_rows(), 7);

        let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Rishikesh",
                "Nainital",
                "Auli",
                "Mussoorie",
                "Valley of Flowers",
                "Kedarnath",
                "Badrinath"
            ]
        );
    }

    #[test]
    fn test_category_title_case() {
        let report = cleaner().clean_reader(RAW.as_bytes()).unwrap();
        assert_eq!(report.records[1].category, "Lake City");
        assert_eq!(report.records[2].category, "Skiing Destination");
        assert_eq!(cleaner().clean_category("hill/station @ top"), "Hill Station Top");
    }

    #[test]
    fn test_category_keeps_punctuation() {
        let cleaner = cleaner();
        assert_eq!(cleaner.clean_category("rock & roll"), "Rock & Roll");
        assert_eq!(cleaner.clean_category("hill-station"), "Hill-Station");
        assert_eq!(cleaner.clean_category("temple (shiva)"), "Temple (Shiva)");
        assert_eq!(cleaner.clean_category("McLeod ganj"), "Mcleod Ganj");
        assert_eq!(cleaner.clean_category("NATURE"), "Nature");
    }

    #[test]
    fn test_title_case_letter_runs() {
        assert_eq!(title_case("o'brien's 3d tour"), "O'Brien'S 3D Tour");
        assert_eq!(title_case(""), "");
    }

    fn workbook_fixture() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/raw_export.xlsx")
    }

    #[test]
    fn test_clean_workbook() {
        let report = cleaner().clean_file(&workbook_fixture()).unwrap();

        assert_eq!(report.original_rows, 4);
        // Blank name and unparsable latitude are dropped
        assert_eq!(report.cleaned_rows(), 2);

        let first = &report.records[0];
        assert_eq!(first.name, "Rishikesh");
        assert_eq!(first.category, "Rock & Roll");
        assert!((first.rating - 4.8).abs() < 1e-9);
        assert!((first.latitude - 30.0869).abs() < 1e-9);

        // Ratings 4.8 and 4.4 are valid; Chopta counts before it is dropped
        let second = &report.records[1];
        assert_eq!(second.category, "Hill-Station");
        assert_eq!(second.description, NOT_AVAILABLE);
        assert!((second.rating - 4.6).abs() < 1e-9, "{}", second.rating);
    }

    #[test]
    fn test_workbook_extensions() {
        assert!(is_workbook(Path::new("raw_tourism_data.xlsx")));
        assert!(is_workbook(Path::new("OLD.XLS")));
        assert!(!is_workbook(Path::new("raw.csv")));
        assert!(!is_workbook(Path::new("raw")));
    }

    #[test]
    fn test_unreadable_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        fs::write(&path, "not a zip archive").unwrap();
        assert!(matches!(
            cleaner().clean_file(&path),
            Err(CleanError::Spreadsheet(_))
        ));
    }

    #[test]
    fn test_missing_text_placeholders() {
        let report = cleaner().clean_reader(RAW.as_bytes()).unwrap();
        assert_eq!(report.records[3].description, NOT_AVAILABLE);
        assert_eq!(report.records[5].best_time_to_visit, NOT_AVAILABLE);
    }

    #[test]
    fn test_invalid_ratings_use_median() {
        let report = cleaner().clean_reader(RAW.as_bytes()).unwrap();
        // Valid ratings: 4.8 4.7 4.9 4.6 4.9 4.0 -> median of six = 4.75
        // (the row without coordinates is dropped after the median is taken)
        let median = report.median_rating.unwrap();
        assert!((median - 4.75).abs() < 1e-9, "{median}");
        assert!((report.records[4].rating - median).abs() < 1e-9);
        assert!((report.records[6].rating - median).abs() < 1e-9);
    }

    #[test]
    fn test_no_valid_ratings() {
        let raw = "Name,District,Category,Description,Rating,Best,Lat,Lon\nA,B,C,D,x,E,1,2\n";
        let report = cleaner().clean_reader(raw.as_bytes()).unwrap();
        assert!(report.median_rating.is_none());
        assert!(report.records[0].rating.abs() < f64::EPSILON);
    }

    #[test]
    fn test_name_commas_collapse() {
        assert_eq!(cleaner().clean_name("  Har Ki Pauri , Haridwar  "), "Har Ki Pauri Haridwar");
        assert_eq!(cleaner().clean_name("Jim   Corbett,National Park"), "Jim Corbett National Park");
    }

    #[test]
    fn test_median() {
        assert_eq!(median(vec![]), None);
        assert_eq!(median(vec![3.0]), Some(3.0));
        assert_eq!(median(vec![4.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_written_json_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("cleaned.json");
        let report = cleaner().clean_reader(RAW.as_bytes()).unwrap();

        write_report(&report, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let records = parse_records(&text, DatasetFormat::Json).unwrap();
        assert_eq!(records.len(), 7);
        assert_eq!(records[0].id, DestinationId(1));
        assert_eq!(records[6].id, DestinationId(7));
    }

    #[test]
    fn test_written_csv_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");
        let report = cleaner().clean_reader(RAW.as_bytes()).unwrap();

        write_report(&report, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let records = parse_records(&text, DatasetFormat::Csv).unwrap();
        assert_eq!(records.len(), 7);
        assert_eq!(records[1].category, "Lake City");
    }

    #[test]
    fn test_unsupported_output() {
        let report = cleaner().clean_reader(RAW.as_bytes()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            write_report(&report, &dir.path().join("out.xlsx")),
            Err(CleanError::UnsupportedFormat(_))
        ));
    }
}
