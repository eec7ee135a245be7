//! Confirmed label corpus.
//!
//! An append-only CSV file with the columns
//! `url, status, business, category, tags`. The header is written once when
//! the file is created; `tags` is a comma-joined list.
//!
//! Wherever the corpus is optional context, a missing or unreadable file is
//! an empty corpus.

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Category, Error, FetchStatus};

/// One confirmed label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelRecord {
    pub url: String,
    /// Fetch status when the label was confirmed
    pub status: FetchStatus,
    pub business: bool,
    pub category: Category,
    /// Lowercase, trimmed, deduplicated tags
    pub tags: BTreeSet<String>,
}

impl LabelRecord {
    pub fn new<I, S>(
        url: impl Into<String>,
        status: FetchStatus,
        business: bool,
        category: Category,
        tags: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            url: url.into(),
            status,
            business,
            category,
            tags: tags
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// The comma-joined `tags` column value.
    pub fn tags_field(&self) -> String {
        self.tags.iter().map(String::as_str).collect::<Vec<_>>().join(",")
    }
}

/// Split a comma-joined tags column into a tag set.
pub fn parse_tags(field: &str) -> BTreeSet<String> {
    field
        .split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parse a boolean-like column value.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" | "" => Some(false),
        _ => None,
    }
}

/// On-disk row layout.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    url: String,
    #[serde(default)]
    status: FetchStatus,
    #[serde(default)]
    business: String,
    category: String,
    #[serde(default)]
    tags: String,
}

impl TryFrom<CsvRow> for LabelRecord {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        if row.url.trim().is_empty() {
            return Err(Error::MalformedRecord("empty url".to_string()));
        }
        let business = parse_bool(&row.business)
            .ok_or_else(|| Error::MalformedRecord(format!("bad business value: {}", row.business)))?;
        let category = row.category.parse()?;

        Ok(Self {
            url: row.url.trim().to_string(),
            status: row.status,
            business,
            category,
            tags: parse_tags(&row.tags),
        })
    }
}

impl From<&LabelRecord> for CsvRow {
    fn from(record: &LabelRecord) -> Self {
        Self {
            url: record.url.clone(),
            status: record.status,
            business: record.business.to_string(),
            category: record.category.as_str().to_string(),
            tags: record.tags_field(),
        }
    }
}

/// The ordered sequence of confirmed labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    records: Vec<LabelRecord>,
}

impl Corpus {
    pub fn from_records(records: Vec<LabelRecord>) -> Self {
        Self { records }
    }

    /// Load the corpus as optional context: a missing or unreadable file is
    /// an empty corpus.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no label corpus yet");
            return Self::default();
        }
        match Self::read(path) {
            Ok(corpus) => corpus,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable label corpus, using empty corpus");
                Self::default()
            }
        }
    }

    /// Load the corpus for a training run. A missing file is an error;
    /// an unreadable one is an empty corpus.
    pub fn load_required<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingCorpus(path.to_path_buf()));
        }
        Ok(Self::load(path))
    }

    /// Read every well-formed row; malformed rows are skipped with a warning.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path.as_ref())?;

        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<CsvRow>().enumerate() {
            match row.map_err(Error::from).and_then(LabelRecord::try_from) {
                Ok(record) => records.push(record),
                // +2: header line and 1-based numbering
                Err(e) => warn!(line = idx + 2, error = %e, "skipping malformed label row"),
            }
        }

        debug!(path = %path.as_ref().display(), records = records.len(), "loaded label corpus");
        Ok(Self { records })
    }

    /// Append one record, writing the header if the file is new or empty.
    pub fn append<P: AsRef<Path>>(path: P, record: &LabelRecord) -> Result<(), Error> {
        let path = path.as_ref();
        let needs_header = match fs::metadata(path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(CsvRow::from(record))?;
        writer.flush()?;
        Ok(())
    }

    pub fn records(&self) -> &[LabelRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabelRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: LabelRecord) {
        self.records.push(record);
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a LabelRecord;
    type IntoIter = std::slice::Iter<'a, LabelRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
