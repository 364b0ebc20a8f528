//! Categorical dataset loading.
//!
//! A dataset is an `n × m` table of categorical tokens, one record per line,
//! tokens separated by whitespace. A reserved token (by default `?`) marks a
//! missing value.
//!
//! ```text
//! a b c
//! a ? c
//! x y z
//! ```
//!
//! Every row must carry the column count fixed by the first row. A ragged
//! row is a load error; rows are never padded or truncated.
//!
//! Tokens are encoded per column into dense `u32` codes on load, so the
//! similarity computation compares integers instead of strings.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Default missing-value token.
pub const MISSING: &str = "?";

/// Reader configuration for categorical datasets.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DatasetReader {
    /// Token denoting a missing value.
    missing_token: String,
}

impl DatasetReader {
    /// Create a reader using the default `?` missing token.
    pub fn new() -> Self {
        Self {
            missing_token: MISSING.to_string(),
        }
    }

    /// Set the missing-value token.
    pub fn with_missing_token(mut self, token: impl Into<String>) -> Self {
        self.missing_token = token.into();
        self
    }

    /// The configured missing-value token.
    pub fn missing_token(&self) -> &str {
        &self.missing_token
    }

    /// Parse a dataset from an in-memory string.
    pub fn read_str(&self, input: &str) -> Result<Dataset> {
        self.read(input.as_bytes())
    }

    /// Parse a dataset from a path.
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let file = File::open(path.as_ref())?;
        self.read(BufReader::new(file))
    }

    /// Parse a dataset from any buffered reader.
    pub fn read<R: BufRead>(&self, reader: R) -> Result<Dataset> {
        let mut builder = Encoder::new(&self.missing_token);

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            builder.push(idx + 1, &tokens)?;
        }

        builder.finish()
    }
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

/// An encoded categorical data matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    n_records: usize,
    n_attributes: usize,
    /// Row-major codes; `None` is a missing value.
    codes: Vec<Option<u32>>,
    /// Per-column dictionaries, indexed by code.
    categories: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a dataset from in-memory rows, treating `missing_token` as missing.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] if there are no rows, [`Error::RaggedRow`] if a row's
    /// length differs from the first row's (line numbers are 1-based row indices).
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>], missing_token: &str) -> Result<Self> {
        let mut builder = Encoder::new(missing_token);
        for (idx, row) in rows.iter().enumerate() {
            let tokens: Vec<&str> = row.iter().map(AsRef::as_ref).collect();
            builder.push(idx + 1, &tokens)?;
        }
        builder.finish()
    }

    /// Parse with the default reader.
    pub fn parse(input: &str) -> Result<Self> {
        DatasetReader::new().read_str(input)
    }

    /// Number of records (`n`).
    pub fn n_records(&self) -> usize {
        self.n_records
    }

    /// Number of attributes per record (`m`).
    pub fn n_attributes(&self) -> usize {
        self.n_attributes
    }

    /// Encoded row of record `i`.
    pub fn row(&self, i: usize) -> &[Option<u32>] {
        let start = i * self.n_attributes;
        &self.codes[start..start + self.n_attributes]
    }

    /// Whether attribute `k` of record `i` is missing.
    pub fn is_missing(&self, i: usize, k: usize) -> bool {
        self.row(i)[k].is_none()
    }

    /// Original token of attribute `k` of record `i`, `None` if missing.
    pub fn token(&self, i: usize, k: usize) -> Option<&str> {
        self.row(i)[k].map(|code| self.categories[k][code as usize].as_str())
    }

    /// Number of distinct non-missing values observed in column `k`.
    pub fn cardinality(&self, k: usize) -> usize {
        self.categories[k].len()
    }
}

/// Incremental row encoder shared by the string and in-memory loaders.
struct Encoder<'a> {
    missing_token: &'a str,
    n_attributes: Option<usize>,
    n_records: usize,
    codes: Vec<Option<u32>>,
    dictionaries: Vec<HashMap<String, u32>>,
    categories: Vec<Vec<String>>,
}

impl<'a> Encoder<'a> {
    fn new(missing_token: &'a str) -> Self {
        Self {
            missing_token,
            n_attributes: None,
            n_records: 0,
            codes: Vec::new(),
            dictionaries: Vec::new(),
            categories: Vec::new(),
        }
    }

    fn push(&mut self, line: usize, tokens: &[&str]) -> Result<()> {
        let expected = match self.n_attributes {
            Some(m) => m,
            None => {
                if tokens.is_empty() {
                    return Err(Error::EmptyInput);
                }
                self.n_attributes = Some(tokens.len());
                self.dictionaries = vec![HashMap::new(); tokens.len()];
                self.categories = vec![Vec::new(); tokens.len()];
                tokens.len()
            }
        };

        if tokens.len() != expected {
            return Err(Error::RaggedRow {
                line,
                expected,
                found: tokens.len(),
            });
        }

        for (k, &token) in tokens.iter().enumerate() {
            if token == self.missing_token {
                self.codes.push(None);
                continue;
            }
            let next = self.categories[k].len() as u32;
            let code = *self.dictionaries[k]
                .entry(token.to_string())
                .or_insert_with(|| next);
            if code == next {
                self.categories[k].push(token.to_string());
            }
            self.codes.push(Some(code));
        }

        self.n_records += 1;
        Ok(())
    }

    fn finish(self) -> Result<Dataset> {
        let n_attributes = self.n_attributes.ok_or(Error::EmptyInput)?;
        Ok(Dataset {
            n_records: self.n_records,
            n_attributes,
            codes: self.codes,
            categories: self.categories,
        })
    }
}
