//! Dataset records, cleaning and the train/test split.

use super::encoding::{encode_personality, YesNoEncoders};
use crate::error::DataError;
use crate::features::{Label, NUM_FEATURES};
use csv::ReaderBuilder;
use ndarray::{Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Cell contents treated as missing, in addition to an empty cell. Matched
/// exactly, so "NONE" or "Null" are ordinary values.
const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed)
}

fn de_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    match raw {
        Some(s) if !is_missing(&s) => {
            let value: f64 = s.trim().parse().map_err(serde::de::Error::custom)?;
            Ok(Some(value).filter(|v| !v.is_nan()))
        }
        _ => Ok(None),
    }
}

fn de_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.filter(|s| !is_missing(s)).map(|s| s.trim().to_string()))
}

/// A dataset row as read from CSV. Any cell may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(alias = "time_alone", alias = "Time_spent_Alone", deserialize_with = "de_number")]
    pub time_spent_alone: Option<f64>,
    #[serde(alias = "Stage_fear", deserialize_with = "de_text")]
    pub stage_fear: Option<String>,
    #[serde(alias = "Social_event_attendance", deserialize_with = "de_number")]
    pub social_event_attendance: Option<f64>,
    #[serde(alias = "Going_outside", deserialize_with = "de_number")]
    pub going_outside: Option<f64>,
    #[serde(alias = "Drained_after_socializing", deserialize_with = "de_text")]
    pub drained_after_socializing: Option<String>,
    #[serde(
        alias = "friend_circle_size",
        alias = "Friends_circle_size",
        deserialize_with = "de_number"
    )]
    pub friends_circle_size: Option<f64>,
    #[serde(alias = "Post_frequency", deserialize_with = "de_number")]
    pub post_frequency: Option<f64>,
    #[serde(alias = "Personality", deserialize_with = "de_text")]
    pub personality: Option<String>,
}

impl RawRecord {
    pub fn is_complete(&self) -> bool {
        self.time_spent_alone.is_some()
            && self.stage_fear.is_some()
            && self.social_event_attendance.is_some()
            && self.going_outside.is_some()
            && self.drained_after_socializing.is_some()
            && self.friends_circle_size.is_some()
            && self.post_frequency.is_some()
            && self.personality.is_some()
    }

    fn into_clean(self) -> Option<CleanRecord> {
        Some(CleanRecord {
            time_spent_alone: self.time_spent_alone?,
            stage_fear: self.stage_fear?,
            social_event_attendance: self.social_event_attendance?,
            going_outside: self.going_outside?,
            drained_after_socializing: self.drained_after_socializing?,
            friends_circle_size: self.friends_circle_size?,
            post_frequency: self.post_frequency?,
            personality: self.personality?,
        })
    }
}

/// A dataset row with every cell present.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub time_spent_alone: f64,
    pub stage_fear: String,
    pub social_event_attendance: f64,
    pub going_outside: f64,
    pub drained_after_socializing: String,
    pub friends_circle_size: f64,
    pub post_frequency: f64,
    pub personality: String,
}

/// Load dataset records from a CSV file with headers.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>, DataError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file)
}

/// Read dataset records from any CSV source with headers.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>, DataError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let records = rdr.deserialize().collect::<Result<Vec<RawRecord>, _>>()?;
    Ok(records)
}

/// Drop every record with a missing value in any column. No imputation.
pub fn drop_incomplete(records: Vec<RawRecord>) -> Vec<CleanRecord> {
    let before = records.len();
    let clean: Vec<CleanRecord> = records.into_iter().filter_map(RawRecord::into_clean).collect();
    tracing::info!(
        kept = clean.len(),
        dropped = before - clean.len(),
        "dropped incomplete rows"
    );
    clean
}

/// Numeric training data: one row per person in feature column order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f64>,
    pub y: Vec<Label>,
}

impl Dataset {
    /// Encode clean records with already fitted Yes/No encoders and the fixed
    /// personality dictionary.
    pub fn from_records(
        records: &[CleanRecord],
        encoders: &YesNoEncoders,
    ) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }

        let mut values = Vec::with_capacity(records.len() * NUM_FEATURES);
        let mut y = Vec::with_capacity(records.len());
        for record in records {
            values.extend_from_slice(&[
                record.time_spent_alone,
                encoders.stage_fear.transform_column("stage_fear", &record.stage_fear)?,
                record.social_event_attendance,
                record.going_outside,
                encoders.drained_after_socializing.transform_column(
                    "drained_after_socializing",
                    &record.drained_after_socializing,
                )?,
                record.friends_circle_size,
                record.post_frequency,
            ]);
            y.push(encode_personality(&record.personality)?);
        }

        let x = Array2::from_shape_vec((records.len(), NUM_FEATURES), values)
            .map_err(|_| DataError::Empty)?;
        Ok(Dataset { x, y })
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Number of rows per class, in class-index order.
    pub fn class_counts(&self) -> [usize; 2] {
        let mut counts = [0usize; 2];
        for label in &self.y {
            counts[label.index()] += 1;
        }
        counts
    }

    fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: self.x.select(Axis(0), indices),
            y: indices.iter().map(|&i| self.y[i]).collect(),
        }
    }

    /// Shuffle with a seeded RNG and split into (train, test).
    ///
    /// The test side gets `ceil(n * test_ratio)` rows.
    pub fn train_test_split(&self, test_ratio: f64, seed: u64) -> Result<(Dataset, Dataset), DataError> {
        let n = self.len();
        let n_test = (n as f64 * test_ratio).ceil() as usize;
        if n_test == 0 || n_test >= n {
            return Err(DataError::TooFewRecords(n));
        }

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let (test_idx, train_idx) = indices.split_at(n_test);
        Ok((self.select(train_idx), self.select(test_idx)))
    }
}
