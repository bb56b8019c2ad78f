//! Categorical encoders.
//!
//! Yes/No columns are encoded with a [`LabelEncoder`] fitted on the values
//! observed in the data: classes are sorted and numbered from zero. For the
//! exact values "No" and "Yes" this gives No = 0, Yes = 1, but other spellings
//! or extra categories shift the codes. The predictor's form uses a fixed
//! Yes = 1 / No = 0 convention regardless, see [`YesNoEncoders::agrees_with_fixed`].

use super::data::CleanRecord;
use crate::error::DataError;
use crate::features::{Answer, Label};
use serde::{Deserialize, Serialize};

/// Data-driven mapping from observed text categories to integer codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit on the distinct values, sorted ascending.
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classes: Vec<String> = values.into_iter().map(str::to_string).collect();
        classes.sort();
        classes.dedup();
        LabelEncoder { classes }
    }

    pub fn transform(&self, value: &str) -> Option<usize> {
        self.classes.binary_search_by(|c| c.as_str().cmp(value)).ok()
    }

    /// Like [`transform`](Self::transform), reporting the column on failure.
    pub fn transform_column(&self, column: &str, value: &str) -> Result<f64, DataError> {
        self.transform(value)
            .map(|code| code as f64)
            .ok_or_else(|| DataError::UnseenCategory {
                column: column.to_string(),
                value: value.to_string(),
            })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// Encoders fitted on the two Yes/No columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YesNoEncoders {
    pub stage_fear: LabelEncoder,
    pub drained_after_socializing: LabelEncoder,
}

impl YesNoEncoders {
    /// Fit one encoder per column on the clean records.
    pub fn fit(records: &[CleanRecord]) -> Self {
        YesNoEncoders {
            stage_fear: LabelEncoder::fit(records.iter().map(|r| r.stage_fear.as_str())),
            drained_after_socializing: LabelEncoder::fit(
                records.iter().map(|r| r.drained_after_socializing.as_str()),
            ),
        }
    }

    /// Whether both encoders map "Yes" to 1 and "No" to 0, the convention the
    /// prediction form assumes.
    pub fn agrees_with_fixed(&self) -> bool {
        [&self.stage_fear, &self.drained_after_socializing]
            .iter()
            .all(|encoder| {
                encoder.transform(Answer::Yes.as_str()) == Some(1)
                    && encoder.transform(Answer::No.as_str()) == Some(0)
            })
    }

    /// Encode a form answer with a fitted encoder. Answers the encoder never
    /// saw fall back to the fixed convention.
    pub fn encode_answer(encoder: &LabelEncoder, answer: Answer) -> f64 {
        encoder
            .transform(answer.as_str())
            .map(|code| code as f64)
            .unwrap_or_else(|| answer.as_flag())
    }
}

/// Map the personality column through the fixed dictionary
/// `{"introvert": 0, "extrovert": 1}`.
pub fn encode_personality(text: &str) -> Result<Label, DataError> {
    match text.trim().to_lowercase().as_str() {
        "introvert" => Ok(Label::Introvert),
        "extrovert" => Ok(Label::Extrovert),
        _ => Err(DataError::UnknownLabel(text.to_string())),
    }
}
