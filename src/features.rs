//! Feature vector, label and form input types shared by training and prediction.
//!
//! The model never sees column names at inference time, only positions, so
//! [`FEATURE_COLUMNS`] is the single source of truth for the column order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of input features.
pub const NUM_FEATURES: usize = 7;

/// Feature columns in model order.
pub const FEATURE_COLUMNS: [&str; NUM_FEATURES] = [
    "time_spent_alone",
    "stage_fear",
    "social_event_attendance",
    "going_outside",
    "drained_after_socializing",
    "friends_circle_size",
    "post_frequency",
];

/// Position of the stage fear column.
pub const STAGE_FEAR_INDEX: usize = 1;
/// Position of the drained-after-socializing column.
pub const DRAINED_INDEX: usize = 4;

/// Bounded integer input, rendered as a slider in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    pub label: &'static str,
    pub min: u8,
    pub max: u8,
    pub default: u8,
}

impl Slider {
    pub const fn new(label: &'static str, min: u8, max: u8) -> Self {
        Slider {
            label,
            min,
            max,
            default: 5,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min as i64 && value <= self.max as i64
    }
}

pub const TIME_ALONE: Slider = Slider::new("Time spent alone (hours/day)", 0, 12);
pub const SOCIAL_EVENT_ATTENDANCE: Slider = Slider::new("Social event attendance (0-10)", 0, 10);
pub const GOING_OUTSIDE: Slider = Slider::new("Interest in going outside (0-10)", 0, 10);
pub const FRIEND_CIRCLE_SIZE: Slider = Slider::new("Friend circle size (0-15)", 0, 15);
pub const POST_FREQUENCY: Slider = Slider::new("Post frequency on social media (0-10)", 0, 10);

/// Answer to a binary Yes/No question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Fixed prediction-time encoding: Yes = 1, No = 0.
    pub fn as_flag(self) -> f64 {
        match self {
            Answer::Yes => 1.0,
            Answer::No => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }

    /// Parse a user choice. Accepts "yes"/"y"/"no"/"n" in any case.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "yes" | "y" => Some(Answer::Yes),
            "no" | "n" => Some(Answer::No),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Personality label predicted by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Label {
    Introvert = 0,
    Extrovert = 1,
}

impl Label {
    /// All labels in class-index order.
    pub const ALL: [Label; 2] = [Label::Introvert, Label::Extrovert];

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Label::Introvert),
            1 => Some(Label::Extrovert),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Label::Introvert => "Introvert",
            Label::Extrovert => "Extrovert",
        }
    }

    /// Label as shown in the form output.
    pub fn display(self) -> &'static str {
        match self {
            Label::Introvert => "🧍‍♂️ Introvert",
            Label::Extrovert => "🧑‍🤝‍🧑 Extrovert",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-order numeric encoding of one person's answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; NUM_FEATURES]);

impl FeatureVector {
    pub fn new(values: [f64; NUM_FEATURES]) -> Self {
        FeatureVector(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<&FormInput> for FeatureVector {
    /// Uses the fixed Yes = 1 / No = 0 convention.
    fn from(input: &FormInput) -> Self {
        FeatureVector([
            input.time_alone as f64,
            input.stage_fear.as_flag(),
            input.social_event_attendance as f64,
            input.going_outside as f64,
            input.drained_after_socializing.as_flag(),
            input.friend_circle_size as f64,
            input.post_frequency as f64,
        ])
    }
}

/// Raw values collected by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormInput {
    pub time_alone: u8,
    pub stage_fear: Answer,
    pub social_event_attendance: u8,
    pub going_outside: u8,
    pub drained_after_socializing: Answer,
    pub friend_circle_size: u8,
    pub post_frequency: u8,
}

impl FormInput {
    /// Minimum of every range, both answers "No".
    pub fn minimum() -> Self {
        FormInput {
            time_alone: TIME_ALONE.min,
            stage_fear: Answer::No,
            social_event_attendance: SOCIAL_EVENT_ATTENDANCE.min,
            going_outside: GOING_OUTSIDE.min,
            drained_after_socializing: Answer::No,
            friend_circle_size: FRIEND_CIRCLE_SIZE.min,
            post_frequency: POST_FREQUENCY.min,
        }
    }

    /// Maximum of every range, both answers "Yes".
    pub fn maximum() -> Self {
        FormInput {
            time_alone: TIME_ALONE.max,
            stage_fear: Answer::Yes,
            social_event_attendance: SOCIAL_EVENT_ATTENDANCE.max,
            going_outside: GOING_OUTSIDE.max,
            drained_after_socializing: Answer::Yes,
            friend_circle_size: FRIEND_CIRCLE_SIZE.max,
            post_frequency: POST_FREQUENCY.max,
        }
    }
}

impl Default for FormInput {
    /// The form's initial state: every slider at 5, both answers "Yes".
    fn default() -> Self {
        FormInput {
            time_alone: TIME_ALONE.default,
            stage_fear: Answer::Yes,
            social_event_attendance: SOCIAL_EVENT_ATTENDANCE.default,
            going_outside: GOING_OUTSIDE.default,
            drained_after_socializing: Answer::Yes,
            friend_circle_size: FRIEND_CIRCLE_SIZE.default,
            post_frequency: POST_FREQUENCY.default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping_is_total() {
        assert_eq!(Label::from_index(0), Some(Label::Introvert));
        assert_eq!(Label::from_index(1), Some(Label::Extrovert));
        assert_eq!(Label::from_index(2), None);
        assert_eq!(Label::Introvert.name(), "Introvert");
        assert_eq!(Label::Extrovert.name(), "Extrovert");
        for label in Label::ALL {
            assert_eq!(Label::from_index(label.index()), Some(label));
        }
    }

    #[test]
    fn test_display_labels() {
        assert!(Label::Introvert.display().ends_with("Introvert"));
        assert!(Label::Extrovert.display().ends_with("Extrovert"));
    }

    #[test]
    fn test_fixed_yes_no_encoding() {
        let v = FeatureVector::from(&FormInput::maximum());
        assert_eq!(v.0[STAGE_FEAR_INDEX], 1.0);
        assert_eq!(v.0[DRAINED_INDEX], 1.0);

        let v = FeatureVector::from(&FormInput::minimum());
        assert_eq!(v.0[STAGE_FEAR_INDEX], 0.0);
        assert_eq!(v.0[DRAINED_INDEX], 0.0);
    }

    #[test]
    fn test_feature_order() {
        let input = FormInput {
            time_alone: 1,
            stage_fear: Answer::Yes,
            social_event_attendance: 2,
            going_outside: 3,
            drained_after_socializing: Answer::No,
            friend_circle_size: 4,
            post_frequency: 5,
        };
        let v = FeatureVector::from(&input);
        assert_eq!(v.as_slice(), &[1.0, 1.0, 2.0, 3.0, 0.0, 4.0, 5.0]);
    }

    #[test]
    fn test_answer_parse() {
        assert_eq!(Answer::parse(" YES "), Some(Answer::Yes));
        assert_eq!(Answer::parse("n"), Some(Answer::No));
        assert_eq!(Answer::parse("maybe"), None);
    }

    #[test]
    fn test_slider_bounds() {
        assert!(TIME_ALONE.contains(0));
        assert!(TIME_ALONE.contains(12));
        assert!(!TIME_ALONE.contains(13));
        assert!(!FRIEND_CIRCLE_SIZE.contains(-1));
    }
}
