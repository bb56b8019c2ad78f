//! Held-out evaluation: confusion matrix and classification report.
//!
//! Metrics are reported only. Training never fails on a bad score.

use super::data::Dataset;
use crate::features::Label;
use crate::forest::Classifier;
use std::fmt;

/// 2×2 confusion matrix. Rows are actual labels, columns predicted labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn from_labels(actual: &[Label], predicted: &[Label]) -> Self {
        debug_assert_eq!(
            actual.len(),
            predicted.len(),
            "predictions and labels must have same length"
        );
        let mut counts = [[0usize; 2]; 2];
        for (a, p) in actual.iter().zip(predicted) {
            counts[a.index()][p.index()] += 1;
        }
        ConfusionMatrix { counts }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        self.counts[0][0] + self.counts[1][1]
    }

    /// Rows whose actual label is `label`.
    pub fn support(&self, label: Label) -> usize {
        self.counts[label.index()].iter().sum()
    }

    /// Rows predicted as `label`.
    pub fn predicted(&self, label: Label) -> usize {
        self.counts[0][label.index()] + self.counts[1][label.index()]
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.correct(), self.total())
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .counts
            .iter()
            .flatten()
            .map(|c| c.to_string().len())
            .max()
            .unwrap_or(1);
        let [[a, b], [c, d]] = self.counts;
        writeln!(f, "[[{:>w$} {:>w$}]", a, b, w = width)?;
        write!(f, " [{:>w$} {:>w$}]]", c, d, w = width)
    }
}

/// Precision, recall and F1 for one class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

impl ClassMetrics {
    fn for_label(matrix: &ConfusionMatrix, label: Label) -> Self {
        let tp = matrix.counts[label.index()][label.index()];
        let precision = ratio(tp, matrix.predicted(label));
        let recall = ratio(tp, matrix.support(label));
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        ClassMetrics {
            precision,
            recall,
            f1,
            support: matrix.support(label),
        }
    }
}

/// Per-class metrics plus accuracy and averages.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes: [ClassMetrics; 2],
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

impl ClassificationReport {
    pub fn from_matrix(matrix: &ConfusionMatrix) -> Self {
        let classes = Label::ALL.map(|label| ClassMetrics::for_label(matrix, label));
        let total = matrix.total();
        let supports = classes.map(|m| m.support as f64);

        ClassificationReport {
            classes,
            accuracy: matrix.accuracy(),
            macro_avg: weighted_average(&classes, [1.0, 1.0], total),
            weighted_avg: weighted_average(&classes, supports, total),
        }
    }
}

fn weighted_average(classes: &[ClassMetrics; 2], weights: [f64; 2], support: usize) -> ClassMetrics {
    let norm: f64 = weights.iter().sum();
    let avg = |field: fn(&ClassMetrics) -> f64| {
        if norm > 0.0 {
            classes
                .iter()
                .zip(weights)
                .map(|(m, w)| field(m) * w)
                .sum::<f64>()
                / norm
        } else {
            0.0
        }
    };
    ClassMetrics {
        precision: avg(|m| m.precision),
        recall: avg(|m| m.recall),
        f1: avg(|m| m.f1),
        support,
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, name: &str, m: &ClassMetrics) -> fmt::Result {
    writeln!(
        f,
        "{:>12} {:>9.2} {:>9.2} {:>9.2} {:>9}",
        name, m.precision, m.recall, m.f1, m.support
    )
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for label in Label::ALL {
            write_row(f, &label.index().to_string(), &self.classes[label.index()])?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        write_row(f, "macro avg", &self.macro_avg)?;
        write_row(f, "weighted avg", &self.weighted_avg)
    }
}

/// Result of evaluating a model on the held-out subset.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub confusion: ConfusionMatrix,
    pub report: ClassificationReport,
}

/// Predict every held-out row and summarize.
pub fn evaluate<C: Classifier>(model: &C, test: &Dataset) -> Evaluation {
    let predicted = model.predict_rows(test.x.view());
    let confusion = ConfusionMatrix::from_labels(&test.y, &predicted);
    let report = ClassificationReport::from_matrix(&confusion);
    Evaluation { confusion, report }
}

/// Print the confusion matrix and the report to stdout.
pub fn print_results(evaluation: &Evaluation) {
    println!("{}", evaluation.confusion);
    println!("{}", evaluation.report);
}

fn ratio(num: usize, den: usize) -> f64 {
    if den > 0 {
        num as f64 / den as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Label::{Extrovert as E, Introvert as I};

    #[test]
    fn test_confusion_matrix_layout() {
        // 2 TN, 1 FP, 1 FN, 3 TP
        let actual = [I, I, I, E, E, E, E];
        let predicted = [I, I, E, I, E, E, E];
        let m = ConfusionMatrix::from_labels(&actual, &predicted);
        assert_eq!(m.counts, [[2, 1], [1, 3]]);
        assert_eq!(m.total(), 7);
        assert_eq!(m.support(I), 3);
        assert_eq!(m.predicted(E), 4);
        assert!((m.accuracy() - 5.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_report_metrics() {
        let actual = [I, I, I, E, E, E, E];
        let predicted = [I, I, E, I, E, E, E];
        let report = ClassificationReport::from_matrix(&ConfusionMatrix::from_labels(&actual, &predicted));

        let intro = report.classes[0];
        assert!((intro.precision - 2.0 / 3.0).abs() < 1e-9);
        assert!((intro.recall - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(intro.support, 3);

        let extro = report.classes[1];
        assert!((extro.precision - 0.75).abs() < 1e-9);
        assert!((extro.recall - 0.75).abs() < 1e-9);
        assert!((extro.f1 - 0.75).abs() < 1e-9);

        assert!((report.macro_avg.recall - (2.0 / 3.0 + 0.75) / 2.0).abs() < 1e-9);
        let weighted = (3.0 * 2.0 / 3.0 + 4.0 * 0.75) / 7.0;
        assert!((report.weighted_avg.recall - weighted).abs() < 1e-9);
        assert_eq!(report.weighted_avg.support, 7);
    }

    #[test]
    fn test_no_predictions_for_class() {
        let actual = [I, E];
        let predicted = [I, I];
        let report = ClassificationReport::from_matrix(&ConfusionMatrix::from_labels(&actual, &predicted));
        assert_eq!(report.classes[1].precision, 0.0);
        assert_eq!(report.classes[1].f1, 0.0);
    }

    #[test]
    fn test_empty() {
        let m = ConfusionMatrix::from_labels(&[], &[]);
        assert_eq!(m.total(), 0);
        assert_eq!(m.accuracy(), 0.0);
    }

    #[test]
    fn test_display() {
        let m = ConfusionMatrix {
            counts: [[120, 8], [10, 142]],
        };
        assert_eq!(m.to_string(), "[[120   8]\n [ 10 142]]");

        let text = ClassificationReport::from_matrix(&m).to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("macro avg"));
        assert!(text.contains("weighted avg"));
        assert!(text.contains("280"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "predictions and labels must have same length")]
    fn test_mismatched_lengths_panic_in_debug() {
        ConfusionMatrix::from_labels(&[I, E], &[I]);
    }
}
