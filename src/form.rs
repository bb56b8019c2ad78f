//! Terminal form for interactive prediction.
//!
//! The form asks for five bounded integers and two Yes/No answers, then waits
//! for the "Predict Personality" action and prints the result. Input outside a
//! slider's range is rejected at the prompt, so the model only ever sees
//! in-range values. Each round starts from the previous round's answers.

use crate::api::Predictor;
use crate::features::{
    Answer, FormInput, Slider, FRIEND_CIRCLE_SIZE, GOING_OUTSIDE, POST_FREQUENCY,
    SOCIAL_EVENT_ATTENDANCE, TIME_ALONE,
};
use std::io::{self, BufRead, Write};

const STAGE_FEAR_QUESTION: &str = "Stage Fear?";
const DRAINED_QUESTION: &str = "Feel drained after socializing?";

/// Interactive form over any line-oriented input and output.
pub struct Form<R, W> {
    input: R,
    output: W,
    current: FormInput,
}

impl<R: BufRead, W: Write> Form<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Form {
            input,
            output,
            current: FormInput::default(),
        }
    }

    /// Run rounds until the user quits or input ends.
    ///
    /// Returns the number of predictions shown.
    pub fn run(&mut self, predictor: &Predictor) -> io::Result<usize> {
        writeln!(self.output, "🧠 Personality Prediction...")?;
        writeln!(
            self.output,
            "Enter the details below to predict whether You are an Introvert or Extrovert.\n"
        )?;

        let mut shown = 0;
        while let Some(input) = self.collect()? {
            self.current = input;
            write!(self.output, "[Enter] Predict Personality  [q] Quit: ")?;
            self.output.flush()?;
            match self.read_line()? {
                Some(line) if line.trim().eq_ignore_ascii_case("q") => break,
                Some(_) => {}
                None => break,
            }

            let label = predictor.predict_input(&input);
            writeln!(self.output, "\nYour Personality : {}\n", label.display())?;
            shown += 1;
        }
        Ok(shown)
    }

    /// Collect one full set of answers. `None` when input ends.
    pub fn collect(&mut self) -> io::Result<Option<FormInput>> {
        let defaults = self.current;
        let input = FormInput {
            time_alone: match self.slider(&TIME_ALONE, defaults.time_alone)? {
                Some(v) => v,
                None => return Ok(None),
            },
            stage_fear: match self.choice(STAGE_FEAR_QUESTION, defaults.stage_fear)? {
                Some(v) => v,
                None => return Ok(None),
            },
            social_event_attendance: match self
                .slider(&SOCIAL_EVENT_ATTENDANCE, defaults.social_event_attendance)?
            {
                Some(v) => v,
                None => return Ok(None),
            },
            going_outside: match self.slider(&GOING_OUTSIDE, defaults.going_outside)? {
                Some(v) => v,
                None => return Ok(None),
            },
            drained_after_socializing: match self
                .choice(DRAINED_QUESTION, defaults.drained_after_socializing)?
            {
                Some(v) => v,
                None => return Ok(None),
            },
            friend_circle_size: match self.slider(&FRIEND_CIRCLE_SIZE, defaults.friend_circle_size)? {
                Some(v) => v,
                None => return Ok(None),
            },
            post_frequency: match self.slider(&POST_FREQUENCY, defaults.post_frequency)? {
                Some(v) => v,
                None => return Ok(None),
            },
        };
        Ok(Some(input))
    }

    /// Prompt until an in-range integer or an empty line (keep `default`).
    fn slider(&mut self, slider: &Slider, default: u8) -> io::Result<Option<u8>> {
        loop {
            write!(
                self.output,
                "{} [{}-{}] ({}): ",
                slider.label, slider.min, slider.max, default
            )?;
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            };
            let text = line.trim();
            if text.is_empty() {
                return Ok(Some(default));
            }
            match text.parse::<i64>() {
                Ok(value) if slider.contains(value) => return Ok(Some(value as u8)),
                _ => writeln!(
                    self.output,
                    "  Please enter a whole number from {} to {}.",
                    slider.min, slider.max
                )?,
            }
        }
    }

    /// Prompt until Yes/No or an empty line (keep `default`).
    fn choice(&mut self, question: &str, default: Answer) -> io::Result<Option<Answer>> {
        loop {
            write!(self.output, "{} [Yes/No] ({}): ", question, default)?;
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            };
            if line.trim().is_empty() {
                return Ok(Some(default));
            }
            match Answer::parse(&line) {
                Some(answer) => return Ok(Some(answer)),
                None => writeln!(self.output, "  Please answer Yes or No.")?,
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Run the form on stdin/stdout.
pub fn run_stdio(predictor: &Predictor) -> io::Result<usize> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Form::new(stdin.lock(), stdout.lock()).run(predictor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Label;
    use crate::forest::{ForestParams, RandomForest};
    use crate::model_loader::ModelArtifact;
    use crate::trainer::encoding::{LabelEncoder, YesNoEncoders};
    use ndarray::Array2;

    fn predictor(dir: &std::path::Path) -> Predictor {
        // Time alone above 6 hours means introvert.
        let x = Array2::from_shape_fn((26, 7), |(i, j)| if j == 0 { (i / 2) as f64 } else { 5.0 });
        let y: Vec<Label> = (0..26)
            .map(|i| if i / 2 > 6 { Label::Introvert } else { Label::Extrovert })
            .collect();
        let params = ForestParams {
            n_trees: 5,
            bootstrap: false,
            ..ForestParams::default()
        };
        let encoders = YesNoEncoders {
            stage_fear: LabelEncoder::fit(["No", "Yes"]),
            drained_after_socializing: LabelEncoder::fit(["No", "Yes"]),
        };
        let path = dir.join("model.json");
        ModelArtifact::new(RandomForest::fit(x.view(), &y, &params), encoders)
            .save(&path)
            .unwrap();
        Predictor::load(&path).unwrap()
    }

    fn run(script: &str) -> (usize, String) {
        let dir = tempfile::tempdir().unwrap();
        let predictor = predictor(dir.path());
        let mut out = Vec::new();
        let shown = Form::new(script.as_bytes(), &mut out).run(&predictor).unwrap();
        (shown, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_defaults_then_predict() {
        let (shown, out) = run("\n\n\n\n\n\n\n\nq\n");
        assert_eq!(shown, 1);
        assert!(out.contains("Your Personality : 🧑‍🤝‍🧑 Extrovert"));
    }

    #[test]
    fn test_out_of_range_is_reprompted() {
        let (shown, out) = run("13\n-1\nabc\n12\nno\n0\n0\nno\n0\n0\n\n");
        assert_eq!(shown, 1);
        assert_eq!(out.matches("Please enter a whole number from 0 to 12.").count(), 3);
        assert!(out.contains("Your Personality : 🧍‍♂️ Introvert"));
    }

    #[test]
    fn test_invalid_choice_is_reprompted() {
        let (_, out) = run("\nmaybe\nyes\n\n\n\n\n\n\n");
        assert!(out.contains("Please answer Yes or No."));
    }

    #[test]
    fn test_previous_answers_become_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let predictor = predictor(dir.path());
        let mut out = Vec::new();
        let mut form = Form::new("12\n\n\n\n\n\n\n\n\n\n\n\n\n\n\nq\n".as_bytes(), &mut out);
        let shown = form.run(&predictor).unwrap();
        assert_eq!(shown, 1);
        assert_eq!(form.current.time_alone, 12);

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Time spent alone (hours/day) [0-12] (12): "));
    }

    #[test]
    fn test_eof_ends_without_prediction() {
        let (shown, out) = run("3\nYes\n");
        assert_eq!(shown, 0);
        assert!(!out.contains("Your Personality"));
    }
}
