use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::data::QuestionData;
use crate::scoring::{self, ChoiceStatus, Evaluation};

/// Rejected transitions. None of these change session state.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("the session is already complete")]
    SessionComplete,

    #[error("submitted answer for question {submitted} but the current question is {current}")]
    QuestionMismatch { submitted: String, current: String },

    #[error("question {id} has already been answered")]
    AlreadyAnswered { id: String },

    #[error("a submission requires at least one selected choice")]
    EmptySelection,

    #[error("choice {choice_id} does not belong to question {question_id}")]
    UnknownChoice {
        question_id: String,
        choice_id: String,
    },

    #[error("the current question has not been answered yet")]
    NotAnswered,

    #[error("the session is not complete yet")]
    NotComplete,
}

/// A question's recorded outcome. Created on the first submission and never
/// mutated afterwards.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AnswerRecord {
    pub selected: BTreeSet<String>,
    pub is_correct: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GradeTier {
    Excellent,
    Great,
    Good,
    Practice,
}

impl GradeTier {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::Excellent
        } else if percentage >= 75.0 {
            Self::Great
        } else if percentage >= 60.0 {
            Self::Good
        } else {
            Self::Practice
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent!",
            Self::Great => "Great Job!",
            Self::Good => "Good!",
            Self::Practice => "Keep Practicing!",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Summary {
    pub score_count: usize,
    pub total_count: usize,
    /// Rounded to one decimal place; defined as 0.0 for an empty session.
    pub percentage: f64,
    pub grade: GradeTier,
}

/// Read-only view of the current question, sufficient for any rendering
/// layer. `None` is returned instead once the session is complete.
#[derive(Debug)]
pub struct QuestionSnapshot<'a> {
    pub question: &'a QuestionData,
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    /// `(index + 1) / total`.
    pub progress: f64,
    /// Correct answers among the questions before the current one.
    pub running_score: usize,
    pub answered: Option<AnsweredQuestion<'a>>,
}

#[derive(Debug)]
pub struct AnsweredQuestion<'a> {
    pub record: &'a AnswerRecord,
    /// Recomputed per-choice feedback, in the question's choice order.
    pub statuses: Vec<ChoiceStatus>,
}

/// Tracks one user's pass through a module's questions: a pointer into the
/// question list plus the per-question results, ending in a summary.
#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: Vec<QuestionData>,
    current_index: usize,
    results: BTreeMap<String, AnswerRecord>,
    complete: bool,
}

impl QuizSession {
    /// An empty question list starts the session already complete; its
    /// summary is 0 of 0, 0.0%.
    pub fn new(questions: Vec<QuestionData>) -> Self {
        let complete = questions.is_empty();

        Self {
            questions,
            current_index: 0,
            results: BTreeMap::new(),
            complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    fn current_question(&self) -> Result<&QuestionData, SessionError> {
        if self.complete {
            return Err(SessionError::SessionComplete);
        }

        // The index stays in bounds while the session is in progress.
        Ok(&self.questions[self.current_index])
    }

    /// Records the first answer for the current question and returns its
    /// evaluation. The pointer does not move.
    pub fn submit_answer(
        &mut self,
        question_id: &str,
        selected: BTreeSet<String>,
    ) -> Result<Evaluation, SessionError> {
        let question = self.current_question()?;

        if question.id != question_id {
            return Err(SessionError::QuestionMismatch {
                submitted: question_id.to_owned(),
                current: question.id.clone(),
            });
        }

        if self.results.contains_key(question_id) {
            return Err(SessionError::AlreadyAnswered {
                id: question_id.to_owned(),
            });
        }

        if selected.is_empty() {
            return Err(SessionError::EmptySelection);
        }

        if let Some(choice_id) = selected.iter().find(|id| question.choice(id).is_none()) {
            return Err(SessionError::UnknownChoice {
                question_id: question_id.to_owned(),
                choice_id: choice_id.clone(),
            });
        }

        let evaluation = scoring::evaluate(question, &selected);

        log::debug!(
            "question {question_id} answered {}",
            if evaluation.is_correct {
                "correctly"
            } else {
                "incorrectly"
            },
        );

        self.results.insert(
            question_id.to_owned(),
            AnswerRecord {
                selected,
                is_correct: evaluation.is_correct,
            },
        );

        Ok(evaluation)
    }

    /// Moves to the next question, or to the completed state from the last
    /// one. The current question must have been answered.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        let question = self.current_question()?;

        if !self.results.contains_key(&question.id) {
            return Err(SessionError::NotAnswered);
        }

        if self.current_index + 1 == self.questions.len() {
            self.complete = true;
            log::debug!("session complete after {} questions", self.questions.len());
        } else {
            self.current_index += 1;
        }

        Ok(())
    }

    /// Back to the first question with no results. The only transition that
    /// clears recorded answers.
    pub fn restart(&mut self) {
        self.current_index = 0;
        self.results.clear();
        self.complete = self.questions.is_empty();
    }

    pub fn snapshot(&self) -> Option<QuestionSnapshot<'_>> {
        if self.complete {
            return None;
        }

        let question = &self.questions[self.current_index];
        let total = self.questions.len();

        let running_score = self.questions[..self.current_index]
            .iter()
            .filter_map(|question| self.results.get(&question.id))
            .filter(|record| record.is_correct)
            .count();

        let answered = self.results.get(&question.id).map(|record| {
            let statuses = scoring::evaluate(question, &record.selected).choice_statuses;

            AnsweredQuestion { record, statuses }
        });

        Some(QuestionSnapshot {
            question,
            position: self.current_index + 1,
            total,
            progress: (self.current_index + 1) as f64 / total as f64,
            running_score,
            answered,
        })
    }

    pub fn summary(&self) -> Result<Summary, SessionError> {
        if !self.complete {
            return Err(SessionError::NotComplete);
        }

        let score_count = self
            .results
            .values()
            .filter(|record| record.is_correct)
            .count();
        let total_count = self.questions.len();
        let percentage = percentage(score_count, total_count);

        Ok(Summary {
            score_count,
            total_count,
            percentage,
            grade: GradeTier::from_percentage(percentage),
        })
    }
}

/// Score as a percentage rounded to one decimal place; 0.0 for an empty
/// session.
fn percentage(score_count: usize, total_count: usize) -> f64 {
    if total_count == 0 {
        return 0.0;
    }

    (score_count as f64 / total_count as f64 * 1000.0).round() / 10.0
}
