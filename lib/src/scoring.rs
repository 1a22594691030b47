use std::collections::BTreeSet;

use crate::data::QuestionData;

/// Feedback classification for one choice after the answer is submitted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChoiceStatus {
    /// Correct choice, selected.
    Correct,
    /// Correct choice, not selected.
    Missed,
    /// Wrong choice, selected.
    Incorrect,
    /// Wrong choice, not selected.
    Unselected,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Evaluation {
    pub is_correct: bool,
    /// One status per choice, in the question's choice order.
    pub choice_statuses: Vec<ChoiceStatus>,
}

/// Scores a selection against a question. The answer is correct iff the
/// selection equals the correct-choice set exactly; supersets and subsets
/// earn nothing. The caller guarantees every selected id belongs to the
/// question.
pub fn evaluate(question: &QuestionData, selected: &BTreeSet<String>) -> Evaluation {
    let correct_ids = question.correct_choice_ids();

    let choice_statuses = question
        .choices
        .iter()
        .map(|choice| {
            let is_correct = correct_ids.contains(&choice.id);
            let is_selected = selected.contains(&choice.id);

            match (is_correct, is_selected) {
                (true, true) => ChoiceStatus::Correct,
                (true, false) => ChoiceStatus::Missed,
                (false, true) => ChoiceStatus::Incorrect,
                (false, false) => ChoiceStatus::Unselected,
            }
        })
        .collect();

    Evaluation {
        is_correct: *selected == correct_ids,
        choice_statuses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ChoiceData, QuestionDifficulty};

    fn question(correct: &[&str], incorrect: &[&str]) -> QuestionData {
        let mut choices = Vec::new();

        for id in correct {
            choices.push(ChoiceData {
                id: (*id).to_owned(),
                text: format!("choice {id}"),
                correct: true,
            });
        }
        for id in incorrect {
            choices.push(ChoiceData {
                id: (*id).to_owned(),
                text: format!("choice {id}"),
                correct: false,
            });
        }

        QuestionData {
            id: "q1".to_owned(),
            source_document: "notes.pdf".to_owned(),
            topic: "testing".to_owned(),
            difficulty: QuestionDifficulty::Easy,
            prompt: "question one".to_owned(),
            choices,
            chapter: None,
        }
    }

    fn selection(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|id| (*id).to_owned()).collect()
    }

    #[test]
    fn exact_match_is_correct() {
        let question = question(&["A", "C"], &["B", "D"]);

        assert!(evaluate(&question, &selection(&["A", "C"])).is_correct);
    }

    #[test]
    fn subset_is_incorrect() {
        let question = question(&["A", "C"], &["B", "D"]);

        assert!(!evaluate(&question, &selection(&["A"])).is_correct);
    }

    #[test]
    fn superset_is_incorrect() {
        let question = question(&["A", "C"], &["B", "D"]);

        assert!(!evaluate(&question, &selection(&["A", "B", "C"])).is_correct);
    }

    #[test]
    fn disjoint_selection_is_incorrect() {
        let question = question(&["A", "C"], &["B", "D"]);

        assert!(!evaluate(&question, &selection(&["B", "D"])).is_correct);
    }

    #[test]
    fn statuses_follow_choice_order() {
        let question = question(&["A", "C"], &["B", "D"]);

        let evaluation = evaluate(&question, &selection(&["A", "B"]));

        assert_eq!(
            evaluation.choice_statuses,
            vec![
                ChoiceStatus::Correct,
                ChoiceStatus::Missed,
                ChoiceStatus::Incorrect,
                ChoiceStatus::Unselected,
            ]
        );
    }

    #[test]
    fn single_answer_exact_match() {
        let question = question(&["B"], &["A", "C"]);

        assert!(evaluate(&question, &selection(&["B"])).is_correct);
        assert!(!evaluate(&question, &selection(&["A"])).is_correct);
    }
}
