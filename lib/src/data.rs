use std::collections::BTreeSet;

use thiserror::Error;

use crate::raw_data::{
    RawChoiceData, RawModuleData, RawQuestionData, RawQuestionSetData, RawSetMetadata,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DataError {
    #[error("module {id} has unknown difficulty {value:?}")]
    UnknownModuleDifficulty { id: String, value: String },

    #[error("question {id} has unknown difficulty {value:?}")]
    UnknownQuestionDifficulty { id: String, value: String },

    #[error("question {id} has no choices")]
    NoChoices { id: String },

    #[error("question {id} has no correct choice")]
    NoCorrectChoice { id: String },

    #[error("question {id} repeats choice id {choice_id}")]
    DuplicateChoiceId { id: String, choice_id: String },

    #[error("question set repeats question id {id}")]
    DuplicateQuestionId { id: String },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ModuleDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl ModuleDifficulty {
    fn parse(module_id: &str, value: &str) -> Result<Self, DataError> {
        match value {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(DataError::UnknownModuleDifficulty {
                id: module_id.to_owned(),
                value: value.to_owned(),
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// One selectable quiz from the catalog. Read-only at runtime.
#[derive(Clone, Debug)]
pub struct ModuleData {
    pub id: String,

    pub name: String,
    pub description: String,
    pub icon: String,
    pub difficulty: ModuleDifficulty,
    pub questions_count: u32,
    pub color: String,
    pub data_file: String,
}

impl TryFrom<RawModuleData> for ModuleData {
    type Error = DataError;

    fn try_from(raw: RawModuleData) -> Result<Self, Self::Error> {
        let difficulty = ModuleDifficulty::parse(&raw.id, &raw.difficulty)?;

        Ok(Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            icon: raw.icon,
            difficulty,
            questions_count: raw.questions_count,
            color: raw.color,
            data_file: raw.data_file,
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QuestionDifficulty {
    Easy,
    Medium,
    Hard,
}

impl QuestionDifficulty {
    fn parse(question_id: &str, value: &str) -> Result<Self, DataError> {
        match value {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(DataError::UnknownQuestionDifficulty {
                id: question_id.to_owned(),
                value: value.to_owned(),
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChoiceData {
    pub id: String,

    pub text: String,
    pub correct: bool,
}

impl From<RawChoiceData> for ChoiceData {
    fn from(raw: RawChoiceData) -> Self {
        Self {
            id: raw.id,
            text: raw.text,
            correct: raw.is_correct,
        }
    }
}

#[derive(Clone, Debug)]
pub struct QuestionData {
    pub id: String,

    pub source_document: String,
    pub topic: String,
    pub difficulty: QuestionDifficulty,
    pub prompt: String,
    pub choices: Vec<ChoiceData>,
    pub chapter: Option<String>,
}

impl QuestionData {
    pub fn choice(&self, choice_id: &str) -> Option<&ChoiceData> {
        self.choices.iter().find(|choice| choice.id == choice_id)
    }

    /// Ids of the choices marked correct.
    pub fn correct_choice_ids(&self) -> BTreeSet<String> {
        self.choices
            .iter()
            .filter(|choice| choice.correct)
            .map(|choice| choice.id.clone())
            .collect()
    }

    /// Derived from the choice set; the stored flag is a hint only.
    pub fn multiple_answers(&self) -> bool {
        self.choices.iter().filter(|choice| choice.correct).count() > 1
    }

    pub fn check(&self) -> Result<(), DataError> {
        if self.choices.is_empty() {
            return Err(DataError::NoChoices {
                id: self.id.clone(),
            });
        }

        if !self.choices.iter().any(|choice| choice.correct) {
            return Err(DataError::NoCorrectChoice {
                id: self.id.clone(),
            });
        }

        let mut seen = BTreeSet::new();
        for choice in &self.choices {
            if !seen.insert(choice.id.as_str()) {
                return Err(DataError::DuplicateChoiceId {
                    id: self.id.clone(),
                    choice_id: choice.id.clone(),
                });
            }
        }

        Ok(())
    }
}

impl TryFrom<RawQuestionData> for QuestionData {
    type Error = DataError;

    fn try_from(raw: RawQuestionData) -> Result<Self, Self::Error> {
        let difficulty = QuestionDifficulty::parse(&raw.id, &raw.difficulty)?;

        let question = Self {
            id: raw.id,
            source_document: raw.source_document,
            topic: raw.topic,
            difficulty,
            prompt: raw.question,
            choices: raw.choices.into_iter().map(Into::into).collect(),
            chapter: raw.chapter,
        };

        if let Some(flag) = raw.multiple_answers {
            if flag != question.multiple_answers() {
                log::warn!(
                    "question {}: multiple_answers flag is {flag} but the choices say {}; using the derived value",
                    question.id,
                    question.multiple_answers(),
                );
            }
        }

        Ok(question)
    }
}

#[derive(Clone, Debug)]
pub struct SetMetadata {
    pub domain: String,
    pub source: String,
    pub documents_processed: u32,
    pub questions_per_document: u32,
    pub total_questions: u32,
}

impl From<RawSetMetadata> for SetMetadata {
    fn from(raw: RawSetMetadata) -> Self {
        Self {
            domain: raw.domain,
            source: raw.source,
            documents_processed: raw.documents_processed,
            questions_per_document: raw.questions_per_document,
            total_questions: raw.total_questions,
        }
    }
}

/// One module's question set. Immutable for the session's lifetime.
#[derive(Clone, Debug)]
pub struct QuestionSetData {
    pub metadata: SetMetadata,
    pub questions: Vec<QuestionData>,
}

impl QuestionSetData {
    pub fn check(&self) -> Result<(), DataError> {
        let mut seen = BTreeSet::new();
        for question in &self.questions {
            question.check()?;

            if !seen.insert(question.id.as_str()) {
                return Err(DataError::DuplicateQuestionId {
                    id: question.id.clone(),
                });
            }
        }

        if self.metadata.total_questions as usize != self.questions.len() {
            log::warn!(
                "question set for {}: metadata says {} questions but {} are present",
                self.metadata.domain,
                self.metadata.total_questions,
                self.questions.len(),
            );
        }

        Ok(())
    }
}

impl TryFrom<RawQuestionSetData> for QuestionSetData {
    type Error = DataError;

    fn try_from(raw: RawQuestionSetData) -> Result<Self, Self::Error> {
        let questions = raw
            .questions
            .into_iter()
            .map(QuestionData::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            metadata: raw.metadata.into(),
            questions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_choice(id: &str, correct: bool) -> RawChoiceData {
        RawChoiceData {
            id: id.to_owned(),
            text: format!("choice {id}"),
            is_correct: correct,
        }
    }

    fn raw_question(id: &str, choices: Vec<RawChoiceData>) -> RawQuestionData {
        RawQuestionData {
            id: id.to_owned(),
            source_document: "notes.pdf".to_owned(),
            topic: "testing".to_owned(),
            difficulty: "easy".to_owned(),
            question: format!("question {id}"),
            choices,
            multiple_answers: None,
            chapter: None,
        }
    }

    #[test]
    fn derives_multiple_answers_from_choices() {
        let mut raw = raw_question(
            "q1",
            vec![
                raw_choice("A", true),
                raw_choice("B", true),
                raw_choice("C", false),
            ],
        );
        // Contradictory authored hint loses to the derived value.
        raw.multiple_answers = Some(false);

        let question = QuestionData::try_from(raw).unwrap();

        assert!(question.multiple_answers());
    }

    #[test]
    fn single_correct_choice_is_not_multiple() {
        let raw = raw_question("q1", vec![raw_choice("A", true), raw_choice("B", false)]);

        let question = QuestionData::try_from(raw).unwrap();

        assert!(!question.multiple_answers());
        assert_eq!(
            question.correct_choice_ids(),
            BTreeSet::from(["A".to_owned()])
        );
    }

    #[test]
    fn check_rejects_question_without_choices() {
        let question = QuestionData::try_from(raw_question("q1", vec![])).unwrap();

        assert_eq!(
            question.check(),
            Err(DataError::NoChoices {
                id: "q1".to_owned()
            })
        );
    }

    #[test]
    fn check_rejects_question_without_correct_choice() {
        let question = QuestionData::try_from(raw_question(
            "q1",
            vec![raw_choice("A", false), raw_choice("B", false)],
        ))
        .unwrap();

        assert_eq!(
            question.check(),
            Err(DataError::NoCorrectChoice {
                id: "q1".to_owned()
            })
        );
    }

    #[test]
    fn check_rejects_duplicate_choice_ids() {
        let question = QuestionData::try_from(raw_question(
            "q1",
            vec![raw_choice("A", true), raw_choice("A", false)],
        ))
        .unwrap();

        assert_eq!(
            question.check(),
            Err(DataError::DuplicateChoiceId {
                id: "q1".to_owned(),
                choice_id: "A".to_owned(),
            })
        );
    }

    #[test]
    fn check_rejects_duplicate_question_ids() {
        let set = QuestionSetData {
            metadata: SetMetadata {
                domain: "Testing".to_owned(),
                source: "notes.pdf".to_owned(),
                documents_processed: 1,
                questions_per_document: 2,
                total_questions: 2,
            },
            questions: vec![
                QuestionData::try_from(raw_question("q1", vec![raw_choice("A", true)])).unwrap(),
                QuestionData::try_from(raw_question("q1", vec![raw_choice("A", true)])).unwrap(),
            ],
        };

        assert_eq!(
            set.check(),
            Err(DataError::DuplicateQuestionId {
                id: "q1".to_owned()
            })
        );
    }

    #[test]
    fn unknown_difficulty_is_rejected() {
        let mut raw = raw_question("q1", vec![raw_choice("A", true)]);
        raw.difficulty = "brutal".to_owned();

        assert_eq!(
            QuestionData::try_from(raw).unwrap_err(),
            DataError::UnknownQuestionDifficulty {
                id: "q1".to_owned(),
                value: "brutal".to_owned(),
            }
        );
    }
}
