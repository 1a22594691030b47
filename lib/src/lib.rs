pub mod catalog;
pub mod data;
pub mod raw_data;
pub mod scoring;
pub mod session;

pub use catalog::{CatalogError, ModuleCatalog};
pub use data::{
    ChoiceData, DataError, ModuleData, ModuleDifficulty, QuestionData, QuestionDifficulty,
    QuestionSetData, SetMetadata,
};
pub use scoring::{evaluate, ChoiceStatus, Evaluation};
pub use session::{
    AnswerRecord, AnsweredQuestion, GradeTier, QuestionSnapshot, QuizSession, SessionError,
    Summary,
};
