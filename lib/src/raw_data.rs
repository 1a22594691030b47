use serde::Deserialize;

/// Contents of `index.json`: the authored module catalog.
#[derive(Deserialize, Debug)]
pub struct RawModuleIndex {
    pub modules: Vec<RawModuleData>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawModuleData {
    pub id: String,

    pub name: String,
    pub description: String,
    pub icon: String,
    pub difficulty: String,
    pub questions_count: u32,
    pub color: String,
    pub data_file: String,
}

/// Contents of one module data file.
#[derive(Deserialize, Debug)]
pub struct RawQuestionSetData {
    pub metadata: RawSetMetadata,
    pub questions: Vec<RawQuestionData>,
}

#[derive(Deserialize, Debug)]
pub struct RawSetMetadata {
    pub domain: String,
    pub source: String,
    pub documents_processed: u32,
    pub questions_per_document: u32,
    pub total_questions: u32,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct RawQuestionData {
    pub id: String,

    pub source_document: String,
    pub topic: String,
    pub difficulty: String,
    pub question: String,
    pub choices: Vec<RawChoiceData>,
    /// Authored hint only; the multi-answer fact is derived from the choices.
    #[serde(default)]
    pub multiple_answers: Option<bool>,
    #[serde(default)]
    pub chapter: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct RawChoiceData {
    pub id: String,

    pub text: String,
    pub is_correct: bool,
}
