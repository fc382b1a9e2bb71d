//! Inbound payload validation and outbound response shapes.
//!
//! Payload types mirror the JSON the web client sends. Every field is optional at the serde
//! level so that a missing field is reported as a validation failure instead of a parse error.
//! Response types are plain data. The transport adds the `success` flag.
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize, Serializer};
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};

use crate::db::{Category, NewQuestion, Question};

use super::error::{Error, Result};
use super::quiz::QuizRequest;

#[derive(Debug, Default, Deserialize)]
pub struct NewQuestionPayload {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub difficulty: Option<i64>,
}

impl NewQuestionPayload {
    pub fn validate(self) -> Result<NewQuestion> {
        let question = non_empty(self.question, "question")?;
        let answer = non_empty(self.answer, "answer")?;
        let category = self.category.ok_or(Error::MissingField("category"))?;
        if category < 1 {
            return Err(Error::InvalidField {
                field: "category",
                reason: "must be a positive id",
            });
        }
        let difficulty = self.difficulty.ok_or(Error::MissingField("difficulty"))?;
        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

fn non_empty(value: Option<String>, field: &'static str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingField(field))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchPayload {
    #[serde(default, rename = "searchTerm")]
    pub search_term: Option<String>,
}

impl SearchPayload {
    pub fn term(&self) -> Result<&str> {
        match self.search_term.as_deref() {
            Some(term) if !term.is_empty() => Ok(term),
            _ => Err(Error::EmptySearchTerm),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizPayload {
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
    #[serde(default, alias = "previousQuestions")]
    pub previous_questions: Vec<i64>,
}

impl From<QuizPayload> for QuizRequest {
    fn from(payload: QuizPayload) -> Self {
        QuizRequest {
            category: payload.quiz_category.map(|c| c.id).unwrap_or(0),
            previous_questions: payload.previous_questions.into_iter().collect::<HashSet<_>>(),
        }
    }
}

/// Category labels keyed by id, serialized as a JSON object in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryMap(BTreeMap<i64, String>);

impl CategoryMap {
    pub fn get(&self, id: i64) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Category> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        CategoryMap(iter.into_iter().map(|c| (c.id, c.kind)).collect())
    }
}

/// The category a listing is scoped to. Serializes as `null` or the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentCategory {
    All,
    Named(String),
}

impl Serialize for CurrentCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CurrentCategory::All => serializer.serialize_none(),
            CurrentCategory::Named(label) => serializer.serialize_str(label),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryListing {
    pub categories: CategoryMap,
}

/// One page of the unscoped question listing.
#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: CategoryMap,
    pub current_category: CurrentCategory,
}

/// One page of questions within a single category.
#[derive(Debug, Serialize)]
pub struct CategoryQuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: CurrentCategory,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: CurrentCategory,
}

#[derive(Debug, Serialize)]
pub struct QuizDraw {
    pub question: Option<Question>,
}

#[derive(Debug, Serialize)]
pub struct CreatedQuestion {
    pub question: Question,
}

#[derive(Debug, Serialize)]
pub struct DeletedQuestion {
    pub status: &'static str,
    pub question_id: i64,
}

impl DeletedQuestion {
    pub fn new(question_id: i64) -> Self {
        Self {
            status: "OK",
            question_id,
        }
    }
}
