//! `/v2/backstory` and its sub endpoints. The parent itself is not a resource,
//! it only hands out [`Endpoint<BackstoryAnswer>`] and [`Endpoint<BackstoryQuestion>`].
use crate::{prelude::*, Client};

pub type QuestionId = u32;
const E_P_URL: &str = const_format::concatcp!(crate::V2_PREFIX, "/backstory");
const SUB_FLAGS: EndpointFlags = EndpointFlags::NONE
    .paginated()
    .bulk()
    .bulk_all()
    .localized()
    .checked();

/// marker for the `/v2/backstory` parent descriptor
#[derive(Debug, Clone, Copy)]
pub struct Backstory;

/// one answer to a biography question in character creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackstoryAnswer {
    /// looks like `"7-54"` on the live api
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub journal: String,
    pub question: Option<QuestionId>,
    /// restricted to these professions if present
    pub professions: Option<Vec<String>>,
    pub races: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackstoryQuestion {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub answers: Vec<String>,
    pub order: Option<u32>,
    pub races: Option<Vec<String>>,
    pub professions: Option<Vec<String>>,
}

impl Client {
    pub fn backstory(&self) -> Endpoint<Backstory> {
        self.endpoint(E_P_URL, EndpointFlags::NONE)
    }
}

impl Endpoint<Backstory> {
    pub fn answers(&self) -> Endpoint<BackstoryAnswer> {
        self.child("answers", SUB_FLAGS)
    }
    pub fn questions(&self) -> Endpoint<BackstoryQuestion> {
        self.child("questions", SUB_FLAGS)
    }
}
