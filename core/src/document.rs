use serde::{Deserialize, Serialize};
use std::fmt;

pub type DocId = i32;
pub type Rating = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// One ranked search hit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Document {
    pub id: DocId,
    pub relevance: f64,
    pub rating: Rating,
}

impl Document {
    pub fn new(id: DocId, relevance: f64, rating: Rating) -> Self {
        Self { id, relevance, rating }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Mean of the ratings rounded towards negative infinity, 0 when there are none.
pub fn average_rating(ratings: &[Rating]) -> Rating {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    sum.div_euclid(ratings.len() as i64) as Rating
}
