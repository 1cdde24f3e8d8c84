use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// userId → rating (1..=5) for one recipe.
pub type Ratings = BTreeMap<String, u8>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub text: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub url: String,
    pub date: String,
}
