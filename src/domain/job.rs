use serde::{Deserialize, Serialize};

/// One job listing, normalized from the vendor's hydration payload.
///
/// `title`, `work_type`, `location`, `salary` and `listing_date` stay `None`
/// when the upstream object omits them. The normalizer never invents values
/// for these; the not-null columns reject such rows at insert time instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub title: Option<String>,
    pub company_name: String,
    pub work_type: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    #[serde(default)]
    pub benefit: Vec<String>,
    pub listing_date: Option<String>,
    pub tag: String,
}

/// A job as persisted in the `jobs` table.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: i64,
    pub title: String,
    pub company_name: String,
    pub work_type: String,
    pub location: String,
    pub salary: String,
    pub benefit: Vec<String>,
    pub listing_date: String,
    pub tag: Option<String>,
}

/// Partial update body; absent fields keep their stored value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub work_type: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub benefit: Option<Vec<String>>,
    pub listing_date: Option<String>,
    pub tag: Option<String>,
}
