use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::{ApiError, Operation};

/// One suggested department, as produced by the backend's analysis of an
/// uploaded application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    /// Match strength in `[0, 1]`.
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub rank: Option<u32>,
}

impl Recommendation {
    /// Score as a whole percentage, clamped to `0..=100`.
    pub fn score_percent(&self) -> Option<u8> {
        self.score
            .filter(|s| s.is_finite())
            .map(|s| (s.clamp(0.0, 1.0) * 100.0).round() as u8)
    }
}

#[derive(Deserialize)]
struct RecommendationList {
    #[serde(default)]
    recommendations: Option<Vec<Recommendation>>,
}

impl ApiClient {
    /// Fetch the recommendations computed for `user_id`. An empty list is a
    /// normal result for users who have not uploaded anything yet.
    pub async fn get_recommendations(&self, user_id: i64) -> Result<Vec<Recommendation>, ApiError> {
        let path = format!("/api/recommendation/{user_id}");
        let value = self.send(Operation::Recommendations, reqwest::Method::GET, &path, None).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        let list: RecommendationList = crate::client::decode(Operation::Recommendations, value)?;
        Ok(list.recommendations.unwrap_or_default())
    }
}
