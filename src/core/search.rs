use crate::core::normalizer::{self, ValidationPolicy};
use crate::core::query::QueryBuilder;
use crate::domain::model::{College, SearchOutcome};
use crate::domain::ports::ModelClient;
use crate::utils::error::{FinderError, Result};

/// 一次搜尋最多兩次嘗試：主要查詢，失敗或沒有有效結果時再做一次備援查詢
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Primary,
    Fallback,
}

impl SearchPhase {
    fn policy(&self) -> ValidationPolicy {
        match self {
            SearchPhase::Primary => ValidationPolicy::DropInvalid,
            SearchPhase::Fallback => ValidationPolicy::FillDefaults,
        }
    }
}

pub struct SearchOrchestrator<M: ModelClient> {
    client: M,
    queries: QueryBuilder,
}

impl<M: ModelClient> SearchOrchestrator<M> {
    pub fn new(client: M) -> Self {
        Self::with_queries(client, QueryBuilder::new())
    }

    pub fn with_queries(client: M, queries: QueryBuilder) -> Self {
        Self { client, queries }
    }

    /// 執行一次完整搜尋。只有設定錯誤會以 Err 回傳，其餘結果都在 SearchOutcome 中
    pub async fn search(&self, location: &str) -> Result<SearchOutcome> {
        let location = location.trim();
        if location.is_empty() {
            return Err(FinderError::InvalidConfigValueError {
                field: "location".to_string(),
                value: location.to_string(),
                reason: "Location cannot be empty".to_string(),
            });
        }

        self.client.ensure_ready()?;

        tracing::info!("🔍 Searching for colleges in: {}", location);

        match self.attempt(SearchPhase::Primary, location).await {
            Ok(colleges) => {
                tracing::info!(
                    "✅ Primary search returned {} colleges for {}",
                    colleges.len(),
                    location
                );
                return Ok(SearchOutcome::Success(colleges));
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ Primary search failed: {} (retryable: {}), trying fallback",
                    e,
                    e.is_retryable()
                );
            }
        }

        match self.attempt(SearchPhase::Fallback, location).await {
            Ok(colleges) => {
                tracing::info!(
                    "✅ Fallback search returned {} colleges for {}",
                    colleges.len(),
                    location
                );
                Ok(SearchOutcome::Success(colleges))
            }
            Err(FinderError::EmptyResultError) => {
                tracing::warn!("❌ No colleges found in {}", location);
                Ok(SearchOutcome::NoResults {
                    location: location.to_string(),
                })
            }
            Err(e) => {
                tracing::error!("❌ Fallback search also failed: {}", e);
                let failed = FinderError::SearchFailedError {
                    location: location.to_string(),
                };
                Ok(SearchOutcome::SearchFailed {
                    location: location.to_string(),
                    message: failed.user_friendly_message(),
                })
            }
        }
    }

    /// 沒有任何有效學校時回傳 EmptyResultError
    async fn attempt(&self, phase: SearchPhase, location: &str) -> Result<Vec<College>> {
        let prompt = match phase {
            SearchPhase::Primary => self.queries.primary_prompt(location),
            SearchPhase::Fallback => self.queries.fallback_prompt(location),
        };

        tracing::debug!(?phase, "Sending prompt ({} chars)", prompt.len());
        let raw = self.client.generate(&prompt).await?;
        tracing::debug!(?phase, "Raw model response: {}", raw);

        let colleges = normalizer::normalize(&raw, phase.policy(), location)?;
        tracing::debug!(?phase, "Normalized {} colleges", colleges.len());
        if colleges.is_empty() {
            return Err(FinderError::EmptyResultError);
        }
        Ok(colleges)
    }
}
