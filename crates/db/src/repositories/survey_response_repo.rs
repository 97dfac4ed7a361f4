//! Repository for the `survey_responses` table.
//!
//! Responses are append-only: there is no update or delete.

use sqlx::types::Json;
use sqlx::PgPool;
use surveydesk_core::survey::{NewSurveyResponse, SurveyResponse};

use crate::models::survey_response::SurveyResponseRow;

/// Column list for `survey_responses` queries.
const COLUMNS: &str = "id, name, email, responses, suggestions, created_at";

/// Provides the read and insert operations for survey responses.
pub struct SurveyResponseRepo;

impl SurveyResponseRepo {
    /// Insert one response, returning the stored row with its assigned id
    /// and timestamp.
    pub async fn create(
        pool: &PgPool,
        input: &NewSurveyResponse,
    ) -> Result<SurveyResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO survey_responses (name, email, responses, suggestions) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SurveyResponseRow>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(Json(input.responses_by_name()))
            .bind(&input.suggestions)
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Every response, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<SurveyResponse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM survey_responses ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, SurveyResponseRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(SurveyResponse::from).collect())
    }

    /// Number of stored responses.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM survey_responses")
            .fetch_one(pool)
            .await
    }
}
