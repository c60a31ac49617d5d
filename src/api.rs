use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::CutError;
use crate::report::Report;
use crate::solver::Solver;
use crate::types::CutJob;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

impl From<CutError> for ErrorResponse {
    fn from(err: CutError) -> Self {
        Self {
            error: err.kind(),
            message: err.to_string(),
        }
    }
}

pub async fn optimize(
    Json(job): Json<CutJob>,
) -> Result<Json<Report>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!(
        body = serde_json::to_string(&job).unwrap_or_default(),
        "POST /optimize"
    );

    let solution = Solver::new(job).solve().map_err(|e| {
        let status = if e.is_validation() {
            tracing::warn!(error = %e, "rejected job");
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!(error = %e, "solve failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorResponse::from(e)))
    })?;

    Ok(Json(Report::from(&solution)))
}

pub fn router() -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/optimize", post(optimize))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Notice;

    #[tokio::test]
    async fn test_optimize_example() {
        let job = CutJob::new(10, vec![6, 5, 4, 3], Some(vec![1, 1, 1, 1]));
        let Json(report) = optimize(Json(job)).await.unwrap();
        assert_eq!(report.bar_count, 2);
        assert_eq!(report.total_waste, 2);
        assert_eq!(report.utilization_percent, 90.0);
    }

    #[tokio::test]
    async fn test_optimize_reports_default_demand() {
        let job = CutJob::new(10, vec![4, 4], None);
        let Json(report) = optimize(Json(job)).await.unwrap();
        assert_eq!(report.bar_count, 1);
        assert_eq!(report.notices, vec![Notice::DemandDefaulted]);
    }

    #[tokio::test]
    async fn test_optimize_rejects_oversized_piece() {
        let job = CutJob::new(10, vec![11], None);
        let (status, Json(body)) = optimize(Json(job)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "unpackable_demand");
        assert!(body.message.contains("11"));
    }

    #[tokio::test]
    async fn test_optimize_rejects_huge_demand() {
        let job = CutJob::new(10, vec![1], Some(vec![u32::MAX]));
        let (status, Json(body)) = optimize(Json(job)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "too_many_pieces");
    }

    #[tokio::test]
    async fn test_optimize_rejects_empty_input() {
        let job = CutJob::new(10, vec![], None);
        let (status, Json(body)) = optimize(Json(job)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "input_empty");
    }
}
