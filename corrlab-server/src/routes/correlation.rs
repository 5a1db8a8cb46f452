//! `GET /correlation` — the basket correlation matrix.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use corrlab_core::data::fetch::FetchWindow;
use corrlab_core::CorrelationMatrix;
use std::sync::Arc;

/// Fetch the basket, correlate daily returns, and return the matrix as a
/// nested name→(name→coefficient) mapping.
///
/// Symbols that fail to fetch are simply absent from the output; when every
/// symbol fails the response is `200 OK` with `{}`. The provider client is
/// blocking, so the pipeline runs on the blocking thread pool.
pub async fn correlation_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CorrelationMatrix>, ApiError> {
    let report = tokio::task::spawn_blocking(move || {
        let end = chrono::Local::now().date_naive();
        let window = FetchWindow::trailing_years(end, state.window_years);
        corrlab_core::run(state.provider.as_ref(), &state.basket, window)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("correlation task failed: {e}")))?;

    if report.matrix.is_empty() {
        tracing::warn!(
            skipped = report.skipped.len(),
            "no symbol produced data; returning empty matrix"
        );
    }

    Ok(Json(report.matrix))
}
