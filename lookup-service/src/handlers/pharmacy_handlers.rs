use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use log::{info, warn};
use std::sync::Arc;

use pharmacy_shared::{
    lookup_pharmacies, models::HealthResponse, LookupQuery, PharmacyList, PharmacySource,
};

use crate::{error::Result, handlers::AppState};

// GET /pharmacies?Q0=..&Q1=..&DG=.. - Look up duty pharmacies
pub async fn get_pharmacies<S: PharmacySource>(
    State(state): State<Arc<AppState<S>>>,
    query: std::result::Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Json<PharmacyList>> {
    // An unreadable query string supplies no parameters; validation still
    // checks the credential before reporting them missing.
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!("Unreadable query string: {}", rejection.body_text());
            LookupQuery::default()
        }
    };

    info!(
        "Pharmacy lookup requested: Q0={:?} Q1={:?} DG={:?}",
        query.region, query.sub_region, query.weekday
    );

    let pharmacies = lookup_pharmacies(
        state.source.as_ref(),
        state.service_key.as_ref(),
        &state.weekdays,
        &query,
    )
    .await?;

    Ok(Json(pharmacies))
}

// GET /health - Liveness probe, no upstream call
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
