//! HTTP API Client
//!
//! Functions for communicating with the habit server's REST endpoints.
//! All paths are same-origin relative: the page that serves the WASM
//! bundle also serves the API.

use chrono::NaiveDate;
use gloo_net::http::{Request, Response};
use std::collections::HashMap;

use crate::state::app::{Activity, DayRecord, HabitSeries};

// ============ Request/Response Types ============

/// Payload for creating an activity. A `None` habit lets the server
/// auto-classify from the description.
#[derive(Debug, serde::Serialize)]
pub struct NewActivity {
    pub habit_id: Option<i64>,
    pub description: String,
    pub hours: f64,
    pub date: NaiveDate,
}

#[derive(Debug, serde::Serialize)]
struct UpdateActivityRequest {
    habit_id: i64,
    description: String,
    hours: f64,
}

#[derive(Debug, serde::Deserialize)]
struct MutationResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct AdminQueryResponse {
    #[serde(default)]
    results: Vec<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    error: Option<String>,
}

// ============ API Functions ============

/// Fetch the activity log for one date
pub async fn fetch_activities(date: NaiveDate) -> Result<Vec<Activity>, String> {
    let response = Request::get(&format!("/activities/{}", date))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Server error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Fetch the per-day aggregates for the heatmap.
///
/// Summary entries are validated here, at the boundary: a single malformed
/// record fails the whole fetch rather than reaching the renderer.
pub async fn fetch_grid_data() -> Result<Vec<DayRecord>, String> {
    let response = Request::get("/activity_grid_data")
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Server error: {}", response.status()));
    }

    let records: Vec<DayRecord> = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    for record in &records {
        record
            .validate()
            .map_err(|e| format!("Invalid grid data: {}", e))?;
    }

    Ok(records)
}

/// Fetch the chart series for every habit, keyed by habit name
pub async fn fetch_habit_data() -> Result<HashMap<String, HabitSeries>, String> {
    let response = Request::get("/habit_data")
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Server error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// Create a new activity
pub async fn add_activity(activity: &NewActivity) -> Result<(), String> {
    let response = Request::post("/add_activity")
        .json(activity)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check_mutation(response).await
}

/// Update an existing activity's habit, description, and hours
pub async fn update_activity(
    id: i64,
    habit_id: i64,
    description: &str,
    hours: f64,
) -> Result<(), String> {
    let response = Request::post(&format!("/update_activity/{}", id))
        .json(&UpdateActivityRequest {
            habit_id,
            description: description.to_string(),
            hours,
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check_mutation(response).await
}

/// Delete an activity
pub async fn delete_activity(id: i64) -> Result<(), String> {
    let response = Request::delete(&format!("/delete_activity/{}", id))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    check_mutation(response).await
}

/// Run an ad-hoc query against the admin endpoint
pub async fn run_admin_query(
    query: &str,
) -> Result<Vec<serde_json::Map<String, serde_json::Value>>, String> {
    #[derive(serde::Serialize)]
    struct QueryRequest {
        query: String,
    }

    let response = Request::post("/admin/query")
        .json(&QueryRequest {
            query: query.to_string(),
        })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("Server error: {}", response.status()));
    }

    let result: AdminQueryResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    match result.error {
        Some(e) => Err(e),
        None => Ok(result.results),
    }
}

/// Shared handling for write endpoints: transport errors were already
/// mapped, so interpret the server's `{success, message?}` verdict.
async fn check_mutation(response: Response) -> Result<(), String> {
    if !response.ok() {
        return Err(format!("Server error: {}", response.status()));
    }

    let result: MutationResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    if result.success {
        Ok(())
    } else {
        Err(result.message.unwrap_or_else(|| "Request failed".to_string()))
    }
}
