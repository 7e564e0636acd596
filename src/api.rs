use crate::store::{Visit, VisitOutcome};
use crate::errors::{ApiError, ServerResult};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Host, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Serialize)]
pub struct CreateUserResponse {
    message: String,
    user: Value,
}

#[derive(Deserialize)]
pub struct CreateLinkRequest {
    url: Option<String>,
    validity: Option<i64>,
    shortcode: Option<String>,
}

#[derive(Serialize)]
pub struct CreateLinkResponse {
    shortlink: String,
    expiry: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct LinkStatsResponse {
    shortcode: String,
    total_clicks: u64,
    original_url: String,
    creation_date: DateTime<Utc>,
    expiry_date: DateTime<Utc>,
    click_data: Vec<Visit>,
}

pub async fn greeting() -> &'static str {
    "Hello Vishal 🚀 — Your Rust backend is running!"
}

pub async fn list_users() -> Json<Vec<User>> {
    // Rebuilt per request; no handler mutates it.
    Json(vec![
        User {
            id: 1,
            name: "Vishal".to_string(),
        },
        User {
            id: 2,
            name: "AI Enthusiast".to_string(),
        },
    ])
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ServerResult<impl IntoResponse> {
    // An absent body echoes as an empty object.
    let user: Value = if body.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::bad_request("Invalid JSON body", Some(e.to_string())))?
    };

    if let Some(monitoring) = &state.monitoring {
        monitoring.log_user_echoed(&user).await;
    }
    if let Some(shipper) = &state.shipper {
        shipper.info("users", "User payload echoed back to client.").await;
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created ✅".to_string(),
            user,
        }),
    ))
}

pub async fn create_short_url(
    State(state): State<Arc<AppState>>,
    Host(host): Host,
    Json(req): Json<CreateLinkRequest>,
) -> ServerResult<impl IntoResponse> {
    let Some(url) = req.url else {
        if let Some(shipper) = &state.shipper {
            shipper.error("shorturls", "Missing 'url' field in request body.").await;
        }
        return Err(ApiError::bad_request("Missing 'url' field", None))?;
    };

    let validity = req.validity.unwrap_or(30);

    let created = match state.links.create(&url, validity, req.shortcode.as_deref()) {
        Ok(created) => created,
        Err(e) => {
            if let Some(shipper) = &state.shipper {
                shipper
                    .error(
                        "shorturls",
                        format!(
                            "Invalid or duplicate custom shortcode: {}",
                            req.shortcode.as_deref().unwrap_or_default()
                        ),
                    )
                    .await;
            }
            tracing::debug!(%e, "Rejected custom shortcode");
            return Err(ApiError::conflict("Invalid or duplicate custom shortcode"))?;
        }
    };

    if let Some(monitoring) = &state.monitoring {
        monitoring.log_link_created(&created.shortcode, &url).await;
    }
    if let Some(shipper) = &state.shipper {
        shipper.info("shorturls", format!("New short URL created for {}", url)).await;
    }

    let shortlink = format!("http://{}/{}", host, created.shortcode);
    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            shortlink,
            expiry: created.expires_at,
        }),
    ))
}

pub async fn redirect_short_url(
    State(state): State<Arc<AppState>>,
    Path(shortcode): Path<String>,
    headers: HeaderMap,
) -> Response {
    let referrer = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    match state.links.record_visit(&shortcode, referrer) {
        Some(VisitOutcome::Redirect(url)) => {
            if let Some(monitoring) = &state.monitoring {
                monitoring.log_link_visited(&shortcode, &url).await;
            }
            if let Some(shipper) = &state.shipper {
                shipper
                    .info("redirect", format!("Redirecting {} to {}", shortcode, url))
                    .await;
            }
            Redirect::temporary(&url).into_response()
        }
        Some(VisitOutcome::Expired) => {
            if let Some(monitoring) = &state.monitoring {
                monitoring.log_link_expired(&shortcode).await;
            }
            if let Some(shipper) = &state.shipper {
                shipper
                    .warn("redirect", format!("Expired shortcode accessed: {}", shortcode))
                    .await;
            }
            (StatusCode::GONE, "This short URL has expired.").into_response()
        }
        None => {
            if let Some(monitoring) = &state.monitoring {
                monitoring.log_link_missing(&shortcode).await;
            }
            if let Some(shipper) = &state.shipper {
                shipper
                    .error("redirect", format!("Shortcode not found: {}", shortcode))
                    .await;
            }
            (StatusCode::NOT_FOUND, "Short URL not found.").into_response()
        }
    }
}

pub async fn link_stats(
    State(state): State<Arc<AppState>>,
    Path(shortcode): Path<String>,
) -> ServerResult<Json<LinkStatsResponse>> {
    let Some(link) = state.links.stats(&shortcode) else {
        if let Some(shipper) = &state.shipper {
            shipper
                .error(
                    "stats",
                    format!("Attempted to retrieve stats for non-existent shortcode: {}", shortcode),
                )
                .await;
        }
        return Err(ApiError::not_found("Short URL not found"))?;
    };

    if let Some(shipper) = &state.shipper {
        shipper
            .info("stats", format!("Successfully retrieved stats for shortcode: {}", shortcode))
            .await;
    }

    Ok(Json(LinkStatsResponse {
        shortcode,
        total_clicks: link.clicks,
        original_url: link.long_url,
        creation_date: link.created_at,
        expiry_date: link.expires_at,
        click_data: link.visits,
    }))
}
