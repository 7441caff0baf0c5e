//! HTTP handler for the identity provider webhook
//!
//! The provider notifies us of sign-up/sign-in events so tenant rows exist
//! before their first write. Payloads are authenticated with an
//! HMAC-SHA256 signature over the raw body; anything unsigned is rejected
//! before the store is touched.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::services::users::UserService;
use crate::AppState;

const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Identity event envelope
#[derive(Debug, Deserialize)]
pub struct IdentityEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: IdentityEventData,
}

#[derive(Debug, Deserialize)]
pub struct IdentityEventData {
    pub id: String,
    pub name: Option<String>,
}

/// Response for webhook processing
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub success: bool,
    pub message: String,
}

/// Handle identity provider webhook events
/// POST /webhooks/identity
pub async fn handle_identity_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, (StatusCode, Json<WebhookResponse>)> {
    if let Err(e) = verify_signature(&headers, &body, &state.config.webhook.secret) {
        tracing::warn!("identity webhook signature verification failed: {}", e);
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(WebhookResponse {
                success: false,
                message: "Invalid signature".to_string(),
            }),
        ));
    }

    let event: IdentityEvent = match serde_json::from_slice(&body) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("failed to parse identity webhook: {}", e);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(WebhookResponse {
                    success: false,
                    message: format!("Invalid request body: {}", e),
                }),
            ));
        }
    };

    match event.event_type.as_str() {
        "user.created" | "user.signed_in" => {
            let service = UserService::new(state.db.clone());
            if let Err(e) = service
                .ensure_user(&event.data.id, event.data.name.as_deref())
                .await
            {
                tracing::error!("failed to record user from identity webhook: {}", e);
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(WebhookResponse {
                        success: false,
                        message: "Processing error".to_string(),
                    }),
                ));
            }
            Ok(Json(WebhookResponse {
                success: true,
                message: format!("Processed {}", event.event_type),
            }))
        }
        other => {
            tracing::debug!("ignoring identity webhook event: {}", other);
            Ok(Json(WebhookResponse {
                success: true,
                message: format!("Ignored {}", other),
            }))
        }
    }
}

/// Verify the base64 HMAC-SHA256 signature the provider sends with each
/// delivery.
fn verify_signature(headers: &HeaderMap, body: &[u8], secret: &str) -> Result<(), String> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| format!("missing {} header", SIGNATURE_HEADER))?;

    let expected = BASE64
        .decode(signature)
        .map_err(|_| "signature is not valid base64".to_string())?;

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|e| format!("invalid webhook secret: {}", e))?;
    mac.update(body);

    mac.verify_slice(&expected)
        .map_err(|_| "signature mismatch".to_string())
}
