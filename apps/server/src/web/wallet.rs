//! Wallet handlers.
//!
//! The wallet is created lazily: the first `GET /wallet` (or first wallet
//! payment) materializes it with the ₹500.00 starting balance. Recharge is a
//! QR handoff only; no server-side credit path exists, so a top-up shows up
//! at the counter, not in `balance_paise`.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use vprint_core::validation::validate_amount_paise;
use vprint_core::{upi, Money, Wallet};

use crate::error::ApiError;
use crate::state::AppState;
use crate::web::jobs::QrResponse;
use crate::web::require_user;

/// `GET /wallet` - the caller's balance, creating the wallet on first read.
pub async fn wallet_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Wallet>, ApiError> {
    let user_id = require_user(&headers)?;
    let wallet = state.db.wallets().get_or_create(&user_id).await?;
    Ok(Json(wallet))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargeQuery {
    /// Top-up amount in paise. Omitted: the payer picks the amount in
    /// their UPI app.
    pub amount_paise: Option<i64>,
}

/// `GET /wallet/recharge-qr` - UPI link and QR image URL for a top-up.
pub async fn recharge_qr_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<RechargeQuery>,
) -> Result<Json<QrResponse>, ApiError> {
    require_user(&headers)?;

    let amount = match query.amount_paise {
        Some(paise) => {
            validate_amount_paise(paise)?;
            Some(Money::from_paise(paise))
        }
        None => None,
    };

    let upi_link = upi::recharge_link(&state.upi_payee(), amount, "Wallet Recharge");
    let qr_image_url = upi::qr_image_url(&upi_link);

    Ok(Json(QrResponse {
        upi_link,
        qr_image_url,
    }))
}
