//! # UPI Payment Links
//!
//! Builders for `upi://pay` deep links and the QR image URLs that wrap them.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        UPI Payment Flow                                 │
//! │                                                                         │
//! │  PrintJob (cost ₹150.00)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  payment_link() ──► upi://pay?pa=…&pn=…&tid=<job>&am=150.00&cu=INR&tn=… │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  qr_image_url() ──► https://chart.googleapis.com/chart?cht=qr&chl=…     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Client renders the image; if rendering fails it shows the raw          │
//! │  upi:// link as text instead.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No funds verification happens anywhere in this flow: the payer
//! self-attests completion. The server never fetches the QR image bytes;
//! it hands the URL to the client.

use url::form_urlencoded;

use crate::money::Money;

/// QR image rendering endpoint (Google Charts).
const QR_CHART_ENDPOINT: &str = "https://chart.googleapis.com/chart";

/// Default QR image edge length in pixels.
const QR_SIZE_PX: u32 = 250;

// =============================================================================
// Payee
// =============================================================================

/// The payment recipient encoded into every UPI link.
///
/// Comes from server configuration; a missing payee VPA is a startup error,
/// not a runtime fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpiPayee {
    /// Virtual payment address, e.g. `vprint@okhdfcbank`.
    pub vpa: String,
    /// Display name shown in the payer's UPI app.
    pub name: String,
}

// =============================================================================
// Link Builders
// =============================================================================

/// Builds a `upi://pay` deep link for a print-job payment.
///
/// ## Parameters
/// - `pa` - payee VPA
/// - `pn` - payee display name
/// - `tid` - transaction id (the job id)
/// - `am` - exact decimal amount, e.g. `150.00`
/// - `cu` - currency, always `INR`
/// - `tn` - human-readable note
///
/// ## Example
/// ```rust
/// use vprint_core::money::Money;
/// use vprint_core::upi::{payment_link, UpiPayee};
///
/// let payee = UpiPayee { vpa: "vprint@okhdfcbank".into(), name: "V-Print Hub".into() };
/// let link = payment_link(&payee, "job-42", Money::from_paise(15000));
/// assert!(link.starts_with("upi://pay?"));
/// assert!(link.contains("am=150.00"));
/// ```
pub fn payment_link(payee: &UpiPayee, job_id: &str, amount: Money) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("pa", &payee.vpa)
        .append_pair("pn", &payee.name)
        .append_pair("tid", job_id)
        .append_pair("am", &amount.to_decimal_string())
        .append_pair("cu", "INR")
        .append_pair("tn", &format!("Print Job {}", job_id))
        .finish();

    format!("upi://pay?{}", query)
}

/// Builds a `upi://pay` deep link for a wallet top-up.
///
/// Amount may be omitted, in which case the payer chooses it in their app.
pub fn recharge_link(payee: &UpiPayee, amount: Option<Money>, note: &str) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer
        .append_pair("pa", &payee.vpa)
        .append_pair("pn", &payee.name);
    if let Some(amount) = amount {
        serializer.append_pair("am", &amount.to_decimal_string());
    }
    if !note.is_empty() {
        serializer.append_pair("tn", note);
    }
    serializer.append_pair("cu", "INR");

    format!("upi://pay?{}", serializer.finish())
}

/// Wraps a UPI link in a QR image URL the client can render directly.
///
/// The link itself goes into the `chl` parameter, percent-encoded.
pub fn qr_image_url(upi_link: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("chs", &format!("{}x{}", QR_SIZE_PX, QR_SIZE_PX))
        .append_pair("cht", "qr")
        .append_pair("chl", upi_link)
        .append_pair("choe", "UTF-8")
        .finish();

    format!("{}?{}", QR_CHART_ENDPOINT, query)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn payee() -> UpiPayee {
        UpiPayee {
            vpa: "vprint@okhdfcbank".to_string(),
            name: "V-Print Hub".to_string(),
        }
    }

    #[test]
    fn test_payment_link_fields() {
        let link = payment_link(&payee(), "job-42", Money::from_paise(15000));
        assert!(link.starts_with("upi://pay?"));
        assert!(link.contains("pa=vprint%40okhdfcbank"));
        assert!(link.contains("tid=job-42"));
        assert!(link.contains("am=150.00"));
        assert!(link.contains("cu=INR"));
    }

    #[test]
    fn test_payment_link_amount_is_exact() {
        // ₹0.50 must encode as 0.50, not 0.5 or a float artifact
        let link = payment_link(&payee(), "j", Money::from_paise(50));
        assert!(link.contains("am=0.50"));
    }

    #[test]
    fn test_recharge_link_without_amount() {
        let link = recharge_link(&payee(), None, "Wallet Recharge");
        assert!(!link.contains("am="));
        assert!(link.contains("tn=Wallet+Recharge"));
    }

    #[test]
    fn test_qr_image_url_embeds_link() {
        let link = payment_link(&payee(), "job-42", Money::from_paise(15000));
        let qr = qr_image_url(&link);
        assert!(qr.starts_with("https://chart.googleapis.com/chart?"));
        assert!(qr.contains("cht=qr"));
        // The upi:// scheme must survive, percent-encoded
        assert!(qr.contains("chl=upi%3A%2F%2Fpay"));
    }
}
