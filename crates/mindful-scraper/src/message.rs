//! The `getPrice` request sent by the extension's content script.

use mindful_core::Region;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::format::FormattedPrice;
use crate::service::PriceService;

/// Inbound request, discriminated by its `action` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action")]
pub enum InboundMessage {
    #[serde(rename = "getPrice", rename_all = "camelCase")]
    GetPrice {
        store_name: String,
        product_name: String,
        #[serde(default)]
        region: Option<String>,
    },
}

/// Reply to an [`InboundMessage`].
///
/// `Price` means the pipeline ran; its price may still be absent and then
/// serializes as `{"success": true, "price": null}`. `Error` means the
/// message could not be handled at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageResponse {
    Price(Option<FormattedPrice>),
    Error(String),
}

impl MessageResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, MessageResponse::Price(_))
    }
}

impl Serialize for MessageResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MessageResponse", 2)?;
        match self {
            MessageResponse::Price(price) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("price", price)?;
            }
            MessageResponse::Error(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

/// Parses `raw` and runs it against `service`. Always produces a response.
pub async fn handle_message(service: &PriceService, raw: &str) -> MessageResponse {
    let message: InboundMessage = match serde_json::from_str(raw) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting malformed message");
            return MessageResponse::Error(format!("invalid message: {e}"));
        }
    };

    match message {
        InboundMessage::GetPrice {
            store_name,
            product_name,
            region,
        } => {
            let region = match region.as_deref().map(str::parse::<Region>).transpose() {
                Ok(region) => region.unwrap_or_default(),
                Err(e) => {
                    tracing::warn!(error = %e, "rejecting getPrice message");
                    return MessageResponse::Error(e.to_string());
                }
            };
            MessageResponse::Price(service.get_price(&store_name, &product_name, region).await)
        }
    }
}
