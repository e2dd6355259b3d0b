use bingo_types::Card;

use crate::error::{CardError, CardResult};

/// Codec for card documents.
///
/// The on-store format is a JSON object:
///
/// ```json
/// {"pictures":[{"cloud_id":"...","web_url":"..."}]}
/// ```
///
/// Unknown fields are ignored on decode so documents written by newer
/// versions stay readable.
pub struct CardCodec;

impl CardCodec {
    /// Serialize a card document.
    pub fn encode(card: &Card) -> CardResult<Vec<u8>> {
        serde_json::to_vec(card).map_err(|e| CardError::Encode(e.to_string()))
    }

    /// Deserialize a card document.
    pub fn decode(data: &[u8]) -> CardResult<Card> {
        serde_json::from_slice(data).map_err(|e| CardError::MalformedDocument(e.to_string()))
    }
}
