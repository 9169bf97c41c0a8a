//! Inline `data:` image payloads.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use percent_encoding::percent_decode_str;
use sha2::{Digest, Sha256};

/// Base64 engine accepting payloads with or without padding.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Error decoding a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataUriError {
    #[error("not a data URI")]
    NotDataUri,

    #[error("data URI has no ',' separator")]
    MissingSeparator,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("data URI payload is empty")]
    Empty,
}

/// Decoded `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    /// Decode `data:[<media type>][;base64],<payload>`.
    pub fn parse(src: &str) -> Result<Self, DataUriError> {
        let rest = strip_scheme(src.trim()).ok_or(DataUriError::NotDataUri)?;
        let (meta, payload) = rest.split_once(',').ok_or(DataUriError::MissingSeparator)?;

        let mut params = meta.split(';');
        let media_type = params.next().unwrap_or_default().trim().to_ascii_lowercase();
        let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

        let decoded: Vec<u8> = percent_decode_str(payload).collect();
        let bytes = if is_base64 {
            let cleaned: Vec<u8> = decoded
                .into_iter()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            LENIENT_BASE64.decode(cleaned)?
        } else {
            decoded
        };
        if bytes.is_empty() {
            return Err(DataUriError::Empty);
        }

        Ok(Self {
            media_type: if media_type.is_empty() {
                "text/plain".to_owned()
            } else {
                media_type
            },
            bytes,
        })
    }

    /// Hex SHA-256 of the decoded bytes.
    pub fn content_hash(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }

    /// File extension for the media type.
    pub fn extension(&self) -> &'static str {
        match self.media_type.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            "image/gif" => "gif",
            "image/svg+xml" => "svg",
            "image/webp" => "webp",
            "image/bmp" => "bmp",
            _ => "bin",
        }
    }

    /// Attachment filename derived from the content: `image-<hash16>.<ext>`.
    pub fn filename(&self) -> String {
        let hash = self.content_hash();
        format!("image-{}.{}", &hash[..16], self.extension())
    }
}

fn strip_scheme(src: &str) -> Option<&str> {
    let prefix = src.get(..5)?;
    prefix.eq_ignore_ascii_case("data:").then(|| &src[5..])
}
