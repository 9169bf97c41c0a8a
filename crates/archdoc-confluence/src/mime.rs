//! Attachment content types.

/// MIME type for an uploaded image, chosen by file extension.
///
/// Unknown extensions are sent as `image/png`: every artifact the exporter
/// uploads is an image.
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("Context.png"), "image/png");
        assert_eq!(content_type_for("photo.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("structurizr-1-Context.svg"), "image/svg+xml");
        assert_eq!(content_type_for("image-0a1b.webp"), "image/webp");
        assert_eq!(content_type_for("noext"), "image/png");
        assert_eq!(content_type_for("data.bin"), "image/png");
    }
}
