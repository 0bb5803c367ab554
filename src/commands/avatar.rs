use std::path::Path;

use crate::cli::AvatarArgs;
use crate::error::{ReqresError, Result};
use crate::output;
use crate::service::UserService;

/// Identify an image format from its leading bytes.
pub fn image_kind(bytes: &[u8]) -> Option<&'static str> {
    const SIGNATURES: [(&[u8], &str); 4] = [
        (&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a], "png"),
        (&[0xff, 0xd8, 0xff], "jpeg"),
        (b"GIF87a", "gif"),
        (b"GIF89a", "gif"),
    ];

    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("webp");
    }
    if is_bmp(bytes) {
        return Some("bmp");
    }

    SIGNATURES
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))
        .map(|(_, kind)| *kind)
}

/// A BMP needs its file header and a known DIB header size after the "BM"
/// magic.
fn is_bmp(bytes: &[u8]) -> bool {
    const DIB_HEADER_SIZES: [u32; 6] = [12, 40, 52, 56, 108, 124];

    let le_u32 = |range: std::ops::Range<usize>| {
        bytes
            .get(range)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
    };

    match (bytes.starts_with(b"BM"), le_u32(2..6), le_u32(14..18)) {
        (true, Some(file_size), Some(dib_size)) => {
            file_size >= 14 && DIB_HEADER_SIZES.contains(&dib_size)
        }
        _ => false,
    }
}

pub fn write_avatar(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|e| ReqresError::AvatarWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Command handler: save a user's avatar bytes as-is
pub async fn download(service: &UserService, args: AvatarArgs) -> Result<()> {
    let response = service.load_user(args.id).await?;
    let bytes = service.load_avatar(&response.user).await?;

    write_avatar(&args.output, &bytes)?;

    let kind = image_kind(&bytes).unwrap_or("unrecognized format");
    output::print_message(&format!(
        "Downloaded avatar of {} ({kind}, {}) to {}",
        response.user.full_name(),
        output::format_size(bytes.len()),
        args.output.display()
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_kind_png() {
        let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 13];
        assert_eq!(image_kind(&png), Some("png"));
    }

    #[test]
    fn test_image_kind_jpeg() {
        assert_eq!(image_kind(&[0xff, 0xd8, 0xff, 0xe0, 0x00]), Some("jpeg"));
    }

    #[test]
    fn test_image_kind_gif() {
        assert_eq!(image_kind(b"GIF89a\x01\x00"), Some("gif"));
        assert_eq!(image_kind(b"GIF87a"), Some("gif"));
    }

    #[test]
    fn test_image_kind_bmp_needs_a_real_header() {
        let mut bmp = b"BM".to_vec();
        bmp.extend_from_slice(&70u32.to_le_bytes()); // file size
        bmp.extend_from_slice(&[0, 0, 0, 0]); // reserved
        bmp.extend_from_slice(&54u32.to_le_bytes()); // pixel data offset
        bmp.extend_from_slice(&40u32.to_le_bytes()); // BITMAPINFOHEADER
        assert_eq!(image_kind(&bmp), Some("bmp"));

        assert_eq!(image_kind(b"BM\x00\x00"), None);
        assert_eq!(image_kind(b"BM some text that is long enough"), None);
        assert_eq!(image_kind(b"BMW owners club"), None);
    }

    #[test]
    fn test_image_kind_webp() {
        assert_eq!(image_kind(b"RIFF\x24\x00\x00\x00WEBPVP8 "), Some("webp"));
        assert_eq!(image_kind(b"RIFF\x24\x00\x00\x00WAVE"), None);
    }

    #[test]
    fn test_image_kind_rejects_text_and_empty() {
        assert_eq!(image_kind(b""), None);
        assert_eq!(image_kind(b"<!DOCTYPE html>"), None);
        assert_eq!(image_kind(b"{\"error\": \"missing\"}"), None);
    }

    #[test]
    fn test_write_avatar_reports_path_on_failure() {
        let path = Path::new("/nonexistent-dir-for-reqres/avatar.png");
        let err = write_avatar(path, b"x").unwrap_err();
        assert!(matches!(err, ReqresError::AvatarWrite { .. }));
        assert!(err.to_string().contains("avatar.png"));
    }
}
