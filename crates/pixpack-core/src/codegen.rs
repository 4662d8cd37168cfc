//! C++ source generation for encoded images.
//!
//! Each image becomes a read-only byte array placed in program memory plus a
//! descriptor carrying its width, height, device image type and
//! transparency flag.

use std::collections::HashSet;

use crate::config::ValidationError;
use crate::encode::PixelBuffer;

const BYTES_PER_LINE: usize = 16;

/// An encoded image together with the identifier it is emitted under.
#[derive(Debug, Clone, Copy)]
pub struct GeneratedImage<'a> {
    pub id: &'a str,
    pub buffer: &'a PixelBuffer,
}

/// Check that an id is usable as a C identifier.
pub fn validate_identifier(id: &str) -> Result<(), ValidationError> {
    let mut chars = id.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidId(id.to_string()))
    }
}

/// Check every id and reject duplicates.
pub fn validate_identifiers<'a>(ids: impl IntoIterator<Item = &'a str>) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        validate_identifier(id)?;
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

/// Name of the byte array holding an image's pixels.
pub fn data_symbol(id: &str) -> String {
    format!("{}_data", id)
}

fn write_image(out: &mut String, image: &GeneratedImage<'_>) {
    let buffer = image.buffer;
    let data = data_symbol(image.id);

    out.push_str(&format!(
        "static const uint8_t {}[{}] PROGMEM = {{\n",
        data,
        buffer.len()
    ));
    for chunk in buffer.data.chunks(BYTES_PER_LINE) {
        let line: Vec<String> = chunk.iter().map(|b| format!("0x{:02X}", b)).collect();
        out.push_str(&format!("  {},\n", line.join(", ")));
    }
    out.push_str("};\n");
    out.push_str(&format!(
        "static const ImageDescriptor {} = {{{}, {}, {}, {}, {}}};\n",
        image.id,
        data,
        buffer.width,
        buffer.height,
        buffer.device_type().symbol(),
        buffer.use_transparency
    ));
}

/// Render the header for a set of images.
pub fn generate_header(images: &[GeneratedImage<'_>]) -> String {
    let mut out = String::new();
    out.push_str("// Generated by pixpack. Do not edit.\n");
    out.push_str("#pragma once\n\n");
    out.push_str("#include <cstdint>\n");

    for image in images {
        out.push('\n');
        write_image(&mut out, image);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImageType;

    fn buffer(image_type: ImageType, use_transparency: bool, data: Vec<u8>) -> PixelBuffer {
        PixelBuffer {
            width: 2,
            height: 1,
            image_type,
            use_transparency,
            data,
        }
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("logo").is_ok());
        assert!(validate_identifier("_icon_2").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("2fast").is_err());
        assert!(validate_identifier("my-logo").is_err());
    }

    #[test]
    fn test_validate_identifiers_duplicates() {
        assert!(validate_identifiers(["a", "b"]).is_ok());
        assert_eq!(
            validate_identifiers(["a", "b", "a"]),
            Err(ValidationError::DuplicateId("a".to_string()))
        );
    }

    #[test]
    fn test_generate_single_image() {
        let buf = buffer(ImageType::Rgb24, true, vec![255, 0, 0, 0, 0, 1]);
        let header = generate_header(&[GeneratedImage {
            id: "dot",
            buffer: &buf,
        }]);

        assert!(header.starts_with("// Generated by pixpack"));
        assert!(header.contains("static const uint8_t dot_data[6] PROGMEM = {\n"));
        assert!(header.contains("  0xFF, 0x00, 0x00, 0x00, 0x00, 0x01,\n};\n"));
        assert!(header.contains(
            "static const ImageDescriptor dot = {dot_data, 2, 1, IMAGE_TYPE_RGB24, true};"
        ));
    }

    #[test]
    fn test_generate_full_header_text() {
        let buf = buffer(ImageType::Binary, false, vec![0x80]);
        let header = generate_header(&[GeneratedImage {
            id: "dot",
            buffer: &buf,
        }]);

        assert_eq!(
            header,
            "// Generated by pixpack. Do not edit.\n\
             #pragma once\n\
             \n\
             #include <cstdint>\n\
             \n\
             static const uint8_t dot_data[1] PROGMEM = {\n\
             \x20 0x80,\n\
             };\n\
             static const ImageDescriptor dot = {dot_data, 2, 1, IMAGE_TYPE_BINARY, false};\n"
        );
    }

    #[test]
    fn test_generate_wraps_lines() {
        let buf = buffer(ImageType::Rgba, true, (0..20).collect());
        let header = generate_header(&[GeneratedImage {
            id: "wide",
            buffer: &buf,
        }]);

        let data_lines: Vec<&str> = header.lines().filter(|l| l.starts_with("  0x")).collect();
        assert_eq!(data_lines.len(), 2);
        assert_eq!(data_lines[0].matches("0x").count(), 16);
        assert_eq!(data_lines[1].matches("0x").count(), 4);
    }

    #[test]
    fn test_transparent_binary_uses_binary_symbol() {
        let buf = buffer(ImageType::TransparentBinary, true, vec![0x80]);
        let header = generate_header(&[GeneratedImage {
            id: "icon",
            buffer: &buf,
        }]);
        assert!(header.contains("IMAGE_TYPE_BINARY, true}"));
    }

    #[test]
    fn test_generate_multiple_images_in_order() {
        let a = buffer(ImageType::Grayscale, false, vec![1, 2]);
        let b = buffer(ImageType::Rgb565, false, vec![0, 0, 0, 0]);
        let header = generate_header(&[
            GeneratedImage { id: "first", buffer: &a },
            GeneratedImage { id: "second", buffer: &b },
        ]);

        let first = header.find("first_data").unwrap();
        let second = header.find("second_data").unwrap();
        assert!(first < second);
        assert!(header.contains("IMAGE_TYPE_GRAYSCALE, false}"));
    }
}
