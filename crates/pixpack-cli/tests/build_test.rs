//! End-to-end manifest builds against a temporary project directory.

use pixpack_cli::{build_all, check, OfflineFetcher};
use std::path::Path;

const ICON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24"><rect x="0" y="0" width="24" height="12" fill="black"/></svg>"#;

fn write_png(dir: &Path, name: &str, width: u32, height: u32, rgba: [u8; 4]) {
    image::RgbaImage::from_pixel(width, height, image::Rgba(rgba))
        .save(dir.join(name))
        .unwrap();
}

fn write_manifest(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("images.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_build_writes_header() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "logo.png", 4, 2, [255, 0, 0, 255]);
    write_png(dir.path(), "splash.png", 64, 64, [255, 255, 255, 255]);

    let cache = dir.path().join(".pixpack/images");
    std::fs::create_dir_all(&cache).unwrap();
    std::fs::write(cache.join("wifi.svg"), ICON_SVG).unwrap();

    let manifest = write_manifest(
        dir.path(),
        r#"
        [output]
        header = "gen/images.h"

        [[image]]
        id = "logo"
        file = "logo.png"
        type = "RGB565"

        [[image]]
        id = "splash"
        file = "splash.png"
        type = "GRAYSCALE"
        resize = "16x16"

        [[image]]
        id = "wifi"
        mdi = "mdi:wifi"
        resize = "8x8"
        "#,
    );

    let output = build_all(&manifest, None, &OfflineFetcher).unwrap();
    assert_eq!(output, dir.path().join("gen/images.h"));

    let header = std::fs::read_to_string(&output).unwrap();
    assert!(header.contains("#pragma once"));
    assert!(header.contains("static const uint8_t logo_data[16] PROGMEM = {"));
    assert!(header.contains("0xF8, 0x00, 0xF8, 0x00"));
    assert!(header.contains("{logo_data, 4, 2, IMAGE_TYPE_RGB565, false}"));
    assert!(header.contains("static const uint8_t splash_data[256] PROGMEM = {"));
    assert!(header.contains("{splash_data, 16, 16, IMAGE_TYPE_GRAYSCALE, false}"));
    assert!(header.contains("static const uint8_t wifi_data[8] PROGMEM = {"));
    assert!(header.contains("{wifi_data, 8, 8, IMAGE_TYPE_BINARY, true}"));
}

#[test]
fn test_build_output_override() {
    let dir = tempfile::tempdir().unwrap();
    write_png(dir.path(), "dot.png", 1, 1, [0, 0, 0, 255]);
    let manifest = write_manifest(
        dir.path(),
        r#"
        [[image]]
        id = "dot"
        file = "dot.png"
        "#,
    );

    let target = dir.path().join("out/custom.h");
    let output = build_all(&manifest, Some(&target), &OfflineFetcher).unwrap();
    assert_eq!(output, target);

    let header = std::fs::read_to_string(&target).unwrap();
    // Black pixel is drawn in the high bit
    assert!(header.contains("static const uint8_t dot_data[1] PROGMEM = {\n  0x80,\n};"));
}

#[test]
fn test_missing_file_names_image() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
        [[image]]
        id = "ghost"
        file = "ghost.png"
        "#,
    );

    let err = build_all(&manifest, None, &OfflineFetcher).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("ghost"), "{}", message);
    assert!(!dir.path().join("images.h").exists());
}

#[test]
fn test_uncached_icon_offline_fails() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
        [[image]]
        id = "home"
        mdi = "home"
        "#,
    );

    let err = build_all(&manifest, None, &OfflineFetcher).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("home"), "{}", message);
    assert!(message.contains("Could not download icon"), "{}", message);
}

#[test]
fn test_check_rejects_colored_icon() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
        [[image]]
        id = "home"
        mdi = "home"
        type = "RGB24"
        "#,
    );

    let err = check(&manifest).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("MDI images must be binary images"), "{}", message);
}

#[test]
fn test_check_does_not_load_sources() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
        [[image]]
        id = "later"
        file = "not_there_yet.png"
        type = "RGBA"
        "#,
    );

    let decls = check(&manifest).unwrap();
    assert_eq!(decls.len(), 1);
    assert!(decls[0].config.use_transparency);
}

#[test]
fn test_icon_name_outside_cache_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    // Where "../../x" would land relative to the default cache dir
    std::fs::write(dir.path().join("x.svg"), ICON_SVG).unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"
        [[image]]
        id = "escape"
        mdi = "../../x"
        "#,
    );

    let err = build_all(&manifest, None, &OfflineFetcher).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Invalid value for `mdi`"), "{}", message);
    assert!(!dir.path().join("images.h").exists());
}
