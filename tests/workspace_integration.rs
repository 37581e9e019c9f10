//! Workspace integration tests.
//!
//! These tests exercise bsdetect-core the way a downstream ROM loader or
//! cart flashing tool would: read bytes it already owns, pick up a config,
//! and ask for one scheme.

use bsdetect_core::{DetectConfig, Detector, Scheme, detect_scheme};

/// NOP-filled image whose first byte breaks the SuperChip layout.
fn rom(size: usize) -> Vec<u8> {
    let mut image = vec![0xEA; size];
    image[0] = 0x00;
    image
}

fn rom_with(size: usize, offset: usize, bytes: &[u8]) -> Vec<u8> {
    let mut image = rom(size);
    image[offset..offset + bytes.len()].copy_from_slice(bytes);
    image
}

// ============================================================================
// Loader <-> core contracts
// ============================================================================

#[test]
fn loader_with_declared_extension_skips_content() {
    // Content says UA, the user says E0
    let image = rom_with(8192, 5000, &[0x8D, 0x40, 0x02]);
    assert_eq!(detect_scheme("Mountain King.E0", Some(image.as_slice())), Scheme::E0);
    assert_eq!(detect_scheme("Mountain King.E0", None), Scheme::E0);
}

#[test]
fn loader_with_plain_dump_uses_content() {
    let cases: [(Vec<u8>, Scheme); 6] = [
        (rom(2048), Scheme::Bs2K),
        (rom_with(8192, 5000, &[0x8D, 0x40, 0x02]), Scheme::Ua),
        (rom_with(16384, 9000, &[0x8D, 0xE7, 0x1F]), Scheme::E7),
        (rom_with(32768, 20000, b"LENIN"), Scheme::Cty),
        (rom_with(65536, 65536 - 8, b"EFEF"), Scheme::Ef),
        (rom(8448 * 4), Scheme::Ar),
    ];
    for (image, expected) in cases {
        assert_eq!(
            detect_scheme("dump.bin", Some(image.as_slice())),
            expected,
            "{} byte image",
            image.len()
        );
    }
}

#[test]
fn loader_without_anything_gets_auto() {
    assert_eq!(detect_scheme("", None), Scheme::Auto);
    assert_eq!(detect_scheme("README", None), Scheme::Auto);
}

// ============================================================================
// Config <-> detector contracts
// ============================================================================

#[test]
fn config_from_toml_drives_detector() {
    let config = DetectConfig::from_toml_str(
        r#"
content_sniffing = true

[extensions]
pal = "F8SC"
bin = "F6"
"#,
    )
    .unwrap();
    assert!(config.validate().is_empty());

    let detector = Detector::new(&config);
    assert_eq!(detector.detect("game.PAL", None), Scheme::F8sc);
    // Override beats content
    let image = rom_with(8192, 5000, &[0x8D, 0x40, 0x02]);
    assert_eq!(detector.detect("game.bin", Some(image.as_slice())), Scheme::F6);
    // Built-in table still applies
    assert_eq!(detector.detect("game.x07", None), Scheme::X07);
}

#[test]
fn scheme_names_round_trip_through_json() {
    for scheme in Scheme::ALL {
        let json = serde_json::to_value(scheme).unwrap();
        assert_eq!(json, serde_json::Value::String(scheme.name().to_string()));
        assert_eq!(scheme.name().parse::<Scheme>().unwrap(), scheme);
    }
}

#[test]
fn config_round_trips_through_toml() {
    let mut config = DetectConfig {
        extension_hints: false,
        ..DetectConfig::default()
    };
    config.extensions.insert("dem".to_string(), Scheme::DpcPlus);

    let text = config.to_toml_string().unwrap();
    let parsed: DetectConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
