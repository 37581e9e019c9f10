//! Content-based scheme classification.
//!
//! The image length selects a [`SizeClass`]. Each class owns an ordered
//! table of [`Probe`]s and a default scheme; the first probe that fires
//! decides the result. Order within a table goes from the most distinctive
//! signature to the most easily triggered one, since several signatures
//! overlap (a SuperChip layout can coexist with any hotspot pattern, and
//! FE's `JSR` sequences turn up in ordinary F8 code).

use tracing::trace;

use crate::heuristics::*;
use crate::scheme::Scheme;

const K: usize = 1024;

/// Supercharger load images are a whole number of 8448-byte loads.
pub const SUPERCHARGER_LOAD_SIZE: usize = 8448;
pub const SUPERCHARGER_SINGLE_LOAD_SIZE: usize = 6 * K;

/// Pitfall II dumps vary with how much of the DPC data area was captured.
pub const DPC_SIZE_RANGE: std::ops::RangeInclusive<usize> = 10 * K..=10 * K + 256;

/// One entry in a size class's probe table.
#[derive(Debug, Clone, Copy)]
pub enum Probe {
    /// Boolean predicate; yields the paired scheme when it fires.
    Flag(fn(&[u8]) -> bool, Scheme),
    /// Predicate that picks among related schemes itself.
    Variant(fn(&[u8]) -> Option<Scheme>),
}

impl Probe {
    /// Run this probe against `image`.
    #[inline]
    pub fn probe(&self, image: &[u8]) -> Option<Scheme> {
        match *self {
            Probe::Flag(check, scheme) => check(image).then_some(scheme),
            Probe::Variant(check) => check(image),
        }
    }
}

/// Size bucket an image falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Supercharger,
    Sub2K,
    Mirrored2K,
    Plain4K,
    Size8K,
    Dpc,
    Size12K,
    Size16K,
    Size24Or28K,
    Size29K,
    Size32K,
    Size64K,
    Size128K,
    Size256K,
    Other,
}

impl SizeClass {
    /// Pick the size class for `image`. Structure beyond the length is
    /// only consulted to tell a 4K overdump of a 2K ROM from a true 4K.
    pub fn of(image: &[u8]) -> Self {
        let len = image.len();
        if len % SUPERCHARGER_LOAD_SIZE == 0 || len == SUPERCHARGER_SINGLE_LOAD_SIZE {
            return SizeClass::Supercharger;
        }
        match len {
            0..2048 => SizeClass::Sub2K,
            2048 => SizeClass::Mirrored2K,
            4096 if has_mirrored_halves(image) => SizeClass::Mirrored2K,
            4096 => SizeClass::Plain4K,
            8192 => SizeClass::Size8K,
            n if DPC_SIZE_RANGE.contains(&n) => SizeClass::Dpc,
            12288 => SizeClass::Size12K,
            16384 => SizeClass::Size16K,
            24576 | 28672 => SizeClass::Size24Or28K,
            29696 => SizeClass::Size29K,
            32768 => SizeClass::Size32K,
            65536 => SizeClass::Size64K,
            131072 => SizeClass::Size128K,
            262144 => SizeClass::Size256K,
            _ => SizeClass::Other,
        }
    }

    /// Probes for this class, highest priority first.
    pub fn probes(self) -> &'static [Probe] {
        match self {
            SizeClass::Supercharger
            | SizeClass::Sub2K
            | SizeClass::Dpc
            | SizeClass::Size12K
            | SizeClass::Size24Or28K => &[],
            SizeClass::Mirrored2K | SizeClass::Plain4K => CV_PROBES,
            SizeClass::Size8K => PROBES_8K,
            SizeClass::Size16K => PROBES_16K,
            SizeClass::Size29K => PROBES_29K,
            SizeClass::Size32K => PROBES_32K,
            SizeClass::Size64K => PROBES_64K,
            SizeClass::Size128K => PROBES_128K,
            SizeClass::Size256K | SizeClass::Other => TIGERVISION_PROBES,
        }
    }

    /// Scheme used when no probe fires.
    pub fn default_scheme(self) -> Scheme {
        match self {
            SizeClass::Supercharger => Scheme::Ar,
            SizeClass::Sub2K | SizeClass::Mirrored2K => Scheme::Bs2K,
            SizeClass::Plain4K => Scheme::Bs4K,
            SizeClass::Size8K => Scheme::F8,
            SizeClass::Dpc => Scheme::Dpc,
            SizeClass::Size12K => Scheme::Fa,
            SizeClass::Size16K => Scheme::F6,
            SizeClass::Size24Or28K => Scheme::Fa2,
            SizeClass::Size29K => Scheme::DpcPlus,
            SizeClass::Size32K => Scheme::F4,
            SizeClass::Size64K => Scheme::F0,
            SizeClass::Size128K => Scheme::Mc,
            SizeClass::Size256K => Scheme::Sb,
            // Most common scheme overall
            SizeClass::Other => Scheme::Bs4K,
        }
    }
}

fn is_probably_fe_without_f8_hotspots(image: &[u8]) -> bool {
    is_probably_fe(image) && !has_f8_hotspot_stores(image)
}

const CV_PROBES: &[Probe] = &[Probe::Flag(is_probably_cv, Scheme::Cv)];

const PROBES_8K: &[Probe] = &[
    Probe::Flag(is_probably_sc, Scheme::F8sc),
    Probe::Flag(has_mirrored_halves, Scheme::Bs4K),
    Probe::Flag(is_probably_e0, Scheme::E0),
    Probe::Flag(is_probably_3e, Scheme::Bs3E),
    Probe::Flag(is_probably_3f, Scheme::Bs3F),
    Probe::Flag(is_probably_ua, Scheme::Ua),
    Probe::Flag(is_probably_fe_without_f8_hotspots, Scheme::Fe),
    Probe::Flag(is_probably_0840, Scheme::Bs0840),
];

const PROBES_16K: &[Probe] = &[
    Probe::Flag(is_probably_sc, Scheme::F6sc),
    Probe::Flag(is_probably_e7, Scheme::E7),
    Probe::Flag(is_probably_3e, Scheme::Bs3E),
    // Same answer as the default; only here so the trace names the hit
    Probe::Flag(is_probably_f6, Scheme::F6),
];

const PROBES_29K: &[Probe] = &[Probe::Flag(is_probably_arm, Scheme::Fa2)];

const PROBES_32K: &[Probe] = &[
    Probe::Flag(is_probably_sc, Scheme::F4sc),
    Probe::Flag(is_probably_3e, Scheme::Bs3E),
    Probe::Flag(is_probably_3f, Scheme::Bs3F),
    Probe::Flag(is_probably_dpc_plus, Scheme::DpcPlus),
    Probe::Flag(is_probably_cty, Scheme::Cty),
    Probe::Flag(is_probably_fa2, Scheme::Fa2),
];

const PROBES_64K: &[Probe] = &[
    Probe::Flag(is_probably_3e, Scheme::Bs3E),
    Probe::Flag(is_probably_3f, Scheme::Bs3F),
    Probe::Flag(is_probably_4a50, Scheme::Bs4A50),
    Probe::Variant(is_probably_ef),
    Probe::Flag(is_probably_x07, Scheme::X07),
];

const PROBES_128K: &[Probe] = &[
    Probe::Flag(is_probably_3e, Scheme::Bs3E),
    Probe::Flag(is_probably_3f, Scheme::Bs3F),
    Probe::Flag(is_probably_4a50, Scheme::Bs4A50),
    Probe::Flag(is_probably_sb, Scheme::Sb),
];

const TIGERVISION_PROBES: &[Probe] = &[
    Probe::Flag(is_probably_3e, Scheme::Bs3E),
    Probe::Flag(is_probably_3f, Scheme::Bs3F),
];

/// Classify `image` by its content.
///
/// Never fails: an image matching no probe gets its size class's default.
/// An empty image is classified as [`Scheme::Ar`] (zero is a multiple of
/// the Supercharger load size); callers wanting [`Scheme::Auto`] for empty
/// input should go through [`detect_scheme`](crate::detect_scheme).
pub fn classify_by_content(image: &[u8]) -> Scheme {
    let class = SizeClass::of(image);
    for (index, probe) in class.probes().iter().enumerate() {
        if let Some(scheme) = probe.probe(image) {
            trace!(?class, index, %scheme, "content probe matched");
            return scheme;
        }
    }
    class.default_scheme()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// NOP-filled image whose first byte breaks the SuperChip layout.
    fn rom(size: usize) -> Vec<u8> {
        let mut image = vec![0xEA; size];
        if let Some(first) = image.first_mut() {
            *first = 0x00;
        }
        image
    }

    fn rom_with(size: usize, plants: &[(usize, &[u8])]) -> Vec<u8> {
        let mut image = rom(size);
        for (offset, bytes) in plants {
            image[*offset..*offset + bytes.len()].copy_from_slice(bytes);
        }
        image
    }

    // ===== Size classes =====

    #[test]
    fn size_defaults() {
        let cases = [
            (8448, Scheme::Ar),
            (3 * 8448, Scheme::Ar),
            (6144, Scheme::Ar),
            (1, Scheme::Bs2K),
            (512, Scheme::Bs2K),
            (2048, Scheme::Bs2K),
            (4096, Scheme::Bs4K),
            (8192, Scheme::F8),
            (10240, Scheme::Dpc),
            (10496, Scheme::Dpc),
            (12288, Scheme::Fa),
            (16384, Scheme::F6),
            (24576, Scheme::Fa2),
            (28672, Scheme::Fa2),
            (29696, Scheme::DpcPlus),
            (32768, Scheme::F4),
            (65536, Scheme::F0),
            (131072, Scheme::Mc),
            (262144, Scheme::Sb),
            (5000, Scheme::Bs4K),
            (10497, Scheme::Bs4K),
        ];
        for (size, expected) in cases {
            assert_eq!(
                classify_by_content(&rom(size)),
                expected,
                "{} byte image",
                size
            );
        }
    }

    #[test]
    fn empty_image_is_supercharger_class() {
        assert_eq!(SizeClass::of(&[]), SizeClass::Supercharger);
        assert_eq!(classify_by_content(&[]), Scheme::Ar);
    }

    #[test]
    fn overdumped_2k_in_4k_image() {
        let mut image = vec![0xEA; 4096];
        image[0] = 0x00;
        image[2048] = 0x00;
        assert_eq!(SizeClass::of(&image), SizeClass::Mirrored2K);
        assert_eq!(classify_by_content(&image), Scheme::Bs2K);
    }

    #[test]
    fn commavid_in_2k_and_4k() {
        let image = rom_with(2048, &[(100, &[0x9D, 0xFF, 0xF3])]);
        assert_eq!(classify_by_content(&image), Scheme::Cv);

        let image = rom_with(4096, &[(3000, &[0x99, 0x00, 0xF4])]);
        assert_eq!(classify_by_content(&image), Scheme::Cv);
    }

    // ===== 8K =====

    #[test]
    fn superchip_8k() {
        let image = vec![0xEA; 8192];
        assert_eq!(classify_by_content(&image), Scheme::F8sc);
    }

    #[test]
    fn mirrored_8k_is_4k() {
        let mut image = vec![0xEA; 8192];
        image[0] = 0x00;
        image[4096] = 0x00;
        assert_eq!(classify_by_content(&image), Scheme::Bs4K);
    }

    #[test]
    fn signatures_8k() {
        let cases: [(&[u8], Scheme); 7] = [
            (&[0x8D, 0xE0, 0x1F], Scheme::E0),
            (&[0x85, 0x3E, 0xA9, 0x00], Scheme::Bs3E),
            (&[0x85, 0x3F, 0xEA, 0x85, 0x3F], Scheme::Bs3F),
            (&[0x8D, 0x40, 0x02], Scheme::Ua),
            (&[0x20, 0x00, 0xD0, 0xC6, 0xC5], Scheme::Fe),
            (&[0xAD, 0x40, 0x08, 0xAD, 0x40, 0x08], Scheme::Bs0840),
            (&[0xEA], Scheme::F8),
        ];
        for (bytes, expected) in cases {
            let image = rom_with(8192, &[(5000, bytes)]);
            assert_eq!(classify_by_content(&image), expected, "{:02X?}", bytes);
        }
    }

    #[test]
    fn fe_vetoed_by_f8_hotspot_stores() {
        let image = rom_with(
            8192,
            &[
                (1000, &[0x20, 0x00, 0xD0, 0xC6, 0xC5]),
                (2000, &[0x8D, 0xF9, 0x1F]),
                (6000, &[0x8D, 0xF9, 0x1F]),
            ],
        );
        assert_eq!(classify_by_content(&image), Scheme::F8);
    }

    #[test]
    fn fe_vetoed_by_f8_hotspot_stores_through_mirror() {
        let image = rom_with(
            8192,
            &[
                (1000, &[0x20, 0x00, 0xD0, 0xC6, 0xC5]),
                (2000, &[0x8D, 0xF9, 0xFF]),
                (6000, &[0x8D, 0xF9, 0xFF]),
            ],
        );
        assert_eq!(classify_by_content(&image), Scheme::F8);
    }

    /// E0 outranks 3E when both signatures are present.
    #[test]
    fn order_8k_e0_before_3e() {
        let image = rom_with(
            8192,
            &[(1000, &[0x85, 0x3E, 0xA9, 0x00]), (6000, &[0xAD, 0xE0, 0x1F])],
        );
        assert_eq!(classify_by_content(&image), Scheme::E0);
    }

    /// A SuperChip layout outranks every hotspot signature.
    #[test]
    fn order_8k_superchip_first() {
        let mut image = vec![0xEA; 8192];
        image[5000..5003].copy_from_slice(&[0x8D, 0xE0, 0x1F]);
        assert_eq!(classify_by_content(&image), Scheme::F8sc);
    }

    // ===== 16K =====

    #[test]
    fn signatures_16k() {
        let image = rom_with(16384, &[(9000, &[0xAD, 0xE5, 0x1F])]);
        assert_eq!(classify_by_content(&image), Scheme::E7);

        let image = rom_with(16384, &[(9000, &[0x85, 0x3E, 0xA9, 0x00])]);
        assert_eq!(classify_by_content(&image), Scheme::Bs3E);

        let image = rom_with(16384, &[(9000, &[0x8D, 0xF6, 0x1F])]);
        assert_eq!(classify_by_content(&image), Scheme::F6);

        assert_eq!(classify_by_content(&vec![0xEA; 16384]), Scheme::F6sc);
    }

    #[test]
    fn order_16k_e7_before_3e() {
        let image = rom_with(
            16384,
            &[(100, &[0x85, 0x3E, 0xA9, 0x00]), (9000, &[0x8D, 0xE7, 0x1F])],
        );
        assert_eq!(classify_by_content(&image), Scheme::E7);
    }

    // ===== 29K / 32K =====

    #[test]
    fn arm_29k_is_fa2() {
        let image = rom_with(29696, &[(16, &[0x00, 0x80, 0x02, 0xE0])]);
        assert_eq!(classify_by_content(&image), Scheme::Fa2);
    }

    #[test]
    fn signatures_32k() {
        assert_eq!(classify_by_content(&vec![0xEA; 32768]), Scheme::F4sc);

        let image = rom_with(32768, &[(20000, b"DPC+"), (21000, b"DPC+")]);
        assert_eq!(classify_by_content(&image), Scheme::DpcPlus);

        let image = rom_with(32768, &[(20000, b"LENIN")]);
        assert_eq!(classify_by_content(&image), Scheme::Cty);

        let mut image = rom(32768);
        image[29 * 1024..].fill(0);
        assert_eq!(classify_by_content(&image), Scheme::Fa2);
    }

    #[test]
    fn order_32k_3f_before_dpc_plus() {
        let image = rom_with(
            32768,
            &[
                (100, &[0x85, 0x3F]),
                (200, &[0x85, 0x3F]),
                (20000, b"DPC+"),
                (21000, b"DPC+"),
            ],
        );
        assert_eq!(classify_by_content(&image), Scheme::Bs3F);
    }

    // ===== 64K =====

    #[test]
    fn signatures_64k() {
        let image = rom_with(65536, &[(65536 - 6, &[0x4A, 0x50])]);
        assert_eq!(classify_by_content(&image), Scheme::Bs4A50);

        let image = rom_with(65536, &[(65536 - 8, b"EFSC")]);
        assert_eq!(classify_by_content(&image), Scheme::Efsc);

        let image = rom_with(65536, &[(30000, &[0xAD, 0xE0, 0xFF])]);
        assert_eq!(classify_by_content(&image), Scheme::Ef);

        let image = rom_with(65536, &[(30000, &[0x0C, 0x1D, 0x08])]);
        assert_eq!(classify_by_content(&image), Scheme::X07);
    }

    #[test]
    fn order_64k_ef_before_x07() {
        let image = rom_with(
            65536,
            &[(100, &[0xAD, 0x0D, 0x08]), (30000, &[0x0C, 0xE0, 0x1F])],
        );
        assert_eq!(classify_by_content(&image), Scheme::Ef);
    }

    // ===== 128K / 256K / other =====

    #[test]
    fn signatures_large() {
        let image = rom_with(131072, &[(70000, &[0xBD, 0x00, 0x08])]);
        assert_eq!(classify_by_content(&image), Scheme::Sb);

        let image = rom_with(262144, &[(70000, &[0x85, 0x3E, 0xA9, 0x00])]);
        assert_eq!(classify_by_content(&image), Scheme::Bs3E);

        let image = rom_with(5000, &[(10, &[0x85, 0x3F, 0x85, 0x3F])]);
        assert_eq!(classify_by_content(&image), Scheme::Bs3F);
    }

    #[test]
    fn probe_variants() {
        let flag = Probe::Flag(is_probably_3e, Scheme::Bs3E);
        assert_eq!(flag.probe(&[0x85, 0x3E, 0xA9, 0x00]), Some(Scheme::Bs3E));
        assert_eq!(flag.probe(&[0x85, 0x3E]), None);

        let variant = Probe::Variant(is_probably_ef);
        assert_eq!(variant.probe(b"EFSC"), Some(Scheme::Efsc));
        assert_eq!(variant.probe(b"ABCD"), None);
    }

    #[test]
    fn classification_is_idempotent() {
        let image = rom_with(8192, &[(5000, &[0x8D, 0x40, 0x02])]);
        assert_eq!(classify_by_content(&image), classify_by_content(&image));
    }
}
