//! Content heuristics, one per bankswitching signature.
//!
//! Each `is_probably_*` function looks at a whole ROM image and answers a
//! single question. They share no state and may be called in any order;
//! the priority between them is decided by the probe tables in
//! [`content`](crate::content), not here.
//!
//! Most opcode signatures below are 6502 instructions touching a scheme's
//! hotspot addresses. Many were first collected by the MESS project and
//! later refined in Stella.

use crate::scheme::Scheme;
use crate::signature::{Signature, any_found_in};

// ============================================================================
// Signature tables
// ============================================================================

/// Size of one bank as seen by the 6507 (4K window).
pub const BANK_SIZE: usize = 4096;

/// Bytes at the start of each bank occupied by SuperChip RAM (read + write ports).
pub const SUPERCHIP_RAM_SIZE: usize = 256;

/// Only this much of the image is searched for the ARM loader.
pub const ARM_SEARCH_WINDOW: usize = 1024;

/// ARM loader patterns found near the start of Harmony/Melody driver images.
pub const ARM_SIGNATURES: &[Signature] = &[
    Signature::once(&[0xA0, 0xC1, 0x1F, 0xE0]),
    Signature::once(&[0x00, 0x80, 0x02, 0xE0]),
];

pub const ECONO_0840_SIGNATURES: &[Signature] = &[
    Signature::repeated(&[0xAD, 0x00, 0x08], 2), // LDA $0800
    Signature::repeated(&[0xAD, 0x40, 0x08], 2), // LDA $0840
    Signature::repeated(&[0x2C, 0x00, 0x08], 2), // BIT $0800
    Signature::repeated(&[0x0C, 0x00, 0x08, 0x4C], 2), // NOP $0800; JMP ...
    Signature::repeated(&[0x0C, 0xFF, 0x0F, 0x4C], 2), // NOP $0FFF; JMP ...
];

/// `STA $3E; LDA #$00`
pub const TIGERVISION_3E_SIGNATURE: Signature = Signature::once(&[0x85, 0x3E, 0xA9, 0x00]);

/// `STA $3F`, expected at least once per switched bank.
pub const TIGERVISION_3F_SIGNATURE: Signature = Signature::repeated(&[0x85, 0x3F], 2);

pub const CTY_SIGNATURE: Signature = Signature::once(b"LENIN");

pub const COMMAVID_SIGNATURES: &[Signature] = &[
    Signature::once(&[0x9D, 0xFF, 0xF3]), // STA $F3FF,X
    Signature::once(&[0x99, 0x00, 0xF4]), // STA $F400,Y
];

/// The DPC+ ARM driver names itself twice.
pub const DPC_PLUS_SIGNATURE: Signature = Signature::repeated(b"DPC+", 2);

pub const PARKER_E0_SIGNATURES: &[Signature] = &[
    Signature::once(&[0x8D, 0xE0, 0x1F]), // STA $1FE0
    Signature::once(&[0x8D, 0xE0, 0x5F]), // STA $5FE0
    Signature::once(&[0x8D, 0xE9, 0xFF]), // STA $FFE9
    Signature::once(&[0x0C, 0xE0, 0x1F]), // NOP $1FE0
    Signature::once(&[0xAD, 0xE0, 0x1F]), // LDA $1FE0
    Signature::once(&[0xAD, 0xE9, 0xFF]), // LDA $FFE9
    Signature::once(&[0xAD, 0xED, 0xFF]), // LDA $FFED
    Signature::once(&[0xAD, 0xF3, 0xBF]), // LDA $BFF3
];

pub const MNETWORK_E7_SIGNATURES: &[Signature] = &[
    Signature::once(&[0xAD, 0xE2, 0xFF]), // LDA $FFE2
    Signature::once(&[0xAD, 0xE5, 0xFF]), // LDA $FFE5
    Signature::once(&[0xAD, 0xE5, 0x1F]), // LDA $1FE5
    Signature::once(&[0xAD, 0xE7, 0x1F]), // LDA $1FE7
    Signature::once(&[0x0C, 0xE7, 0x1F]), // NOP $1FE7
    Signature::once(&[0x8D, 0xE7, 0xFF]), // STA $FFE7
    Signature::once(&[0x8D, 0xE7, 0x1F]), // STA $1FE7
];

/// Newer EF images carry a tag in their last 8 bytes (from $FFF8).
pub const EF_TAG_WINDOW: usize = 8;
pub const EF_TAG: Signature = Signature::once(b"EFEF");
pub const EFSC_TAG: Signature = Signature::once(b"EFSC");

/// Switches to bank 0, which is what start-up code nearly always does.
pub const EF_HOTSPOT_SIGNATURES: &[Signature] = &[
    Signature::once(&[0x0C, 0xE0, 0xFF]), // NOP $FFE0
    Signature::once(&[0xAD, 0xE0, 0xFF]), // LDA $FFE0
    Signature::once(&[0x0C, 0xE0, 0x1F]), // NOP $1FE0
    Signature::once(&[0xAD, 0xE0, 0x1F]), // LDA $1FE0
];

pub const ATARI_F6_SIGNATURES: &[Signature] = &[
    Signature::once(&[0x8D, 0xF6, 0x1F]), // STA $1FF6
    Signature::once(&[0x8D, 0xF6, 0xFF]), // STA $FFF6
    Signature::once(&[0xAD, 0xF6, 0x1F]), // LDA $1FF6
    Signature::once(&[0xAD, 0xF6, 0xFF]), // LDA $FFF6
    Signature::once(&[0x2C, 0xF6, 0x1F]), // BIT $1FF6
    Signature::once(&[0x2C, 0xF6, 0xFF]), // BIT $FFF6
];

/// The F8 switch to bank 1, through either address mirror.
pub const ATARI_F8_HOTSPOT_SIGNATURES: &[Signature] = &[
    Signature::repeated(&[0x8D, 0xF9, 0x1F], 2), // STA $1FF9
    Signature::repeated(&[0x8D, 0xF9, 0xFF], 2), // STA $FFF9
];

/// The 32K FA2 layout leaves this range unused (zero-filled).
pub const FA2_PADDING: std::ops::Range<usize> = 29 * 1024..32 * 1024;

/// FE switching has no hotspot; these are `JSR` sequences from known carts.
pub const ACTIVISION_FE_SIGNATURES: &[Signature] = &[
    Signature::once(&[0x20, 0x00, 0xD0, 0xC6, 0xC5]), // JSR $D000; DEC $C5
    Signature::once(&[0x20, 0xC3, 0xF8, 0xA5, 0x82]), // JSR $F8C3; LDA $82
    Signature::once(&[0xD0, 0xFB, 0x20, 0x73, 0xFE]), // BNE $FB; JSR $FE73
    Signature::once(&[0x20, 0x00, 0xF0, 0x84, 0xD6]), // JSR $F000; STY $D6
];

pub const SUPERBANK_SIGNATURES: &[Signature] = &[
    Signature::once(&[0xBD, 0x00, 0x08]), // LDA $0800,X
    Signature::once(&[0xAD, 0x00, 0x08]), // LDA $0800
];

pub const UA_SIGNATURES: &[Signature] = &[
    Signature::once(&[0x8D, 0x40, 0x02]), // STA $240
    Signature::once(&[0xAD, 0x40, 0x02]), // LDA $240
    Signature::once(&[0xBD, 0x1F, 0x02]), // LDA $21F,X
];

pub const X07_SIGNATURES: &[Signature] = &[
    Signature::once(&[0xAD, 0x0D, 0x08]), // LDA $080D
    Signature::once(&[0xAD, 0x1D, 0x08]), // LDA $081D
    Signature::once(&[0xAD, 0x2D, 0x08]), // LDA $082D
    Signature::once(&[0x0C, 0x0D, 0x08]), // NOP $080D
    Signature::once(&[0x0C, 0x1D, 0x08]), // NOP $081D
    Signature::once(&[0x0C, 0x2D, 0x08]), // NOP $082D
];

// ============================================================================
// Structural checks
// ============================================================================

/// SuperChip images hold their (unused) RAM area as 256 identical bytes at
/// the start of every 4K bank. Images shorter than one bank never qualify.
pub fn is_probably_sc(image: &[u8]) -> bool {
    let mut banks = image.chunks_exact(BANK_SIZE).peekable();
    if banks.peek().is_none() {
        return false;
    }
    banks.all(|bank| {
        let ram = &bank[..SUPERCHIP_RAM_SIZE];
        ram.iter().all(|&b| b == ram[0])
    })
}

/// Both halves of the image are byte-identical (an overdumped smaller ROM).
pub fn has_mirrored_halves(image: &[u8]) -> bool {
    if image.is_empty() || image.len() % 2 != 0 {
        return false;
    }
    let (low, high) = image.split_at(image.len() / 2);
    low == high
}

pub fn is_probably_arm(image: &[u8]) -> bool {
    let head = &image[..image.len().min(ARM_SEARCH_WINDOW)];
    any_found_in(ARM_SIGNATURES, head)
}

/// 4A50 images store $4A50 in the NMI vector slot, or start with a
/// `NOP $6Exx`/`NOP $6Fxx` at a reset vector in the $1Fxx page.
pub fn is_probably_4a50(image: &[u8]) -> bool {
    let len = image.len();
    if len >= 6 && image[len - 6] == 0x4A && image[len - 5] == 0x50 {
        return true;
    }

    let (Some(&lo), Some(&hi)) = (image.get(0xFFFC), image.get(0xFFFD)) else {
        return false;
    };
    if hi & 0x1F != 0x1F {
        return false;
    }
    let entry = usize::from(hi) * 256 + usize::from(lo);
    image.get(entry) == Some(&0x0C) && image.get(entry + 2).is_some_and(|&b| b & 0xFE == 0x6E)
}

/// The 32K FA2 variant leaves 29K..32K zero-filled. The 24K and 28K
/// variants are decided by size alone.
pub fn is_probably_fa2(image: &[u8]) -> bool {
    image
        .get(FA2_PADDING)
        .is_some_and(|padding| padding.iter().all(|&b| b == 0))
}

// ============================================================================
// Signature checks
// ============================================================================

pub fn is_probably_0840(image: &[u8]) -> bool {
    any_found_in(ECONO_0840_SIGNATURES, image)
}

pub fn is_probably_3e(image: &[u8]) -> bool {
    TIGERVISION_3E_SIGNATURE.is_found_in(image)
}

pub fn is_probably_3f(image: &[u8]) -> bool {
    TIGERVISION_3F_SIGNATURE.is_found_in(image)
}

pub fn is_probably_cty(image: &[u8]) -> bool {
    CTY_SIGNATURE.is_found_in(image)
}

pub fn is_probably_cv(image: &[u8]) -> bool {
    any_found_in(COMMAVID_SIGNATURES, image)
}

pub fn is_probably_dpc_plus(image: &[u8]) -> bool {
    DPC_PLUS_SIGNATURE.is_found_in(image)
}

pub fn is_probably_e0(image: &[u8]) -> bool {
    any_found_in(PARKER_E0_SIGNATURES, image)
}

pub fn is_probably_e7(image: &[u8]) -> bool {
    any_found_in(MNETWORK_E7_SIGNATURES, image)
}

/// EF and EFSC share their hotspots, so one check yields either.
///
/// The tag in the last 8 bytes is authoritative. Without it, a bank-0
/// switch marks the image as EF, and the SuperChip layout test picks
/// between EF and EFSC.
pub fn is_probably_ef(image: &[u8]) -> Option<Scheme> {
    let tail = &image[image.len().saturating_sub(EF_TAG_WINDOW)..];
    if EF_TAG.is_found_in(tail) {
        return Some(Scheme::Ef);
    }
    if EFSC_TAG.is_found_in(tail) {
        return Some(Scheme::Efsc);
    }

    if any_found_in(EF_HOTSPOT_SIGNATURES, image) {
        let scheme = if is_probably_sc(image) {
            Scheme::Efsc
        } else {
            Scheme::Ef
        };
        return Some(scheme);
    }
    None
}

pub fn is_probably_f6(image: &[u8]) -> bool {
    any_found_in(ATARI_F6_SIGNATURES, image)
}

/// Repeated stores to the F8 bank-1 hotspot. Used to veto FE, whose
/// signatures also show up in some F8 images.
pub fn has_f8_hotspot_stores(image: &[u8]) -> bool {
    any_found_in(ATARI_F8_HOTSPOT_SIGNATURES, image)
}

pub fn is_probably_fe(image: &[u8]) -> bool {
    any_found_in(ACTIVISION_FE_SIGNATURES, image)
}

pub fn is_probably_sb(image: &[u8]) -> bool {
    any_found_in(SUPERBANK_SIGNATURES, image)
}

pub fn is_probably_ua(image: &[u8]) -> bool {
    any_found_in(UA_SIGNATURES, image)
}

pub fn is_probably_x07(image: &[u8]) -> bool {
    any_found_in(X07_SIGNATURES, image)
}
