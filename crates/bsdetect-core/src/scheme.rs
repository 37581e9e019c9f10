//! Scheme enum for bankswitching classification.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ParseSchemeError;

/// Bankswitching scheme of an Atari 2600 cartridge image.
///
/// [`Scheme::Auto`] is the catch-all outcome: it is returned whenever
/// neither the filename nor the content identifies a scheme, and means
/// "let the loader decide".
///
/// The enum derives [`Hash`], [`Eq`] and [`Copy`] so it can be used as a
/// map key and passed around by value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum Scheme {
    /// No scheme identified
    #[default]
    #[serde(rename = "AUTO")]
    Auto,
    /// 8K ECONObanking
    #[serde(rename = "0840")]
    Bs0840,
    /// Up to 2K, no bankswitching
    #[serde(rename = "2K")]
    Bs2K,
    /// Tigervision with RAM
    #[serde(rename = "3E")]
    Bs3E,
    /// Tigervision
    #[serde(rename = "3F")]
    Bs3F,
    /// 64K with RAM, hotspot at $4A50
    #[serde(rename = "4A50")]
    Bs4A50,
    /// Plain 4K, no bankswitching
    #[serde(rename = "4K")]
    Bs4K,
    /// Starpath Supercharger
    #[serde(rename = "AR")]
    Ar,
    /// CPUWIZ 256K
    #[serde(rename = "BF")]
    Bf,
    /// CPUWIZ 256K with SuperChip RAM
    #[serde(rename = "BFSC")]
    Bfsc,
    /// Chetiry
    #[serde(rename = "CTY")]
    Cty,
    /// Custom ARM driver
    #[serde(rename = "CU")]
    Cu,
    /// Commavid with extra RAM
    #[serde(rename = "CV")]
    Cv,
    /// CPUWIZ 128K
    #[serde(rename = "DF")]
    Df,
    /// CPUWIZ 128K with SuperChip RAM
    #[serde(rename = "DFSC")]
    Dfsc,
    /// Pitfall II display processor chip
    #[serde(rename = "DPC")]
    Dpc,
    /// Enhanced DPC running on the Harmony ARM
    #[serde(rename = "DPC+")]
    DpcPlus,
    /// Parker Brothers 8K
    #[serde(rename = "E0")]
    E0,
    /// M-Network 16K
    #[serde(rename = "E7")]
    E7,
    /// Homestar Runner 64K
    #[serde(rename = "EF")]
    Ef,
    /// Homestar Runner 64K with SuperChip RAM
    #[serde(rename = "EFSC")]
    Efsc,
    /// Dynacom Megaboy
    #[serde(rename = "F0")]
    F0,
    /// Atari 32K
    #[serde(rename = "F4")]
    F4,
    /// Atari 32K with SuperChip RAM
    #[serde(rename = "F4SC")]
    F4sc,
    /// Atari 16K
    #[serde(rename = "F6")]
    F6,
    /// Atari 16K with SuperChip RAM
    #[serde(rename = "F6SC")]
    F6sc,
    /// Atari 8K
    #[serde(rename = "F8")]
    F8,
    /// Atari 8K with SuperChip RAM
    #[serde(rename = "F8SC")]
    F8sc,
    /// CBS RAM Plus 12K
    #[serde(rename = "FA")]
    Fa,
    /// CBS RAM Plus 24/28/32K
    #[serde(rename = "FA2")]
    Fa2,
    /// Activision 8K (Decathlon, Robot Tank)
    #[serde(rename = "FE")]
    Fe,
    /// Chris Wilkson's Megacart
    #[serde(rename = "MC")]
    Mc,
    /// SUPERbanking 128K/256K
    #[serde(rename = "SB")]
    Sb,
    /// UA Limited 8K
    #[serde(rename = "UA")]
    Ua,
    /// AtariAge 64K
    #[serde(rename = "X07")]
    X07,
}

impl Scheme {
    /// Every variant, in declaration order.
    pub const ALL: [Scheme; 35] = [
        Scheme::Auto,
        Scheme::Bs0840,
        Scheme::Bs2K,
        Scheme::Bs3E,
        Scheme::Bs3F,
        Scheme::Bs4A50,
        Scheme::Bs4K,
        Scheme::Ar,
        Scheme::Bf,
        Scheme::Bfsc,
        Scheme::Cty,
        Scheme::Cu,
        Scheme::Cv,
        Scheme::Df,
        Scheme::Dfsc,
        Scheme::Dpc,
        Scheme::DpcPlus,
        Scheme::E0,
        Scheme::E7,
        Scheme::Ef,
        Scheme::Efsc,
        Scheme::F0,
        Scheme::F4,
        Scheme::F4sc,
        Scheme::F6,
        Scheme::F6sc,
        Scheme::F8,
        Scheme::F8sc,
        Scheme::Fa,
        Scheme::Fa2,
        Scheme::Fe,
        Scheme::Mc,
        Scheme::Sb,
        Scheme::Ua,
        Scheme::X07,
    ];

    /// Canonical short name, as used in filename extensions and cart menus.
    pub fn name(self) -> &'static str {
        match self {
            Scheme::Auto => "AUTO",
            Scheme::Bs0840 => "0840",
            Scheme::Bs2K => "2K",
            Scheme::Bs3E => "3E",
            Scheme::Bs3F => "3F",
            Scheme::Bs4A50 => "4A50",
            Scheme::Bs4K => "4K",
            Scheme::Ar => "AR",
            Scheme::Bf => "BF",
            Scheme::Bfsc => "BFSC",
            Scheme::Cty => "CTY",
            Scheme::Cu => "CU",
            Scheme::Cv => "CV",
            Scheme::Df => "DF",
            Scheme::Dfsc => "DFSC",
            Scheme::Dpc => "DPC",
            Scheme::DpcPlus => "DPC+",
            Scheme::E0 => "E0",
            Scheme::E7 => "E7",
            Scheme::Ef => "EF",
            Scheme::Efsc => "EFSC",
            Scheme::F0 => "F0",
            Scheme::F4 => "F4",
            Scheme::F4sc => "F4SC",
            Scheme::F6 => "F6",
            Scheme::F6sc => "F6SC",
            Scheme::F8 => "F8",
            Scheme::F8sc => "F8SC",
            Scheme::Fa => "FA",
            Scheme::Fa2 => "FA2",
            Scheme::Fe => "FE",
            Scheme::Mc => "MC",
            Scheme::Sb => "SB",
            Scheme::Ua => "UA",
            Scheme::X07 => "X07",
        }
    }

    /// Human-readable description for menus and logs.
    pub fn description(self) -> &'static str {
        match self {
            Scheme::Auto => "Auto-detect",
            Scheme::Bs0840 => "0840 (8K ECONObank)",
            Scheme::Bs2K => "2K (32-2048 bytes Atari)",
            Scheme::Bs3E => "3E (32K Tigervision)",
            Scheme::Bs3F => "3F (512K Tigervision)",
            Scheme::Bs4A50 => "4A50 (64K 4A50 + RAM)",
            Scheme::Bs4K => "4K (4K Atari)",
            Scheme::Ar => "AR (Supercharger)",
            Scheme::Bf => "BF (CPUWIZ 256K)",
            Scheme::Bfsc => "BFSC (CPUWIZ 256K + RAM)",
            Scheme::Cty => "CTY (CDW - Chetiry)",
            Scheme::Cu => "CU (Custom)",
            Scheme::Cv => "CV (Commavid extra RAM)",
            Scheme::Df => "DF (CPUWIZ 128K)",
            Scheme::Dfsc => "DFSC (CPUWIZ 128K + RAM)",
            Scheme::Dpc => "DPC (Pitfall II)",
            Scheme::DpcPlus => "DPC+ (Enhanced DPC)",
            Scheme::E0 => "E0 (8K Parker Bros)",
            Scheme::E7 => "E7 (16K M-network)",
            Scheme::Ef => "EF (64K H. Runner)",
            Scheme::Efsc => "EFSC (64K H. Runner + RAM)",
            Scheme::F0 => "F0 (Dynacom Megaboy)",
            Scheme::F4 => "F4 (32K Atari)",
            Scheme::F4sc => "F4SC (32K Atari + RAM)",
            Scheme::F6 => "F6 (16K Atari)",
            Scheme::F6sc => "F6SC (16K Atari + RAM)",
            Scheme::F8 => "F8 (8K Atari)",
            Scheme::F8sc => "F8SC (8K Atari + RAM)",
            Scheme::Fa => "FA (CBS RAM Plus)",
            Scheme::Fa2 => "FA2 (CBS RAM Plus 24/28K)",
            Scheme::Fe => "FE (8K Decathlon)",
            Scheme::Mc => "MC (C. Wilkson Megacart)",
            Scheme::Sb => "SB (128-256K SUPERbank)",
            Scheme::Ua => "UA (8K UA Ltd.)",
            Scheme::X07 => "X07 (64K AtariAge)",
        }
    }

    /// Returns `true` for every variant except [`Scheme::Auto`].
    #[must_use]
    pub fn is_known(self) -> bool {
        !matches!(self, Scheme::Auto)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = ParseSchemeError;

    /// Parse a canonical name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Scheme::ALL
            .iter()
            .copied()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSchemeError {
                name: s.to_string(),
            })
    }
}
