//! Filename extension hints.
//!
//! Harmony and UnoCart users declare a cart's scheme by renaming the file
//! with a scheme-specific extension (`game.f8s`, `demo.dpp`). Matching is
//! purely on the filename string; no I/O.

use std::collections::BTreeMap;

use crate::scheme::Scheme;

/// Extension (uppercase, no dot) to scheme.
///
/// Generic ROM extensions map to [`Scheme::Auto`] explicitly so they read
/// as "known, but says nothing" rather than "unrecognised".
pub const EXTENSION_TABLE: &[(&str, Scheme)] = &[
    // Containers and generic dumps
    ("A26", Scheme::Auto),
    ("BIN", Scheme::Auto),
    ("ROM", Scheme::Auto),
    ("GZ", Scheme::Auto),
    ("ZIP", Scheme::Auto),
    // Scheme-declaring extensions
    ("084", Scheme::Bs0840),
    ("0840", Scheme::Bs0840),
    ("2K", Scheme::Bs2K),
    ("3E", Scheme::Bs3E),
    ("3F", Scheme::Bs3F),
    ("4A5", Scheme::Bs4A50),
    ("4A50", Scheme::Bs4A50),
    ("4K", Scheme::Bs4K),
    ("AR", Scheme::Ar),
    ("BF", Scheme::Bf),
    ("BFS", Scheme::Bfsc),
    ("BFSC", Scheme::Bfsc),
    ("CTY", Scheme::Cty),
    ("CU", Scheme::Cu),
    ("CV", Scheme::Cv),
    ("DF", Scheme::Df),
    ("DFS", Scheme::Dfsc),
    ("DFSC", Scheme::Dfsc),
    ("DPC", Scheme::Dpc),
    ("DPP", Scheme::DpcPlus),
    ("DPCP", Scheme::DpcPlus),
    ("E0", Scheme::E0),
    ("E7", Scheme::E7),
    ("EF", Scheme::Ef),
    ("EFS", Scheme::Efsc),
    ("EFSC", Scheme::Efsc),
    ("F0", Scheme::F0),
    ("F4", Scheme::F4),
    ("F4S", Scheme::F4sc),
    ("F4SC", Scheme::F4sc),
    ("F6", Scheme::F6),
    ("F6S", Scheme::F6sc),
    ("F6SC", Scheme::F6sc),
    ("F8", Scheme::F8),
    ("F8S", Scheme::F8sc),
    ("F8SC", Scheme::F8sc),
    ("FA", Scheme::Fa),
    ("FA2", Scheme::Fa2),
    ("FE", Scheme::Fe),
    ("MC", Scheme::Mc),
    ("SB", Scheme::Sb),
    ("UA", Scheme::Ua),
    ("X07", Scheme::X07),
];

/// The token after the last `.` in `filename`, if any.
///
/// Only the final path component is considered, so a dot in a directory
/// name does not produce an extension.
pub fn extension_token(filename: &str) -> Option<&str> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (_, ext) = name.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}

/// Look up an extension token (case-insensitive) in [`EXTENSION_TABLE`].
pub fn scheme_for_extension(ext: &str) -> Option<Scheme> {
    EXTENSION_TABLE
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|&(_, scheme)| scheme)
}

/// Look up an extension token (case-insensitive) in user-supplied
/// `overrides`. Among keys differing only in case, the first in map order
/// wins.
pub fn scheme_for_override(overrides: &BTreeMap<String, Scheme>, ext: &str) -> Option<Scheme> {
    overrides
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(ext))
        .map(|(_, &scheme)| scheme)
}

/// Scheme declared by `filename`'s extension, or [`Scheme::Auto`] when the
/// extension is missing or not scheme-specific.
pub fn match_by_extension(filename: &str) -> Scheme {
    extension_token(filename)
        .and_then(scheme_for_extension)
        .unwrap_or(Scheme::Auto)
}
