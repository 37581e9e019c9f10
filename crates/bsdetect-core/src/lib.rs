//! # bsdetect-core
//!
//! Bankswitching scheme detection for Atari 2600 cartridge images.
//!
//! Detection works from:
//! - the filename extension, when the user has declared a scheme with it
//!   (`game.f8s`, `demo.dpp`)
//! - the image content, through signature and layout heuristics
//! - both, with the extension taking precedence
//!
//! It never fails. When nothing identifies the image the answer is
//! [`Scheme::Auto`].
//!
//! ```
//! use bsdetect_core::{Scheme, detect_scheme};
//!
//! assert_eq!(detect_scheme("Pitfall II.dpc", None), Scheme::Dpc);
//! assert_eq!(detect_scheme("", Some(&[0xEA; 12 * 1024][..])), Scheme::Fa);
//! assert_eq!(detect_scheme("", None), Scheme::Auto);
//! ```

pub mod config;
pub mod content;
pub mod detector;
pub mod error;
pub mod extension;
pub mod heuristics;
pub mod scheme;
pub mod signature;

use tracing::debug;

pub use config::{ConfigWarning, DetectConfig};
pub use content::classify_by_content;
pub use detector::{ContentDetector, ExtensionDetector, SchemeDetector, SchemeDetectorChain};
pub use error::{ConfigError, ConfigResult, ParseSchemeError};
pub use extension::match_by_extension;
pub use scheme::Scheme;
pub use signature::{Signature, contains_signature};

/// Best-guess scheme for a ROM, from its filename and/or its bytes.
///
/// A scheme-declaring extension wins outright. Otherwise a non-empty image
/// is classified by content. With neither, the result is [`Scheme::Auto`].
pub fn detect_scheme(filename: &str, image: Option<&[u8]>) -> Scheme {
    if !filename.is_empty() {
        let scheme = match_by_extension(filename);
        if scheme.is_known() {
            debug!(filename, %scheme, source = "extension", "scheme detected");
            return scheme;
        }
    }

    match image {
        Some(image) if !image.is_empty() => {
            let scheme = classify_by_content(image);
            debug!(size = image.len(), %scheme, source = "content", "scheme detected");
            scheme
        }
        _ => {
            debug!(filename, source = "default", "no scheme hint available");
            Scheme::Auto
        }
    }
}

/// Scheme detection driven by a [`DetectConfig`] and a detector chain.
///
/// `Detector::default()` behaves exactly like [`detect_scheme`].
#[derive(Debug)]
pub struct Detector {
    chain: SchemeDetectorChain,
}

impl Detector {
    /// Build the built-in chain according to `config`.
    pub fn new(config: &DetectConfig) -> Self {
        let mut chain = SchemeDetectorChain::new();
        if config.extension_hints {
            chain = chain.push(ExtensionDetector::with_overrides(config.extensions.clone()));
        }
        if config.content_sniffing {
            chain = chain.push(ContentDetector);
        }
        Self { chain }
    }

    /// Use a caller-assembled chain.
    pub fn with_chain(chain: SchemeDetectorChain) -> Self {
        Self { chain }
    }

    pub fn chain(&self) -> &SchemeDetectorChain {
        &self.chain
    }

    /// Best-guess scheme; [`Scheme::Auto`] when no detector answers.
    pub fn detect(&self, filename: &str, image: Option<&[u8]>) -> Scheme {
        match self.chain.detect_with_source(filename, image) {
            Some((scheme, source)) => {
                debug!(filename, %scheme, source, "scheme detected");
                scheme
            }
            None => {
                debug!(filename, source = "default", "no detector matched");
                Scheme::Auto
            }
        }
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(&DetectConfig::default())
    }
}
