//! Extensible scheme detection via the chain-of-responsibility pattern.
//!
//! Callers can implement [`SchemeDetector`] and register it in a
//! [`SchemeDetectorChain`] to override or extend the built-in strategies,
//! for example with a database of known-image checksums.

use std::collections::BTreeMap;

use crate::content::classify_by_content;
use crate::extension::{extension_token, scheme_for_extension, scheme_for_override};
use crate::scheme::Scheme;

/// A single scheme detection strategy.
///
/// Implementors inspect the filename and/or image and return
/// `Some(Scheme)` when they recognise it, or `None` to defer to the next
/// detector in the chain. Returning `Some(Scheme::Auto)` is treated the
/// same as `None`.
///
/// # Object Safety
///
/// This trait is object-safe so that detectors can be stored as
/// `Box<dyn SchemeDetector>` in a [`SchemeDetectorChain`].
pub trait SchemeDetector: Send + Sync {
    /// Attempt to classify the image. Return `None` to defer.
    fn detect(&self, filename: &str, image: Option<&[u8]>) -> Option<Scheme>;

    /// Human-readable name for this detector (used in logging).
    ///
    /// Defaults to the short (unqualified) type name.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// Built-in detector for scheme-declaring filename extensions.
///
/// User overrides (keyed case-insensitively) are consulted before the
/// built-in [`EXTENSION_TABLE`](crate::extension::EXTENSION_TABLE).
#[derive(Debug, Clone, Default)]
pub struct ExtensionDetector {
    overrides: BTreeMap<String, Scheme>,
}

impl ExtensionDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector that prefers `overrides` over the built-in table.
    pub fn with_overrides(overrides: BTreeMap<String, Scheme>) -> Self {
        Self { overrides }
    }
}

impl SchemeDetector for ExtensionDetector {
    fn detect(&self, filename: &str, _image: Option<&[u8]>) -> Option<Scheme> {
        let ext = extension_token(filename)?;
        let scheme = match scheme_for_override(&self.overrides, ext) {
            Some(scheme) => scheme,
            None => scheme_for_extension(ext)?,
        };
        scheme.is_known().then_some(scheme)
    }

    fn name(&self) -> &str {
        "ExtensionDetector"
    }
}

/// Built-in detector that runs the content heuristics.
///
/// Defers when no image (or an empty one) is supplied; otherwise always
/// answers, so it terminates any chain it sits in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentDetector;

impl SchemeDetector for ContentDetector {
    fn detect(&self, _filename: &str, image: Option<&[u8]>) -> Option<Scheme> {
        match image {
            Some(image) if !image.is_empty() => Some(classify_by_content(image)),
            _ => None,
        }
    }

    fn name(&self) -> &str {
        "ContentDetector"
    }
}

/// Ordered chain of [`SchemeDetector`] implementations.
///
/// Detectors are consulted in order. The first known scheme wins.
///
/// # Examples
///
/// ```
/// use bsdetect_core::{Scheme, SchemeDetector, SchemeDetectorChain};
///
/// struct PitfallII;
/// impl SchemeDetector for PitfallII {
///     fn detect(&self, filename: &str, _image: Option<&[u8]>) -> Option<Scheme> {
///         filename.starts_with("Pitfall II").then_some(Scheme::Dpc)
///     }
/// }
///
/// let chain = SchemeDetectorChain::with_builtin().prepend(PitfallII);
///
/// assert_eq!(chain.detect("Pitfall II.bin", None), Some(Scheme::Dpc));
/// assert_eq!(chain.detect("Pitfall.f8", None), Some(Scheme::F8));
/// ```
pub struct SchemeDetectorChain {
    detectors: Vec<Box<dyn SchemeDetector>>,
}

impl SchemeDetectorChain {
    /// Create an empty chain with no detectors.
    ///
    /// An empty chain always returns `None` from [`detect`](Self::detect).
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// Create a chain with the [`ExtensionDetector`] followed by the
    /// [`ContentDetector`].
    pub fn with_builtin() -> Self {
        Self::new().push(ExtensionDetector::new()).push(ContentDetector)
    }

    /// Add a detector to the **front** of the chain (highest priority).
    ///
    /// Consumes and returns `self` for builder-style chaining.
    pub fn prepend(mut self, detector: impl SchemeDetector + 'static) -> Self {
        self.detectors.insert(0, Box::new(detector));
        self
    }

    /// Add a detector to the **end** of the chain (lowest priority).
    ///
    /// Consumes and returns `self` for builder-style chaining.
    pub fn push(mut self, detector: impl SchemeDetector + 'static) -> Self {
        self.detectors.push(Box::new(detector));
        self
    }

    /// Run the chain and return the first known scheme.
    pub fn detect(&self, filename: &str, image: Option<&[u8]>) -> Option<Scheme> {
        self.detect_with_source(filename, image)
            .map(|(scheme, _)| scheme)
    }

    /// Like [`detect`](Self::detect), also returning the name of the
    /// detector that answered.
    pub fn detect_with_source(
        &self,
        filename: &str,
        image: Option<&[u8]>,
    ) -> Option<(Scheme, &str)> {
        for detector in &self.detectors {
            if let Some(scheme) = detector.detect(filename, image).filter(|s| s.is_known()) {
                return Some((scheme, detector.name()));
            }
        }
        None
    }

    /// Names of the detectors, in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Return the number of detectors in the chain.
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// Return `true` if the chain contains no detectors.
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

impl Default for SchemeDetectorChain {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SchemeDetectorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
