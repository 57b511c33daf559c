// SPDX-License-Identifier: MPL-2.0
//! Named preset filters.
//!
//! The catalog maps a preset name to the instruction text sent to the
//! transform service. Lookup never fails: unknown names resolve to a
//! generic professional-enhancement directive so that stale or future
//! preset names keep working instead of erroring.

use crate::domain::directive::TransformDirective;
use std::collections::HashMap;

/// Instruction used when a preset name is not in the catalog.
const FALLBACK_INSTRUCTION: &str =
    "Apply a subtle professional enhancement with balanced color and tone";

/// The presets shipped with the product, in presentation order.
const BUILTIN_PRESETS: [(&str, &str); 6] = [
    (
        "Vintage",
        "Apply a warm vintage film look with faded highlights and soft grain",
    ),
    (
        "Cinematic",
        "Grade with teal and orange cinematic color and gentle contrast",
    ),
    (
        "Portrait",
        "Soften skin tones and add a flattering portrait glow",
    ),
    (
        "Landscape",
        "Deepen greens and blues and lift shadow detail",
    ),
    (
        "B&W",
        "Convert to rich monochrome with strong tonal separation",
    ),
    (
        "Warm",
        "Shift the white balance toward golden hour warmth",
    ),
];

/// Maps preset names to transform instructions.
///
/// # Example
///
/// ```
/// use lumina_studio::domain::catalog::PresetCatalog;
///
/// let catalog = PresetCatalog::with_builtin_presets();
/// let directive = catalog.resolve("Vintage");
/// assert_eq!(directive.id().as_str(), "preset:Vintage");
///
/// // Unknown names degrade to the generic enhancement instruction.
/// let fallback = catalog.resolve("Holographic");
/// assert!(fallback.instruction().contains("professional enhancement"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    presets: HashMap<String, String>,
    order: Vec<String>,
}

impl PresetCatalog {
    /// Creates an empty catalog. Every lookup resolves to the fallback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-populated with the shipped presets.
    #[must_use]
    pub fn with_builtin_presets() -> Self {
        let mut catalog = Self::new();
        for (name, instruction) in BUILTIN_PRESETS {
            catalog.register(name, instruction);
        }
        catalog
    }

    /// Registers a preset. Re-registering a name replaces its instruction
    /// without changing its position.
    pub fn register(&mut self, name: impl Into<String>, instruction: impl Into<String>) {
        let name = name.into();
        if self.presets.insert(name.clone(), instruction.into()).is_none() {
            self.order.push(name);
        }
    }

    /// Returns `true` if the name is a registered preset.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// Returns the preset names in registration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Resolves a preset name into a directive.
    ///
    /// Never fails: an unregistered name yields the generic enhancement
    /// instruction under the requested name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> TransformDirective {
        let instruction = self
            .presets
            .get(name)
            .map_or(FALLBACK_INSTRUCTION, String::as_str);
        TransformDirective::Preset {
            name: name.to_string(),
            instruction: instruction.to_string(),
        }
    }
}
