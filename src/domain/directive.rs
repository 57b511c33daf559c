// SPDX-License-Identifier: MPL-2.0
//! Transform directives.
//!
//! A directive describes one requested transformation: either one of the
//! fixed editing tools or a named preset filter resolved through the
//! [`PresetCatalog`](crate::domain::catalog::PresetCatalog). Directives are
//! immutable once constructed; the session manager passes them verbatim to
//! the transform capability.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ToolKind
// =============================================================================

/// The fixed editing tools offered by the product.
///
/// This is a closed set; open-ended filters go through the preset path
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Enhance facial features.
    Retouch,
    /// Remove unwanted objects.
    Remove,
    /// Add background depth of field.
    Blur,
    /// Apply trendy effects.
    Filter,
    /// Generate an AI avatar.
    Avatar,
    /// One-click automatic enhancement.
    Enhance,
}

impl ToolKind {
    /// All tools, in the order they are presented.
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Retouch,
        ToolKind::Remove,
        ToolKind::Blur,
        ToolKind::Filter,
        ToolKind::Avatar,
        ToolKind::Enhance,
    ];

    /// Stable identifier used on the wire and in logs.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ToolKind::Retouch => "retouch",
            ToolKind::Remove => "remove",
            ToolKind::Blur => "blur",
            ToolKind::Filter => "filter",
            ToolKind::Avatar => "avatar",
            ToolKind::Enhance => "enhance",
        }
    }

    /// Human-readable tool name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Retouch => "Face Retouch",
            ToolKind::Remove => "Object Removal",
            ToolKind::Blur => "Background Blur",
            ToolKind::Filter => "AI Filters",
            ToolKind::Avatar => "AI Avatar",
            ToolKind::Enhance => "Auto Enhance",
        }
    }

    /// The natural-language instruction sent to the transform service.
    #[must_use]
    pub fn instruction(self) -> &'static str {
        match self {
            ToolKind::Retouch => "Enhance facial features and skin texture",
            ToolKind::Remove => "Remove unwanted objects from the scene",
            ToolKind::Blur => "Add depth of field with a softly blurred background",
            ToolKind::Filter => "Apply trendy stylistic effects",
            ToolKind::Avatar => "Generate a stylized AI avatar of the subject",
            ToolKind::Enhance => "Automatically balance lighting, color and sharpness",
        }
    }

    /// Parses a stable identifier back into a tool.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.id() == id)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// Quality
// =============================================================================

/// Output quality requested from the transform service.
///
/// Fixed per request; the current design always asks for a single output
/// image (`count = 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quality {
    /// Standard resolution output.
    Standard,
    /// High resolution output.
    #[default]
    High,
}

impl Quality {
    /// Wire representation of the quality parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Standard => "standard",
            Quality::High => "hd",
        }
    }
}

// =============================================================================
// TransformDirective
// =============================================================================

/// Identifier of a directive, e.g. `retouch` or `preset:Vintage`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectiveId(String);

impl DirectiveId {
    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DirectiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single requested transformation.
///
/// Either a fixed tool or a named preset carrying its resolved instruction
/// text. The instruction is what the remote service actually consumes; the
/// id exists for logging and session bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformDirective {
    /// One of the fixed editing tools.
    Tool(ToolKind),
    /// A named preset with its resolved instruction text.
    Preset {
        /// Preset name as requested (e.g. `Vintage`).
        name: String,
        /// Instruction text resolved from the catalog.
        instruction: String,
    },
}

impl TransformDirective {
    /// Returns the directive identifier.
    #[must_use]
    pub fn id(&self) -> DirectiveId {
        match self {
            TransformDirective::Tool(tool) => DirectiveId(tool.id().to_string()),
            TransformDirective::Preset { name, .. } => DirectiveId(format!("preset:{name}")),
        }
    }

    /// Returns the natural-language instruction for the remote service.
    #[must_use]
    pub fn instruction(&self) -> &str {
        match self {
            TransformDirective::Tool(tool) => tool.instruction(),
            TransformDirective::Preset { instruction, .. } => instruction,
        }
    }

    /// Returns the wire tool id (`preset` for preset directives).
    #[must_use]
    pub fn tool_id(&self) -> &'static str {
        match self {
            TransformDirective::Tool(tool) => tool.id(),
            TransformDirective::Preset { .. } => "preset",
        }
    }
}

impl fmt::Display for TransformDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
