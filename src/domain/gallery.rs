// SPDX-License-Identifier: MPL-2.0
//! Past-edit gallery and multi-select.
//!
//! Gallery items are external-origin display metadata; the core never
//! creates or persists them. What the core does own is the selection
//! state: a membership-only set of item ids over a fixed collection, plus
//! the derived rule that bulk actions are available exactly when the
//! selection is non-empty.

use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt;

// =============================================================================
// Items
// =============================================================================

/// Identifier of a gallery item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GalleryItemId(String);

impl GalleryItemId {
    /// Creates an id from its external representation.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GalleryItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of edit a gallery item resulted from, shown as its badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCategory {
    FaceRetouch,
    ObjectRemoval,
    BackgroundBlur,
    AiFilter,
    AiAvatar,
}

impl EditCategory {
    /// Human-readable badge text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EditCategory::FaceRetouch => "Face Retouch",
            EditCategory::ObjectRemoval => "Object Removal",
            EditCategory::BackgroundBlur => "Background Blur",
            EditCategory::AiFilter => "AI Filters",
            EditCategory::AiAvatar => "AI Avatar",
        }
    }
}

/// One past edit, as displayed in the gallery.
///
/// Read-only from the core's perspective; there is no durable backing
/// store in the current design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    /// Stable item id.
    pub id: GalleryItemId,
    /// Label of the original image.
    pub label: String,
    /// Label of the edited output.
    pub edited_label: String,
    /// Which edit produced the item.
    pub category: EditCategory,
    /// Date of the edit.
    pub date: NaiveDate,
    /// Pixel dimensions of the original.
    pub dimensions: (u32, u32),
}

/// The illustrative collection shown before any real history exists.
///
/// # Panics
///
/// Panics if one of the literal dates is invalid, which would be a bug in
/// the table itself.
#[must_use]
pub fn sample_collection() -> Vec<GalleryItem> {
    let entries: [(&str, &str, &str, EditCategory, (i32, u32, u32), (u32, u32)); 6] = [
        (
            "1",
            "Original Portrait",
            "AI Enhanced Portrait",
            EditCategory::FaceRetouch,
            (2024, 1, 20),
            (1920, 1080),
        ),
        (
            "2",
            "Landscape Photo",
            "Enhanced Landscape",
            EditCategory::BackgroundBlur,
            (2024, 1, 19),
            (2048, 1536),
        ),
        (
            "3",
            "Group Photo",
            "Object Removed",
            EditCategory::ObjectRemoval,
            (2024, 1, 18),
            (1600, 1200),
        ),
        (
            "4",
            "Selfie",
            "AI Avatar",
            EditCategory::AiAvatar,
            (2024, 1, 17),
            (1080, 1080),
        ),
        (
            "5",
            "Street Photo",
            "Vintage Filter",
            EditCategory::AiFilter,
            (2024, 1, 16),
            (1920, 1280),
        ),
        (
            "6",
            "Nature Shot",
            "Cinematic Look",
            EditCategory::AiFilter,
            (2024, 1, 15),
            (2560, 1440),
        ),
    ];

    entries
        .into_iter()
        .map(|(id, label, edited, category, (y, m, d), dimensions)| GalleryItem {
            id: GalleryItemId::new(id),
            label: label.to_string(),
            edited_label: edited.to_string(),
            category,
            date: NaiveDate::from_ymd_opt(y, m, d).expect("valid literal date"),
            dimensions,
        })
        .collect()
}

// =============================================================================
// Selection
// =============================================================================

/// Bulk actions offered over the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Download,
    Share,
    Delete,
}

impl BulkAction {
    /// All bulk actions, in presentation order.
    pub const ALL: [BulkAction; 3] = [BulkAction::Download, BulkAction::Share, BulkAction::Delete];
}

/// Multi-select state over a fixed gallery collection.
///
/// Membership only: no ordering guarantee on the selected set. Ids outside
/// the collection are ignored. The selection is cleared when the user
/// navigates away from the gallery.
///
/// # Example
///
/// ```
/// use lumina_studio::domain::gallery::{sample_collection, SelectionModel};
///
/// let mut selection = SelectionModel::new(sample_collection());
/// let id = selection.items()[0].id.clone();
///
/// assert!(!selection.bulk_actions_enabled());
/// selection.toggle(&id);
/// assert!(selection.is_selected(&id));
/// assert!(selection.bulk_actions_enabled());
/// ```
#[derive(Debug, Clone)]
pub struct SelectionModel {
    items: Vec<GalleryItem>,
    known_ids: HashSet<GalleryItemId>,
    selected: HashSet<GalleryItemId>,
}

impl SelectionModel {
    /// Creates a selection model over a fixed collection.
    #[must_use]
    pub fn new(items: Vec<GalleryItem>) -> Self {
        let known_ids = items.iter().map(|item| item.id.clone()).collect();
        Self {
            items,
            known_ids,
            selected: HashSet::new(),
        }
    }

    /// Returns the fixed collection, in display order.
    #[must_use]
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Toggles membership of an id and returns whether it is now selected.
    ///
    /// Toggling the same id twice restores the original membership. Ids
    /// not in the collection are ignored.
    pub fn toggle(&mut self, id: &GalleryItemId) -> bool {
        if !self.known_ids.contains(id) {
            return false;
        }
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        }
    }

    /// Returns `true` if the id is currently selected.
    #[must_use]
    pub fn is_selected(&self, id: &GalleryItemId) -> bool {
        self.selected.contains(id)
    }

    /// Returns the number of selected items.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Returns the selected ids (no ordering guarantee).
    #[must_use]
    pub fn selected_ids(&self) -> Vec<GalleryItemId> {
        self.selected.iter().cloned().collect()
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Bulk actions are available exactly when something is selected.
    ///
    /// The rule is shared by every action; there is no per-action
    /// distinction.
    #[must_use]
    pub fn bulk_actions_enabled(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Per-action form of [`bulk_actions_enabled`](Self::bulk_actions_enabled).
    #[must_use]
    pub fn is_action_enabled(&self, _action: BulkAction) -> bool {
        self.bulk_actions_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> SelectionModel {
        SelectionModel::new(sample_collection())
    }

    #[test]
    fn sample_collection_has_six_items() {
        let items = sample_collection();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].category.label(), "Face Retouch");
        assert_eq!(items[0].dimensions, (1920, 1080));
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut selection = model();
        let id = GalleryItemId::new("3");

        assert!(selection.toggle(&id));
        assert!(selection.is_selected(&id));
        assert!(!selection.toggle(&id));
        assert!(!selection.is_selected(&id));
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut selection = model();
        assert!(!selection.toggle(&GalleryItemId::new("nope")));
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn bulk_actions_track_selection_emptiness() {
        let mut selection = model();
        assert!(!selection.bulk_actions_enabled());
        for action in BulkAction::ALL {
            assert!(!selection.is_action_enabled(action));
        }

        selection.toggle(&GalleryItemId::new("1"));
        selection.toggle(&GalleryItemId::new("2"));
        assert_eq!(selection.selected_count(), 2);
        for action in BulkAction::ALL {
            assert!(selection.is_action_enabled(action));
        }

        selection.clear();
        assert!(!selection.bulk_actions_enabled());
    }

    #[test]
    fn selected_ids_reports_membership_only() {
        let mut selection = model();
        selection.toggle(&GalleryItemId::new("5"));
        selection.toggle(&GalleryItemId::new("1"));

        let mut ids: Vec<String> = selection
            .selected_ids()
            .into_iter()
            .map(|id| id.as_str().to_string())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["1".to_string(), "5".to_string()]);
    }
}
