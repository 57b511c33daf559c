// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core editing types and business rules.
//!
//! This module contains the pure data model of the editing core. Nothing in
//! here performs I/O; remote capabilities are reached only through the
//! application layer's ports.
//!
//! # Modules
//!
//! - [`asset`]: Image payloads and remote handles ([`ImageAsset`](asset::ImageAsset),
//!   [`AssetRef`](asset::AssetRef))
//! - [`catalog`]: Named preset filters ([`PresetCatalog`](catalog::PresetCatalog))
//! - [`directive`]: Transform requests ([`ToolKind`](directive::ToolKind),
//!   [`TransformDirective`](directive::TransformDirective))
//! - [`gallery`]: Past-edit collection and multi-select
//!   ([`GalleryItem`](gallery::GalleryItem), [`SelectionModel`](gallery::SelectionModel))
//! - [`session`]: The single active edit session and its state machine
//!   ([`EditSession`](session::EditSession), [`SessionPhase`](session::SessionPhase))

pub mod asset;
pub mod catalog;
pub mod directive;
pub mod gallery;
pub mod session;
