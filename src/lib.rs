// SPDX-License-Identifier: MPL-2.0
//! `lumina_studio` is the editing core of an AI-backed photo enhancement
//! studio.
//!
//! It owns the transformation orchestration state machine (upload → remote
//! AI transform → result → reset), the gallery multi-select model, and the
//! preset catalog, and consumes the remote storage and AI services through
//! abstract capability ports. Rendering, routing and authentication are
//! host concerns and live outside this crate.

#![doc(html_root_url = "https://docs.rs/lumina-studio/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{Error, Result};
