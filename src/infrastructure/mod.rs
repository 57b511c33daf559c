// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer - Concrete bindings for the application ports.
//!
//! - [`http`]: reqwest-backed adapters for the storage and transform
//!   services, plus the no-op gallery bulk backend
//! - [`mime`]: byte-level image format sniffing

pub mod http;
pub mod mime;
