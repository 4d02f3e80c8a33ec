//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Trellis diagram
//! renderer. It includes:
//!
//! - **Geometry**: Points, sizes, bounds and insets ([`geometry`] module)
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Draw**: Strokes, text, paths, shape outlines and render layers ([`draw`] module)
//! - **Catalogs**: Node shape and edge style registries ([`catalog`] module)
//! - **Document**: The JSON diagram document model ([`document`] module)

pub mod catalog;
pub mod color;
pub mod document;
pub mod draw;
pub mod geometry;
