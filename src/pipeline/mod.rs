//! Pipeline stages for summary-to-PDF conversion.
//!
//! Each submodule implements exactly one transformation step and is pure
//! apart from [`pdf::write_pdf`].
//!
//! ## Data Flow
//!
//! ```text
//! raw text ──▶ normalise ──▶ parse ──▶ render ──▶ pdf
//!              (cleanup)    (blocks)  (pages)    (lopdf)
//! ```
//!
//! 1. [`normalise`]: strip fences, line-ending noise and invisible Unicode
//! 2. [`parse`]    : classify lines into typed blocks
//! 3. [`render`]   : wrap, shrink and paginate blocks under a style; uses
//!    [`layout`] for word wrapping and [`metrics`] for glyph widths
//! 4. [`pdf`]      : serialise the positioned document to PDF bytes

pub mod layout;
pub mod metrics;
pub mod normalise;
pub mod parse;
pub mod pdf;
pub mod render;
