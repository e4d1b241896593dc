//! Media Hydration
//!
//! Makes deferred content visible before anything is scored or sanitized:
//! text and markup parked in `data-*` attributes or `<template>` blocks,
//! images hidden in `<noscript>`, and lazy-loaded `src`/`srcset`/`poster`
//! values. Every step is best-effort and safe to run twice; malformed input
//! is skipped, never reported.
//!
//! Only ever run these over the working clone, never the source document.

use dom_query::Selection;

use crate::options::Options;

pub mod lazy_images;
pub mod lazy_text;
pub mod media_sources;
pub mod noscript;

pub use lazy_images::fix_lazy_images;
pub use lazy_text::hydrate_lazy_text;
pub use media_sources::hydrate_media_sources;
pub use noscript::unwrap_noscript_images;

/// Run every hydration pass over `root`, in dependency order.
pub fn hydrate(root: &Selection, opts: &Options) {
    hydrate_lazy_text(root, opts.template_min_text);
    unwrap_noscript_images(root);
    hydrate_media_sources(root);
    fix_lazy_images(root);
}
