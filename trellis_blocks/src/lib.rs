// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Blocks: small content blocks that sit next to the navigation.
//!
//! - [`Carousel`]: a wrap-around slide index over an authored block, with the
//!   first and last rows as control labels and per-slide translation offsets.
//! - [`render_table`] / [`decorate_table`]: a stateless table renderer for a
//!   published JSON sheet (`{ "data": [ { … }, … ] }`), loaded through a
//!   [`ContentLoader`](trellis_content::ContentLoader).
//!
//! Both degrade quietly: an empty carousel ignores navigation, and table
//! failures are reported as [`TableError`] for the host to log.

mod carousel;
mod table;

pub use carousel::Carousel;
pub use table::{TableError, decorate_table, parse_table, render_table, table_source};
