// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The async content-loading collaborator.
//!
//! Hosts decide how authored content is fetched (HTTP, a file system, an
//! in-process cache). Trellis only needs the published text for a path and
//! treats every failure the same way: the consumer stays undecorated. There
//! is no retry and no timeout here.

use core::future::{Future, ready};

use hashbrown::HashMap;

/// Errors reported by a [`ContentLoader`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// Nothing is published at the requested path.
    #[error("no content published at {path}")]
    NotFound {
        /// Requested path.
        path: String,
    },
    /// The transport failed before a payload was received.
    #[error("failed to load {path}: {message}")]
    Transport {
        /// Requested path.
        path: String,
        /// Transport-specific description.
        message: String,
    },
}

/// Fetches authored content by path.
pub trait ContentLoader {
    /// Load the text published at `path`.
    fn load(&self, path: &str) -> impl Future<Output = Result<String, LoadError>>;
}

impl<L: ContentLoader + ?Sized> ContentLoader for &L {
    fn load(&self, path: &str) -> impl Future<Output = Result<String, LoadError>> {
        (**self).load(path)
    }
}

/// An in-memory table of published content.
///
/// ```rust
/// # tokio_test_block_on(async {
/// use trellis_content::{ContentLoader, LoadError, MemoryLoader};
///
/// let loader = MemoryLoader::new().with("/nav", "<ul><li>Home</li></ul>");
/// assert!(loader.load("/nav").await.is_ok());
/// assert!(matches!(loader.load("/missing").await, Err(LoadError::NotFound { .. })));
/// # });
/// # fn tokio_test_block_on(f: impl core::future::Future<Output = ()>) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    entries: HashMap<String, String>,
}

impl MemoryLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`MemoryLoader::insert`].
    #[must_use]
    pub fn with(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Publish `content` at `path`, replacing anything already there.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(path.into(), content.into());
    }
}

impl ContentLoader for MemoryLoader {
    fn load(&self, path: &str) -> impl Future<Output = Result<String, LoadError>> {
        let result = self
            .entries
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                path: path.to_owned(),
            });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_published_paths_only() {
        let loader = MemoryLoader::new().with("/nav", "<p>nav</p>");
        assert_eq!(loader.load("/nav").await.unwrap(), "<p>nav</p>");
        assert_eq!(
            loader.load("/footer").await,
            Err(LoadError::NotFound {
                path: "/footer".into()
            })
        );
    }

    #[tokio::test]
    async fn references_delegate() {
        let loader = MemoryLoader::new().with("/a", "a");
        let by_ref = &loader;
        assert_eq!(by_ref.load("/a").await.unwrap(), "a");
    }
}
