// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Semantic roles of the navigation fragment's sections.

use serde::{Deserialize, Serialize};
use trellis_content::Element;

/// The part of the navigation a fragment section describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// One link and one image: the site logo.
    Brand,
    /// Secondary, utility navigation.
    TopBar,
    /// Primary navigation with accents and drop-downs.
    MainBar,
}

impl Role {
    /// Every role, in rendering order.
    pub const ALL: [Self; 3] = [Self::Brand, Self::TopBar, Self::MainBar];

    /// Class tokens that mark a section with this role.
    pub const fn class_names(self) -> &'static [&'static str] {
        match self {
            Self::Brand => &["navbar-brand", "brand"],
            Self::TopBar => &["navbar-top", "top-bar"],
            Self::MainBar => &["navbar-main", "main-bar"],
        }
    }

    /// The role a single class token marks, if any.
    pub fn from_class(class: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.class_names().contains(&class))
    }
}

/// Detect the role of a fragment section from its class list.
///
/// Every class is considered, in any position; the first that names a role
/// wins.
///
/// ```rust
/// use trellis_content::Element;
/// use trellis_menu::{Role, role_of};
///
/// let section = Element::new("div").with_attr("class", "navbar-main section");
/// assert_eq!(role_of(&section), Some(Role::MainBar));
/// assert_eq!(role_of(&Element::new("div").with_attr("class", "section")), None);
/// ```
pub fn role_of(section: &Element) -> Option<Role> {
    section.classes().find_map(Role::from_class)
}
