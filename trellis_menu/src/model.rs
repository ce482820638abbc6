// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The assembled navigation model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use trellis_content::Element;
use trellis_disclosure::SectionId;
use url::Url;

use crate::parser::{Icon, MenuEntry, MenuParser};
use crate::role::{Role, role_of};

/// Dataset key holding the main bar's comma-separated accents.
pub const ACCENT_ATTRIBUTE: &str = "menuBorderColors";

/// A positional visual-category tag for a main-bar entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Accent(String);

impl Accent {
    /// Create an accent from its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The accent identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a comma-separated accent list. Items are trimmed and empty items
    /// dropped.
    pub fn parse_list(list: &str) -> Vec<Self> {
        list.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(Self::new)
            .collect()
    }
}

/// What to tag main-bar entries with once the configured accents run out.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentFallback {
    /// Start again from the first accent.
    #[default]
    Cycle,
    /// Leave the remaining entries untagged.
    None,
    /// Tag the remaining entries with a fixed accent.
    Default(Accent),
}

impl AccentFallback {
    /// The accent for the entry at `index`, given the configured accents.
    ///
    /// With no configured accents every entry is untagged.
    pub fn accent_for(&self, accents: &[Accent], index: usize) -> Option<Accent> {
        if accents.is_empty() {
            return None;
        }
        if let Some(accent) = accents.get(index) {
            return Some(accent.clone());
        }
        match self {
            Self::Cycle => Some(accents[index % accents.len()].clone()),
            Self::None => None,
            Self::Default(accent) => Some(accent.clone()),
        }
    }
}

/// The site logo link.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Link target, as authored. Empty if the brand section has no link.
    pub url: String,
    /// Logo image.
    pub icon: Option<Icon>,
}

/// A main-bar entry and its accent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentedEntry {
    /// The entry.
    #[serde(flatten)]
    pub entry: MenuEntry,
    /// Positional accent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<Accent>,
}

/// The whole parsed navigation. Immutable once assembled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuModel {
    /// Site logo.
    pub brand: Brand,
    /// Secondary navigation.
    pub top_bar: Vec<MenuEntry>,
    /// Primary navigation, accented by position.
    pub main_bar: Vec<AccentedEntry>,
    /// `dataset` of every role section, passed through uninterpreted.
    pub section_metadata: BTreeMap<Role, BTreeMap<String, String>>,
}

impl MenuModel {
    /// Identifiers of the main bar's drop-down roots.
    pub fn sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.main_bar
            .iter()
            .enumerate()
            .filter(|(_, accented)| accented.entry.is_drop_down())
            .map(|(index, _)| SectionId(index))
    }

    /// The drop-down root for `id`, if it is one.
    pub fn section(&self, id: SectionId) -> Option<&AccentedEntry> {
        self.main_bar
            .get(id.0)
            .filter(|accented| accented.entry.is_drop_down())
    }

    /// Passthrough metadata of one role section.
    pub fn metadata(&self, role: Role) -> Option<&BTreeMap<String, String>> {
        self.section_metadata.get(&role)
    }
}

/// Knobs for [`assemble`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Base URL for resolving entry links.
    pub base: Option<Url>,
    /// Dataset key of the main bar's accent list.
    pub accent_attribute: String,
    /// Accent policy past the end of the configured list.
    pub accent_fallback: AccentFallback,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            base: None,
            accent_attribute: ACCENT_ATTRIBUTE.to_owned(),
            accent_fallback: AccentFallback::default(),
        }
    }
}

/// Build a [`MenuModel`] from a navigation fragment.
///
/// Sections are found by [`role_of`], looking through wrapper elements that
/// have no role. Missing or malformed sections degrade to empty fields and
/// are logged; assembly never fails.
///
/// ```rust
/// use trellis_content::read_fragment;
/// use trellis_menu::{AssemblyOptions, assemble};
///
/// let fragment = read_fragment(
///     r#"<div class="section navbar-brand"><p><a href="/"><img src="logo.png"></a></p></div>
///        <div class="section navbar-main" data-menu-border-colors="red, blue">
///          <ul><li><a href="/a">A</a></li><li><a href="/b">B</a></li></ul>
///        </div>"#,
/// )
/// .unwrap();
///
/// let model = assemble(&fragment, &AssemblyOptions::default());
/// assert_eq!(model.brand.url, "/");
/// assert_eq!(model.main_bar[1].accent.as_ref().unwrap().as_str(), "blue");
/// assert!(model.top_bar.is_empty());
/// ```
pub fn assemble(fragment: &Element, options: &AssemblyOptions) -> MenuModel {
    let parser = match &options.base {
        Some(base) => MenuParser::with_base(base.clone()),
        None => MenuParser::new(),
    };

    let mut sections = BTreeMap::new();
    collect_sections(fragment, &mut sections);

    let mut model = MenuModel::default();
    for role in Role::ALL {
        let Some(section) = sections.get(&role) else {
            warn!(?role, "navigation fragment has no section for role");
            continue;
        };
        model.section_metadata.insert(
            role,
            section
                .dataset()
                .map(|(key, value)| (key, value.to_owned()))
                .collect(),
        );
        match role {
            Role::Brand => model.brand = brand(section),
            Role::TopBar => model.top_bar = bar(section, role, &parser),
            Role::MainBar => {
                let accents = section
                    .data(&options.accent_attribute)
                    .map(Accent::parse_list)
                    .unwrap_or_default();
                let entries = bar(section, role, &parser);
                if accents.len() < entries.len() {
                    warn!(
                        accents = accents.len(),
                        entries = entries.len(),
                        fallback = ?options.accent_fallback,
                        "fewer accents than main-bar entries"
                    );
                }
                model.main_bar = entries
                    .into_iter()
                    .enumerate()
                    .map(|(index, entry)| AccentedEntry {
                        accent: options.accent_fallback.accent_for(&accents, index),
                        entry,
                    })
                    .collect();
            }
        }
    }
    debug!(
        top = model.top_bar.len(),
        main = model.main_bar.len(),
        sections = model.sections().count(),
        "assembled navigation model"
    );
    model
}

fn collect_sections<'a>(el: &'a Element, out: &mut BTreeMap<Role, &'a Element>) {
    for child in el.child_elements() {
        match role_of(child) {
            Some(role) => {
                if out.insert(role, child).is_some() {
                    debug!(?role, "later section replaces an earlier one with the same role");
                }
            }
            None => collect_sections(child, out),
        }
    }
}

fn brand(section: &Element) -> Brand {
    let link = section.find(|el| el.is("a") && el.attr("href").is_some());
    let Some(link) = link else {
        warn!("brand section has no link");
        return Brand {
            url: String::new(),
            icon: Icon::of(section),
        };
    };
    let icon = Icon::of(link).or_else(|| Icon::of(section));
    if icon.is_none() {
        warn!("brand section has no image");
    }
    Brand {
        url: link.attr("href").unwrap_or_default().to_owned(),
        icon,
    }
}

fn bar(section: &Element, role: Role, parser: &MenuParser) -> Vec<MenuEntry> {
    match section.find(|el| el.is("ul") || el.is("ol")) {
        Some(list) => parser.parse(list),
        None => {
            warn!(?role, "navigation section has no list");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_content::read_fragment;

    const FRAGMENT: &str = r#"
        <div class="section navbar-brand" data-theme="light">
          <div class="default-content-wrapper">
            <p><a href="/"><picture><img src="/logo.png" alt="Logo"></picture></a></p>
          </div>
        </div>
        <div class="section navbar-top">
          <div class="default-content-wrapper"><ul><li><a href="/en">English</a></li></ul></div>
        </div>
        <div class="section navbar-main" data-menu-border-colors="orange,teal">
          <div class="default-content-wrapper">
            <ul>
              <li><a href="/a">A</a></li>
              <li>B<ul><li><a href="/b1">B1</a></li></ul></li>
            </ul>
          </div>
        </div>"#;

    fn model(markup: &str, options: &AssemblyOptions) -> MenuModel {
        assemble(&read_fragment(markup).unwrap(), options)
    }

    #[test]
    fn assembles_every_role() {
        let model = model(FRAGMENT, &AssemblyOptions::default());
        assert_eq!(model.brand.url, "/");
        assert_eq!(
            model.brand.icon.as_ref().map(Icon::markup),
            Some(r#"<img alt="Logo" src="/logo.png">"#)
        );
        assert_eq!(model.top_bar, [MenuEntry::new("English").with_link("/en")]);
        assert_eq!(model.main_bar.len(), 2);
        assert_eq!(model.sections().collect::<Vec<_>>(), [SectionId(1)]);
        assert!(model.section(SectionId(0)).is_none());
        assert_eq!(model.section(SectionId(1)).unwrap().entry.text, "B");
    }

    #[test]
    fn metadata_is_passed_through() {
        let model = model(FRAGMENT, &AssemblyOptions::default());
        assert_eq!(
            model.metadata(Role::Brand).and_then(|m| m.get("theme")),
            Some(&"light".to_owned())
        );
        assert_eq!(
            model
                .metadata(Role::MainBar)
                .and_then(|m| m.get("menuBorderColors")),
            Some(&"orange,teal".to_owned())
        );
        assert!(model.metadata(Role::TopBar).unwrap().is_empty());
    }

    #[test]
    fn accents_are_positional() {
        let markup = r#"<div class="navbar-main" data-menu-border-colors=" red ,blue,, green">
            <ul><li>One</li><li>Two</li><li>Three</li></ul></div>"#;
        let model = model(markup, &AssemblyOptions::default());
        let accents: Vec<_> = model
            .main_bar
            .iter()
            .map(|e| e.accent.as_ref().map(Accent::as_str))
            .collect();
        assert_eq!(accents, [Some("red"), Some("blue"), Some("green")]);
        let texts: Vec<_> = model.main_bar.iter().map(|e| e.entry.text.as_str()).collect();
        assert_eq!(texts, ["One", "Two", "Three"]);
    }

    #[test]
    fn accent_fallbacks() {
        let accents = Accent::parse_list("red,blue");
        let cycle = AccentFallback::Cycle;
        assert_eq!(cycle.accent_for(&accents, 2), Some(Accent::new("red")));
        assert_eq!(cycle.accent_for(&accents, 3), Some(Accent::new("blue")));
        assert_eq!(AccentFallback::None.accent_for(&accents, 2), None);
        let fixed = AccentFallback::Default(Accent::new("primary"));
        assert_eq!(fixed.accent_for(&accents, 5), Some(Accent::new("primary")));
        assert_eq!(fixed.accent_for(&[], 0), None);
    }

    #[test]
    fn missing_roles_degrade_to_empty_fields() {
        let model = model(
            r#"<div class="navbar-brand"><p>No link here</p></div>"#,
            &AssemblyOptions::default(),
        );
        assert_eq!(model.brand, Brand::default());
        assert!(model.top_bar.is_empty());
        assert!(model.main_bar.is_empty());
        assert_eq!(model.section_metadata.len(), 1);
    }

    #[test]
    fn sections_are_found_through_wrappers() {
        let wrapped = format!("<main>{FRAGMENT}</main>");
        let model = model(&wrapped, &AssemblyOptions::default());
        assert_eq!(model.main_bar.len(), 2);
        assert_eq!(model.brand.url, "/");
    }

    #[test]
    fn links_resolve_but_brand_url_stays_raw() {
        let options = AssemblyOptions {
            base: Some(Url::parse("https://example.com/").unwrap()),
            ..AssemblyOptions::default()
        };
        let model = model(FRAGMENT, &options);
        assert_eq!(model.brand.url, "/");
        assert_eq!(
            model.main_bar[0].entry.link.as_deref(),
            Some("https://example.com/a")
        );
    }

    #[test]
    fn model_serializes_with_flattened_entries() {
        let model = model(FRAGMENT, &AssemblyOptions::default());
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["main_bar"][0]["text"], "A");
        assert_eq!(json["main_bar"][0]["accent"], "orange");
        assert_eq!(json["section_metadata"]["brand"]["theme"], "light");
    }
}
