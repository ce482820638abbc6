// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The decoration pipeline and the live navigation.

use kurbo::Size;
use tracing::{debug, info, warn};
use trellis_content::{ContentLoader, read_fragment};
use trellis_disclosure::{Disclosure, DisclosureState, EffectSink, Effects, Input};
use trellis_menu::{MenuModel, assemble};
use trellis_viewport::{ViewportModeSignal, WidthSignal};

use crate::compose::compose;
use crate::config::{HeaderConfig, nav_path};
use crate::sheet::AttributeSheet;

/// Load, parse, and assemble the navigation named by the page's `nav`
/// metadata.
///
/// Returns `None`, after logging why, if the fragment cannot be loaded or
/// read; the header is then left undecorated. There is no retry.
pub async fn decorate<L: ContentLoader>(
    loader: &L,
    nav_meta: Option<&str>,
    config: &HeaderConfig,
) -> Option<Header> {
    let path = nav_path(nav_meta, &config.default_nav_path);
    let markup = match loader.load(&path).await {
        Ok(markup) => markup,
        Err(err) => {
            warn!(%err, "navigation fragment unavailable, header left undecorated");
            return None;
        }
    };
    let fragment = match read_fragment(&markup) {
        Ok(fragment) => fragment,
        Err(err) => {
            warn!(%path, %err, "navigation fragment unreadable, header left undecorated");
            return None;
        }
    };
    let model = assemble(&fragment, &config.assembly_options());
    info!(%path, entries = model.main_bar.len(), "header decorated");
    Some(Header::new(model, config.clone()))
}

/// A decorated header: the immutable menu model and its configuration.
#[derive(Clone, Debug)]
pub struct Header {
    model: MenuModel,
    config: HeaderConfig,
}

impl Header {
    /// Pair a model with the configuration it is presented under.
    pub fn new(model: MenuModel, config: HeaderConfig) -> Self {
        Self { model, config }
    }

    /// The menu model.
    pub fn model(&self) -> &MenuModel {
        &self.model
    }

    /// The configuration.
    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    /// Start the interactive navigation, driven by `signal`.
    pub fn navigation<S: ViewportModeSignal>(&self, signal: S) -> Navigation<S> {
        Navigation::new(&self.model, &self.config, signal)
    }

    /// Start the interactive navigation for a viewport of `size`, classified
    /// with the configured breakpoint.
    pub fn navigation_for_size(&self, size: Size) -> Navigation<WidthSignal> {
        self.navigation(WidthSignal::new(self.config.breakpoint(), size))
    }

    /// Markup for the navigation in its current state.
    pub fn render<S: ViewportModeSignal>(&self, navigation: &Navigation<S>) -> String {
        compose(&self.model, navigation.sheet())
    }
}

/// A live navigation: disclosure machine plus the attributes it drives.
pub struct Navigation<S: ViewportModeSignal> {
    disclosure: Disclosure<S>,
    sheet: AttributeSheet,
}

impl<S: ViewportModeSignal> core::fmt::Debug for Navigation<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Navigation")
            .field("disclosure", &self.disclosure)
            .field("sheet", &self.sheet)
            .finish()
    }
}

impl<S: ViewportModeSignal> Navigation<S> {
    /// Create the navigation for `model`, with the initial attribute sync
    /// already applied.
    pub fn new(model: &MenuModel, config: &HeaderConfig, signal: S) -> Self {
        let disclosure = Disclosure::new(signal, model.sections());
        let mut sheet = AttributeSheet::new(config.labels.clone());
        sheet.apply_all(&disclosure.initial_effects());
        debug!(
            sections = disclosure.state().sections().len(),
            mode = ?disclosure.state().mode(),
            "navigation started"
        );
        Self { disclosure, sheet }
    }

    /// Run one input through the disclosure machine and apply its effects.
    pub fn dispatch(&mut self, input: Input) -> Effects {
        let effects = self.disclosure.handle(input);
        self.sheet.apply_all(&effects);
        effects
    }

    /// Current presentation attributes.
    pub fn sheet(&self) -> &AttributeSheet {
        &self.sheet
    }

    /// Current disclosure state.
    pub fn state(&self) -> &DisclosureState {
        self.disclosure.state()
    }

    /// The mode signal.
    pub fn signal(&self) -> &S {
        self.disclosure.signal()
    }
}

impl Navigation<WidthSignal> {
    /// Report a viewport size; a mode transition is dispatched as
    /// [`Input::ModeChanged`].
    pub fn resize(&mut self, size: Size) -> Effects {
        match self.disclosure.signal_mut().resize(size) {
            Some(mode) => self.dispatch(Input::ModeChanged(mode)),
            None => Effects::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_content::{LoadError, MemoryLoader};
    use trellis_disclosure::{Effect, FocusTarget, Key, SectionId, ViewportMode};
    use trellis_menu::AssemblyOptions;

    const NAV: &str = r#"
        <div class="section navbar-brand"><p><a href="/"><img src="/logo.png"></a></p></div>
        <div class="section navbar-main" data-menu-border-colors="orange,teal">
          <ul>
            <li><a href="/a">A</a></li>
            <li>B<ul><li><a href="/b1">B1</a></li></ul></li>
            <li>C<ul><li><a href="/c1">C1</a></li></ul></li>
          </ul>
        </div>"#;

    struct Failing;

    impl ContentLoader for Failing {
        async fn load(&self, path: &str) -> Result<String, LoadError> {
            Err(LoadError::Transport {
                path: path.to_owned(),
                message: "connection reset".to_owned(),
            })
        }
    }

    #[tokio::test]
    async fn decorate_uses_the_nav_metadata_path() {
        let loader = MemoryLoader::new().with("/en/nav", NAV);
        let meta = Some("https://example.com/en/nav");
        let header = decorate(&loader, meta, &HeaderConfig::default()).await.unwrap();
        assert_eq!(header.model().main_bar.len(), 3);

        let missing = decorate(&loader, None, &HeaderConfig::default()).await;
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn transport_failures_leave_the_header_undecorated() {
        assert!(decorate(&Failing, None, &HeaderConfig::default()).await.is_none());
    }

    #[tokio::test]
    async fn navigation_drives_the_sheet() {
        let loader = MemoryLoader::new().with("/nav", NAV);
        let header = decorate(&loader, None, &HeaderConfig::default()).await.unwrap();

        let mut nav = header.navigation(ViewportMode::Desktop);
        assert_eq!(
            nav.sheet().section_attributes(SectionId(1)),
            [
                ("aria-expanded", "false".to_owned()),
                ("role", "button".to_owned()),
                ("tabindex", "0".to_owned()),
            ]
        );

        nav.dispatch(Input::ToggleSection(SectionId(1)));
        nav.dispatch(Input::ToggleSection(SectionId(2)));
        assert!(!nav.sheet().section(SectionId(1)).expanded);
        assert!(nav.sheet().section(SectionId(2)).expanded);
        assert!(nav.sheet().escape_listener());

        nav.dispatch(Input::Key(Key::Escape));
        assert!(!nav.sheet().section(SectionId(2)).expanded);
        assert_eq!(nav.sheet().focus(), Some(FocusTarget::Section(SectionId(2))));
    }

    #[test]
    fn resize_dispatches_mode_transitions() {
        let header = Header::new(
            assemble(&read_fragment(NAV).unwrap(), &AssemblyOptions::default()),
            HeaderConfig::default(),
        );
        let mut nav = header.navigation_for_size(Size::new(375.0, 800.0));
        nav.dispatch(Input::ToggleRoot);
        assert!(nav.sheet().scroll_locked());
        assert_eq!(nav.sheet().hamburger_attributes()[1].1, "Close navigation");

        assert!(nav.resize(Size::new(600.0, 800.0)).is_empty());
        let fx = nav.resize(Size::new(1280.0, 800.0));
        assert!(fx.contains(&Effect::RootExpanded(false)));
        assert!(!nav.sheet().scroll_locked());
        assert_eq!(nav.sheet().hamburger_attributes()[1].1, "Open navigation");
        assert!(header.render(&nav).contains("tabindex=\"0\""));
    }
}
