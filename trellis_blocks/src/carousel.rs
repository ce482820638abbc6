// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-axis, wrap-around slide carousel.

use tracing::{debug, warn};
use trellis_content::{Element, escape_text};

/// A carousel built from an authored block.
///
/// The block's first row is the "next" control label, its last row the
/// "previous" control label, and every row in between is a slide.
///
/// ```rust
/// use trellis_blocks::Carousel;
/// use trellis_content::read_fragment;
///
/// let block = read_fragment(
///     "<div><div>Next</div><div><div>1</div></div><div><div>2</div></div><div>Back</div></div>",
/// )
/// .unwrap();
/// let mut carousel = Carousel::from_block(block.child_elements().next().unwrap());
///
/// assert_eq!(carousel.len(), 2);
/// assert_eq!(carousel.next_slide(), 1);
/// assert_eq!(carousel.next_slide(), 0);
/// assert_eq!(carousel.prev_slide(), 1);
/// assert_eq!(carousel.offsets().collect::<Vec<_>>(), [-100.0, 0.0]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Carousel {
    next_label: String,
    prev_label: String,
    slides: Vec<Element>,
    current: usize,
}

impl Carousel {
    /// A carousel over already-built slides, showing the first.
    pub fn new(
        next_label: impl Into<String>,
        prev_label: impl Into<String>,
        slides: Vec<Element>,
    ) -> Self {
        Self {
            next_label: next_label.into(),
            prev_label: prev_label.into(),
            slides,
            current: 0,
        }
    }

    /// Build from an authored block.
    ///
    /// Slide rows gain the `slide` class, and their second column the
    /// `slide-text` class. A block with fewer than three rows has no slides.
    pub fn from_block(block: &Element) -> Self {
        let rows: Vec<&Element> = block.child_elements().collect();
        let label = |row: Option<&&Element>| {
            row.map(|row| row.text_content().trim().to_owned())
                .unwrap_or_default()
        };
        let next_label = label(rows.first());
        let prev_label = if rows.len() > 1 {
            label(rows.last())
        } else {
            String::new()
        };
        let slides: Vec<Element> = rows
            .get(1..rows.len().saturating_sub(1))
            .unwrap_or_default()
            .iter()
            .map(|row| {
                let mut slide = (*row).clone();
                slide.add_class("slide");
                if let Some(text) = slide.child_elements_mut().nth(1) {
                    text.add_class("slide-text");
                }
                slide
            })
            .collect();
        if slides.is_empty() {
            warn!(rows = rows.len(), "carousel block has no slides");
        }
        Self::new(next_label, prev_label, slides)
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether there are no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the visible slide.
    pub fn current(&self) -> usize {
        self.current
    }

    /// The slides, in order.
    pub fn slides(&self) -> &[Element] {
        &self.slides
    }

    /// Label of the "next" control.
    pub fn next_label(&self) -> &str {
        &self.next_label
    }

    /// Label of the "previous" control.
    pub fn prev_label(&self) -> &str {
        &self.prev_label
    }

    /// Advance one slide, wrapping from the last to the first.
    pub fn next_slide(&mut self) -> usize {
        if !self.is_empty() {
            self.current = if self.current + 1 >= self.len() {
                0
            } else {
                self.current + 1
            };
            debug!(current = self.current, "carousel advanced");
        }
        self.current
    }

    /// Go back one slide, wrapping from the first to the last.
    pub fn prev_slide(&mut self) -> usize {
        if !self.is_empty() {
            self.current = match self.current {
                0 => self.len() - 1,
                n => n - 1,
            };
            debug!(current = self.current, "carousel went back");
        }
        self.current
    }

    /// Horizontal translation of each slide in percent of its width:
    /// `100 × (index − current)`.
    pub fn offsets(&self) -> impl Iterator<Item = f64> + '_ {
        let current = self.current as f64;
        (0..self.slides.len()).map(move |index| 100.0 * (index as f64 - current))
    }

    /// Markup for the carousel in its current position.
    pub fn render(&self) -> String {
        let mut out = String::from("<button class=\"btn btn-next\">");
        out.push_str(&escape_text(&self.next_label));
        out.push_str("</button>");
        for (slide, offset) in self.slides.iter().zip(self.offsets()) {
            let mut slide = slide.clone();
            slide.set_attr("style", format!("transform: translateX({offset}%)"));
            out.push_str(&slide.outer_markup());
        }
        out.push_str("<button class=\"btn btn-prev\">");
        out.push_str(&escape_text(&self.prev_label));
        out.push_str("</button>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_content::read_fragment;

    fn block(rows: usize) -> Element {
        let mut markup = String::from("<div><div>Next</div>");
        for i in 0..rows {
            markup.push_str(&format!(
                "<div><div><img src=\"{i}.png\"></div><div>Slide {i}</div></div>"
            ));
        }
        markup.push_str("<div>Previous</div></div>");
        read_fragment(&markup).unwrap().child_elements().next().unwrap().clone()
    }

    #[test]
    fn rows_become_labels_and_slides() {
        let carousel = Carousel::from_block(&block(3));
        assert_eq!(carousel.next_label(), "Next");
        assert_eq!(carousel.prev_label(), "Previous");
        assert_eq!(carousel.len(), 3);
        let slide = &carousel.slides()[1];
        assert!(slide.has_class("slide"));
        let text = slide.child_elements().nth(1).unwrap();
        assert!(text.has_class("slide-text"));
        assert_eq!(text.text_content(), "Slide 1");
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut carousel = Carousel::from_block(&block(3));
        assert_eq!(carousel.prev_slide(), 2);
        assert_eq!(carousel.next_slide(), 0);
        assert_eq!(carousel.next_slide(), 1);
        assert_eq!(carousel.next_slide(), 2);
        assert_eq!(carousel.next_slide(), 0);
    }

    #[test]
    fn offsets_translate_relative_to_current() {
        let mut carousel = Carousel::from_block(&block(3));
        assert_eq!(carousel.offsets().collect::<Vec<_>>(), [0.0, 100.0, 200.0]);
        carousel.next_slide();
        assert_eq!(carousel.offsets().collect::<Vec<_>>(), [-100.0, 0.0, 100.0]);
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut carousel = Carousel::from_block(&block(0));
        assert!(carousel.is_empty());
        assert_eq!(carousel.next_slide(), 0);
        assert_eq!(carousel.prev_slide(), 0);
        assert_eq!(carousel.offsets().count(), 0);

        let single = read_fragment("<div><div>Only</div></div>").unwrap();
        let carousel = Carousel::from_block(single.child_elements().next().unwrap());
        assert_eq!(carousel.next_label(), "Only");
        assert_eq!(carousel.prev_label(), "");
    }

    #[test]
    fn render_positions_slides() {
        let mut carousel = Carousel::from_block(&block(2));
        carousel.next_slide();
        let html = carousel.render();
        assert!(html.starts_with("<button class=\"btn btn-next\">Next</button>"));
        assert!(html.contains("style=\"transform: translateX(-100%)\""));
        assert!(html.contains("style=\"transform: translateX(0%)\""));
        assert!(html.ends_with("<button class=\"btn btn-prev\">Previous</button>"));
    }
}
