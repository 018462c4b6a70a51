//! In-page anchor navigation and the mobile navigation overlay.
//!
//! The controller is bound to a rendered [`MenuView`] and drives a
//! [`ScrollSurface`], which the hosting UI implements.

use std::collections::HashSet;

use super::view::MenuView;

/// Space left between the fixed header and a scrolled-to section.
pub const ANCHOR_GAP: f64 = 20.0;

/// The scrollable page as seen by the navigation controller.
pub trait ScrollSurface {
    /// Top of the element with `id`, in page coordinates.
    fn element_top(&self, id: &str) -> Option<f64>;
    fn header_height(&self) -> f64;
    fn smooth_scroll_to(&mut self, top: f64);
    /// Stops page scrolling while the overlay covers it.
    fn lock_scroll(&mut self, locked: bool);
}

/// Scroll position that puts `element_top` just below the fixed header.
pub fn scroll_offset(element_top: f64, header_height: f64, gap: f64) -> f64 {
    (element_top - header_height - gap).max(0.0)
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnchorClick {
    Scrolled { target: String, offset: f64 },
    Ignored,
}

#[derive(Debug, Clone)]
pub struct NavigationController {
    anchors: HashSet<String>,
    overlay_open: bool,
    gap: f64,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self {
            anchors: HashSet::new(),
            overlay_open: false,
            gap: ANCHOR_GAP,
        }
    }
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-binds to the links of a freshly rendered view.
    pub fn bind(&mut self, view: &MenuView) {
        self.anchors = view
            .primary_nav
            .iter()
            .chain(view.mobile_nav.iter())
            .map(|entry| entry.href.clone())
            .collect();
    }

    pub fn is_bound(&self, href: &str) -> bool {
        self.anchors.contains(href)
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    pub fn open_overlay(&mut self, surface: &mut impl ScrollSurface) {
        self.overlay_open = true;
        surface.lock_scroll(true);
    }

    pub fn close_overlay(&mut self, surface: &mut impl ScrollSurface) {
        self.overlay_open = false;
        surface.lock_scroll(false);
    }

    /// Handles a click on any in-page `#id` link, not only the bound
    /// navigation entries: closes the overlay if open, then smooth-scrolls
    /// the target just below the header. Other links and missing targets
    /// are ignored.
    pub fn click_anchor(&mut self, href: &str, surface: &mut impl ScrollSurface) -> AnchorClick {
        let Some(target) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return AnchorClick::Ignored;
        };
        let Some(element_top) = surface.element_top(target) else {
            return AnchorClick::Ignored;
        };

        if self.overlay_open {
            self.close_overlay(surface);
        }

        let offset = scroll_offset(element_top, surface.header_height(), self.gap);
        surface.smooth_scroll_to(offset);
        AnchorClick::Scrolled {
            target: target.to_string(),
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Item, Language, LocalizedText, MenuDocument};
    use crate::render::render;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakePage {
        tops: HashMap<String, f64>,
        header: f64,
        scrolled_to: Vec<f64>,
        locked: bool,
    }

    impl ScrollSurface for FakePage {
        fn element_top(&self, id: &str) -> Option<f64> {
            self.tops.get(id).copied()
        }

        fn header_height(&self) -> f64 {
            self.header
        }

        fn smooth_scroll_to(&mut self, top: f64) {
            self.scrolled_to.push(top);
        }

        fn lock_scroll(&mut self, locked: bool) {
            self.locked = locked;
        }
    }

    fn bound_controller() -> NavigationController {
        let doc = MenuDocument::new(vec![Category::new("soups", LocalizedText::new("Suppen"))
            .with_items(vec![Item::new(LocalizedText::new("Pho"), "9")])]);
        let mut controller = NavigationController::new();
        controller.bind(&render(&doc, Language::De, &[Language::De]));
        controller
    }

    fn page() -> FakePage {
        FakePage {
            tops: HashMap::from([("soups".to_string(), 900.0)]),
            header: 80.0,
            ..FakePage::default()
        }
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(900.0, 80.0, ANCHOR_GAP), 800.0);
        assert_eq!(scroll_offset(50.0, 80.0, ANCHOR_GAP), 0.0);
    }

    #[test]
    fn test_click_scrolls_below_header() {
        let mut controller = bound_controller();
        let mut page = page();

        let click = controller.click_anchor("#soups", &mut page);
        assert_eq!(
            click,
            AnchorClick::Scrolled {
                target: "soups".into(),
                offset: 800.0
            }
        );
        assert_eq!(page.scrolled_to, vec![800.0]);
    }

    #[test]
    fn test_click_closes_open_overlay_first() {
        let mut controller = bound_controller();
        let mut page = page();

        controller.open_overlay(&mut page);
        assert!(controller.overlay_open());
        assert!(page.locked);

        controller.click_anchor("#soups", &mut page);
        assert!(!controller.overlay_open());
        assert!(!page.locked);
    }

    #[test]
    fn test_click_on_unbound_in_page_anchor_scrolls() {
        let mut controller = bound_controller();
        let mut page = page();
        page.tops.insert("top".into(), 0.0);
        assert!(!controller.is_bound("#top"));

        controller.open_overlay(&mut page);
        let click = controller.click_anchor("#top", &mut page);
        assert_eq!(
            click,
            AnchorClick::Scrolled {
                target: "top".into(),
                offset: 0.0
            }
        );
        assert!(!controller.overlay_open());
    }

    #[test]
    fn test_unknown_or_missing_targets_ignored() {
        let mut controller = bound_controller();
        let mut page = page();
        controller.open_overlay(&mut page);

        assert_eq!(controller.click_anchor("#desserts", &mut page), AnchorClick::Ignored);
        assert_eq!(controller.click_anchor("#", &mut page), AnchorClick::Ignored);
        assert_eq!(controller.click_anchor("?lang=en", &mut page), AnchorClick::Ignored);

        page.tops.clear();
        assert_eq!(controller.click_anchor("#soups", &mut page), AnchorClick::Ignored);
        assert!(page.scrolled_to.is_empty());
        assert!(controller.overlay_open());
    }
}
