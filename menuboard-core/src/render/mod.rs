//! Public menu rendering.
//!
//! [`render`] turns a document into a [`MenuView`]; [`Renderer`] wraps it
//! with loading, the remembered language, active-section tracking and
//! anchor navigation.

mod navigation;
mod renderer;
mod tracking;
mod view;

pub use navigation::{scroll_offset, AnchorClick, NavigationController, ScrollSurface, ANCHOR_GAP};
pub use renderer::{LoadState, Renderer, RendererOptions};
pub use tracking::{ActiveBand, ActiveSectionTracker, IntersectionEntry, SectionBounds};
pub use view::{
    render, ItemView, LanguageOption, MenuView, NavEntry, SectionView, LOAD_FAILED_MESSAGE,
};
