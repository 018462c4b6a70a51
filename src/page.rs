//! Server-side HTML for the public menu page.

use maud::{html, Markup, PreEscaped, DOCTYPE};
use menuboard_core::render::{ActiveBand, ItemView, MenuView, NavEntry, SectionView, ANCHOR_GAP};
use menuboard_core::Settings;

const CSS: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; background: var(--bg-primary); color: var(--text-primary); font-family: var(--font-body); }
h1, h2 { font-family: var(--font-heading); }
.site-header { position: sticky; top: 0; z-index: 10; background: var(--bg-header); padding: 0.75rem 1rem; display: flex; align-items: center; gap: 1rem; flex-wrap: wrap; }
.site-header h1 { margin: 0; font-size: 1.4rem; }
.tagline { color: var(--text-secondary); font-size: 0.9rem; }
.primary-nav ul, .mobile-nav ul { list-style: none; margin: 0; padding: 0; }
.primary-nav ul { display: flex; gap: 1rem; }
.primary-nav a, .mobile-nav a { color: var(--text-secondary); text-decoration: none; }
a.active { color: var(--accent-pink); }
.languages { margin-left: auto; display: flex; gap: 0.5rem; }
.languages a { color: var(--text-secondary); text-decoration: none; text-transform: uppercase; }
.languages a.selected { color: var(--accent-teal); font-weight: bold; }
.nav-toggle { display: none; }
.nav-hamburger { display: none; cursor: pointer; font-size: 1.5rem; }
.mobile-nav { display: none; position: fixed; inset: 0; z-index: 20; background: var(--bg-header); padding: 2rem; }
.mobile-nav li { margin: 1rem 0; font-size: 1.3rem; }
.nav-toggle:checked ~ .mobile-nav { display: block; }
body:has(.nav-toggle:checked) { overflow: hidden; }
main { max-width: 48rem; margin: 0 auto; padding: 1rem; }
.item { display: flex; justify-content: space-between; gap: 1rem; padding: 0.5rem 0; border-bottom: 1px solid var(--bg-header); }
.item .price { color: var(--accent-teal); white-space: nowrap; }
.item .desc { margin: 0.25rem 0 0; color: var(--text-secondary); font-size: 0.9rem; }
.load-error { text-align: center; color: var(--accent-pink); }
footer { text-align: center; color: var(--text-secondary); padding: 2rem 1rem; }
@media (max-width: 640px) {
  .primary-nav { display: none; }
  .nav-hamburger { display: block; }
}
"#;

// In-page links scroll to just below the sticky header and close the mobile
// overlay. The section inside the active band marks its nav entries active.
// __GAP__ and __ROOT_MARGIN__ are filled in by `nav_script`.
const NAV_SCRIPT: &str = r##"
(function () {
  var gap = __GAP__;
  var toggle = document.getElementById('nav-toggle');
  var header = document.querySelector('.site-header');
  var navLinks = document.querySelectorAll('.primary-nav a, .mobile-nav a');

  document.querySelectorAll('a[href^="#"]').forEach(function (link) {
    link.addEventListener('click', function (event) {
      var id = link.getAttribute('href').slice(1);
      var target = id && document.getElementById(id);
      if (!target) return;
      event.preventDefault();
      if (toggle && toggle.checked) toggle.checked = false;
      var top = target.getBoundingClientRect().top + window.pageYOffset
        - (header ? header.offsetHeight : 0) - gap;
      window.scrollTo({ top: Math.max(top, 0), behavior: 'smooth' });
    });
  });

  if (!('IntersectionObserver' in window)) return;
  var observer = new IntersectionObserver(function (entries) {
    entries.forEach(function (entry) {
      if (!entry.isIntersecting) return;
      var href = '#' + entry.target.id;
      navLinks.forEach(function (link) {
        link.classList.toggle('active', link.getAttribute('href') === href);
      });
    });
  }, { rootMargin: '__ROOT_MARGIN__', threshold: 0 });
  document.querySelectorAll('main section[id]').forEach(function (section) {
    observer.observe(section);
  });
})();
"##;

fn nav_script(band: ActiveBand, gap: f64) -> String {
    NAV_SCRIPT
        .replace("__GAP__", &gap.to_string())
        .replace("__ROOT_MARGIN__", &band.root_margin())
}

/// Renders the complete public page for `view`.
pub fn render_page(settings: &Settings, view: &MenuView) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(view.language.code()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if !settings.meta_description.is_empty() {
                    meta name="description" content=(settings.meta_description);
                }
                title { (settings.page_title()) }
                style { (PreEscaped(settings.theme.root_css())) (PreEscaped(CSS)) }
            }
            body {
                input.nav-toggle type="checkbox" id="nav-toggle";
                (site_header(settings, view))
                (mobile_nav(&view.mobile_nav))
                main {
                    @if let Some(message) = &view.message {
                        p.load-error { (message) }
                    }
                    @for section in &view.sections {
                        (menu_section(section))
                    }
                }
                @if !settings.footer_text.is_empty() {
                    footer { (settings.footer_text) }
                }
                script { (PreEscaped(nav_script(ActiveBand::default(), ANCHOR_GAP))) }
            }
        }
    }
}

fn site_header(settings: &Settings, view: &MenuView) -> Markup {
    html! {
        header.site-header {
            div.brand {
                h1 { (settings.restaurant_name) }
                @if !settings.tagline.is_empty() {
                    span.tagline { (settings.tagline) }
                }
            }
            nav.primary-nav {
                (nav_list(&view.primary_nav))
            }
            div.languages {
                @for option in &view.languages {
                    a href={ "?lang=" (option.language.code()) }
                        class=[option.selected.then_some("selected")] {
                        (option.language.code())
                    }
                }
            }
            label.nav-hamburger for="nav-toggle" { "☰" }
        }
    }
}

fn mobile_nav(entries: &[NavEntry]) -> Markup {
    html! {
        div.mobile-nav {
            label.nav-close for="nav-toggle" { "×" }
            (nav_list(entries))
        }
    }
}

fn nav_list(entries: &[NavEntry]) -> Markup {
    html! {
        ul {
            @for entry in entries {
                li {
                    a href=(entry.href) class=[entry.active.then_some("active")] { (entry.label) }
                }
            }
        }
    }
}

fn menu_section(section: &SectionView) -> Markup {
    html! {
        section id=(section.id) {
            h2 { (section.title) }
            @for item in &section.items {
                (menu_item(item))
            }
        }
    }
}

fn menu_item(item: &ItemView) -> Markup {
    html! {
        div.item {
            div {
                span.name { (item.name) }
                @if let Some(desc) = &item.description {
                    p.desc { (desc) }
                }
            }
            span.price { (item.price) }
        }
    }
}
