//! Markup for one row of the control's result list.

use geoplaces_core::Position;

use crate::features::{Feature, Suggestion};

const PLACE_ICON: &str = r##"<svg class="mlg-icon" viewBox="0 0 24 32" xmlns="http://www.w3.org/2000/svg"><path d="M7.21875,20.96875 C7.21875,21.5402344 6.75898437,22 6.1875,22 C5.61601562,22 5.15625,21.5402344 5.15625,20.96875 L5.15625,12.2890625 C2.23007813,11.7992188 0,9.25546875 0,6.1875 C0,2.77019531 2.77019531,0 6.1875,0 C9.60351562,0 12.375,2.77019531 12.375,6.1875 C12.375,9.25546875 10.1449219,11.7992188 7.21875,12.2890625 L7.21875,20.96875 Z M6.1875,2.0625 C3.87148437,2.0625 2.0625,3.90929687 2.0625,6.1875 C2.0625,8.46484375 3.87148437,10.3125 6.1875,10.3125 C8.46484375,10.3125 10.3125,8.46484375 10.3125,6.1875 C10.3125,3.90929687 8.46484375,2.0625 6.1875,2.0625 Z" fill="#687078"/></svg>"##;

const SEARCH_ICON: &str = r##"<svg class="mlg-icon" viewBox="0 0 24 32" fill="none" xmlns="http://www.w3.org/2000/svg"><path d="M2,8 C2,4.691 4.691,2 8,2 C11.309,2 14,4.691 14,8 C14,11.309 11.309,14 8,14 C4.691,14 2,11.309 2,8 M17.707,16.293 L14.312,12.897 C15.365,11.543 16,9.846 16,8 C16,3.589 12.411,0 8,0 C3.589,0 0,3.589 0,8 C0,12.411 3.589,16 8,16 C9.846,16 11.543,15.365 12.897,14.312 L16.293,17.707 C16.488,17.902 16.744,18 17,18 C17.256,18 17.512,17.902 17.707,17.707 C18.098,17.316 18.098,16.684 17.707,16.293" fill="#687078"/></svg>"##;

/// Second line shown when a result has no address part.
pub const SEARCH_NEARBY: &str = "Search Nearby";

/// What the renderer needs from a feature or a suggestion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem<'a> {
    pub geometry: Option<Position>,
    pub place_id: Option<&'a str>,
    pub text: &'a str,
}

impl<'a> RenderItem<'a> {
    /// A bare query with no place behind it.
    #[must_use]
    pub const fn text(text: &'a str) -> Self {
        Self {
            geometry: None,
            place_id: None,
            text,
        }
    }

    /// Whether the item stands for a concrete place rather than a query.
    #[must_use]
    pub fn is_place(&self) -> bool {
        self.geometry.is_some() || self.place_id.is_some_and(|id| !id.is_empty())
    }
}

impl<'a> From<&'a Feature> for RenderItem<'a> {
    fn from(feature: &'a Feature) -> Self {
        Self {
            geometry: Some(feature.coordinates()),
            place_id: feature.id.as_deref(),
            text: &feature.place_name,
        }
    }
}

impl<'a> From<&'a Suggestion> for RenderItem<'a> {
    fn from(suggestion: &'a Suggestion) -> Self {
        Self {
            geometry: suggestion.position(),
            place_id: suggestion.place_id(),
            text: &suggestion.text,
        }
    }
}

/// Signature of the control's result renderer.
pub type RenderFn = fn(&RenderItem<'_>) -> String;

/// Splits a label on its first comma into a title and an address line.
/// The address is `None` when nothing but whitespace follows the comma.
#[must_use]
pub fn split_label(text: &str) -> (&str, Option<&str>) {
    match text.split_once(',') {
        Some((title, rest)) => {
            let rest = rest.trim();
            (title, (!rest.is_empty()).then_some(rest))
        }
        None => (text, None),
    }
}

#[must_use]
pub fn render_item(item: &RenderItem<'_>) -> String {
    let (title, address) = split_label(item.text);
    let icon = if item.is_place() { PLACE_ICON } else { SEARCH_ICON };
    format!(
        concat!(
            r#"<div class="mlg-option-container">{icon}"#,
            r#"<div class="mlg-option-details">"#,
            r#"<div class="mlg-place-name">{title}</div>"#,
            r#"<div class="mlg-address">{address}</div>"#,
            "</div></div>"
        ),
        icon = icon,
        title = escape_html(title),
        address = escape_html(address.unwrap_or(SEARCH_NEARBY)),
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
