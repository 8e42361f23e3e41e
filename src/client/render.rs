//! Turns an event list into the card grid and map markers of a community
//! page. Rendering is a pure function; callers replace their previous
//! output wholesale.

use super::auth::{Action, Authorizer, Role};
use crate::models::Event;

const PLACEHOLDER_IMAGE: &str = "images/placeholder.jpeg";

/// Image shown for a community's events when none was given or the given
/// one fails to load.
pub fn default_image(topluluk: &str) -> String {
    if topluluk.trim().is_empty() {
        PLACEHOLDER_IMAGE.to_string()
    } else {
        format!("images/{}logo.jpeg", topluluk)
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub event_id: i64,
    pub name: String,
    pub image_url: String,
    pub fallback_image: String,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Card {
    pub fn to_html(&self) -> String {
        let mut controls = String::new();
        if self.can_delete {
            controls.push_str(&format!(
                r#"<button class="btn btn-delete" data-action="delete" data-id="{}">Delete</button>"#,
                self.event_id
            ));
        }
        if self.can_edit {
            controls.push_str(&format!(
                r#"<button class="btn btn-edit" data-action="edit" data-id="{}" data-name="{}">Edit</button>"#,
                self.event_id,
                escape_html(&self.name)
            ));
        }

        format!(
            r#"<div class="event-card"><img src="{src}" data-fallback="{fallback}" onerror="this.onerror=null;this.src=this.dataset.fallback"><div class="event-info"><h3>{name}</h3><div class="event-actions">{controls}</div></div></div>"#,
            src = escape_html(&self.image_url),
            fallback = escape_html(&self.fallback_image),
            name = escape_html(&self.name),
            controls = controls,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub event_id: i64,
    pub lat: f64,
    pub lng: f64,
    pub popup_html: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedEvents {
    pub cards: Vec<Card>,
    pub markers: Vec<Marker>,
}

impl RenderedEvents {
    pub fn cards_html(&self) -> String {
        self.cards.iter().map(Card::to_html).collect()
    }
}

pub fn render(
    events: &[Event],
    topluluk: &str,
    role: Role,
    authorizer: &dyn Authorizer,
) -> RenderedEvents {
    let fallback_image = default_image(topluluk);
    let can_edit = authorizer.allows(role, Action::EditEvent);
    let can_delete = authorizer.allows(role, Action::DeleteEvent);

    let cards = events
        .iter()
        .map(|event| Card {
            event_id: event.id,
            name: event.etkinlik_name.clone(),
            image_url: event
                .image_url
                .clone()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| fallback_image.clone()),
            fallback_image: fallback_image.clone(),
            can_edit,
            can_delete,
        })
        .collect();

    let markers = events
        .iter()
        .filter_map(|event| match (event.lat, event.lng) {
            (Some(lat), Some(lng)) => Some(Marker {
                event_id: event.id,
                lat,
                lng,
                popup_html: format!("<b>{}</b>", escape_html(&event.etkinlik_name)),
            }),
            _ => None,
        })
        .collect();

    RenderedEvents { cards, markers }
}
