use tracing::{error, info, warn};

use super::api::{ClientError, EventGateway};
use super::auth::{Action, Authorizer, Role, RolePolicy};
use super::render::{default_image, render, Card, Marker};
use super::session::Session;
use crate::models::NewEvent;

pub const LOGIN_PAGE: &str = "index.html";

/// Map placement for the Beytepe campus and the tile source it is drawn
/// from.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub center: (f64, f64),
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: (39.8656, 32.7339),
            zoom: 15,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; OpenStreetMap".to_string(),
        }
    }
}

/// Blocking browser dialogs and navigation.
pub trait Dialogs {
    fn alert(&mut self, message: &str);

    fn confirm(&mut self, message: &str) -> bool;

    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;

    fn redirect(&mut self, location: &str);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClientState {
    Unauthenticated,
    NoCommunitySelected,
    Ready,
    AwaitingEventInput { lat: f64, lng: f64 },
}

/// Contents of the "new event" form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventForm {
    pub name: String,
    pub image_url: String,
}

/// Everything the page currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub title: String,
    pub map: MapSettings,
    pub markers: Vec<Marker>,
    pub cards: Vec<Card>,
}

/// Community page driver. Owns its view state; every fetch replaces the
/// markers and cards in full.
pub struct MapClient<G> {
    gateway: G,
    authorizer: Box<dyn Authorizer>,
    session: Session,
    state: ClientState,
    view: Option<ViewState>,
    map_settings: MapSettings,
}

impl<G: EventGateway> MapClient<G> {
    pub fn new(gateway: G, session: Session) -> Self {
        Self {
            gateway,
            authorizer: Box::new(RolePolicy),
            session,
            state: ClientState::Unauthenticated,
            view: None,
            map_settings: MapSettings::default(),
        }
    }

    pub fn with_authorizer(mut self, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizer = Box::new(authorizer);
        self
    }

    pub fn with_map_settings(mut self, settings: MapSettings) -> Self {
        self.map_settings = settings;
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn view(&self) -> Option<&ViewState> {
        self.view.as_ref()
    }

    fn role(&self) -> Option<Role> {
        self.session.user.as_ref().map(|user| user.role)
    }

    fn topluluk(&self) -> &str {
        self.session.topluluk.as_deref().unwrap_or_default()
    }

    /// Page load: checks the session, sets up the map and loads events.
    pub async fn start(&mut self, dialogs: &mut dyn Dialogs) {
        if self.session.user.is_none() {
            self.state = ClientState::Unauthenticated;
            dialogs.redirect(LOGIN_PAGE);
            return;
        }
        let Some(topluluk) = self.session.topluluk.clone() else {
            self.state = ClientState::NoCommunitySelected;
            dialogs.alert("No community selected!");
            return;
        };

        self.view = Some(ViewState {
            title: format!("{} Page", topluluk),
            map: self.map_settings.clone(),
            markers: Vec::new(),
            cards: Vec::new(),
        });
        self.state = ClientState::Ready;
        info!(%topluluk, "Community map ready");

        self.refresh("", dialogs).await;
    }

    /// Re-fetches the community's events (optionally filtered by name) and
    /// re-renders everything.
    pub async fn refresh(&mut self, q: &str, dialogs: &mut dyn Dialogs) {
        let Some(role) = self.role() else {
            return;
        };
        if self.view.is_none() {
            return;
        }

        let events = match self.gateway.list(self.topluluk(), q).await {
            Ok(events) => events,
            Err(e) => {
                error!(error = %e, "Fetching events failed");
                dialogs.alert("Could not load events!");
                return;
            }
        };

        let rendered = render(&events, self.topluluk(), role, self.authorizer.as_ref());
        if let Some(view) = self.view.as_mut() {
            view.markers = rendered.markers;
            view.cards = rendered.cards;
        }
    }

    pub async fn on_map_click(&mut self, lat: f64, lng: f64, dialogs: &mut dyn Dialogs) {
        if !matches!(
            self.state,
            ClientState::Ready | ClientState::AwaitingEventInput { .. }
        ) {
            return;
        }
        let Some(role) = self.role() else {
            return;
        };
        if !self.authorizer.allows(role, Action::CreateEvent) {
            dialogs.alert(match role {
                Role::Student => "Students cannot add events!",
                _ => "You are not allowed to add events!",
            });
            return;
        }

        self.state = ClientState::AwaitingEventInput { lat, lng };
    }

    /// Closes the event form without saving.
    pub fn cancel_event_input(&mut self) {
        if let ClientState::AwaitingEventInput { .. } = self.state {
            self.state = ClientState::Ready;
        }
    }

    pub async fn submit_event(&mut self, form: EventForm, dialogs: &mut dyn Dialogs) {
        let ClientState::AwaitingEventInput { lat, lng } = self.state else {
            return;
        };

        let name = form.name.trim();
        if name.is_empty() {
            dialogs.alert("Please enter the event name!");
            return;
        }
        let image_url = if form.image_url.trim().is_empty() {
            default_image(self.topluluk())
        } else {
            form.image_url.trim().to_string()
        };

        let payload = NewEvent {
            title: Some(name.to_string()),
            description: None,
            topluluk: Some(self.topluluk().to_string()),
            lat,
            lng,
            image_url: Some(image_url),
        };

        match self.gateway.create(&payload).await {
            Ok(()) => {
                self.state = ClientState::Ready;
                self.refresh("", dialogs).await;
            }
            Err(ClientError::Status { status, message }) => {
                warn!(status, %message, "Event was not created");
                dialogs.alert("Failed to add event!");
            }
            Err(e) => {
                error!(error = %e, "Event create request failed");
                dialogs.alert("Server error! Is the backend running?");
            }
        }
    }

    pub async fn edit_event(&mut self, id: i64, old_name: &str, dialogs: &mut dyn Dialogs) {
        if !self.permits(Action::EditEvent, dialogs) {
            return;
        }
        let Some(new_name) = dialogs.prompt("New event name:", old_name) else {
            return;
        };
        let new_name = new_name.trim();
        if new_name.is_empty() || new_name == old_name {
            return;
        }

        match self.gateway.rename(id, new_name).await {
            Ok(()) => {
                dialogs.alert("Updated!");
                self.refresh("", dialogs).await;
            }
            Err(e) => {
                error!(id, error = %e, "Renaming event failed");
                dialogs.alert("An error occurred!");
            }
        }
    }

    pub async fn delete_event(&mut self, id: i64, dialogs: &mut dyn Dialogs) {
        if !self.permits(Action::DeleteEvent, dialogs) {
            return;
        }
        if !dialogs.confirm("Are you sure you want to delete this event?") {
            return;
        }

        match self.gateway.delete(id).await {
            Ok(()) => self.refresh("", dialogs).await,
            Err(e) => {
                error!(id, error = %e, "Deleting event failed");
                dialogs.alert("Delete failed!");
            }
        }
    }

    fn permits(&self, action: Action, dialogs: &mut dyn Dialogs) -> bool {
        if self.state == ClientState::Unauthenticated
            || self.state == ClientState::NoCommunitySelected
        {
            return false;
        }
        let allowed = self
            .role()
            .is_some_and(|role| self.authorizer.allows(role, action));
        if !allowed {
            dialogs.alert("You are not allowed to do that!");
        }
        allowed
    }
}
