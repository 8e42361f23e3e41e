//! Headless driver for the community map page: session handling, the
//! click-to-place state machine, and rendering of cards and markers from
//! the events API.

pub mod api;
pub mod auth;
pub mod map;
pub mod render;
pub mod session;

pub use api::{ClientError, EventGateway, HttpEventGateway, DEFAULT_API_URL};
pub use auth::{Action, Authorizer, Role, RolePolicy};
pub use map::{
    ClientState, Dialogs, EventForm, MapClient, MapSettings, ViewState, LOGIN_PAGE,
};
pub use render::{render, Card, Marker, RenderedEvents};
pub use session::{Session, User};
