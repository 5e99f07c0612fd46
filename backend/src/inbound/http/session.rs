//! Local identity store backed by the private session cookie.
//!
//! The cached [`PlayerIdentity`] is the only client-held state. It is never
//! revalidated against the store; `total_points` is display data.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use tracing::warn;

use crate::domain::{Error, PlayerIdentity};

pub(crate) const PLAYER_KEY: &str = "player";

/// Route the client should send a player without an identity to.
pub const SETUP_REDIRECT: &str = "/setup";

/// Newtype wrapper exposing identity-store operations over the session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Cached identity, or `None` when absent or undecodable.
    pub fn load(&self) -> Option<PlayerIdentity> {
        match self.0.get::<PlayerIdentity>(PLAYER_KEY) {
            Ok(identity) => identity,
            Err(error) => {
                warn!(%error, "discarding undecodable player identity");
                None
            }
        }
    }

    /// Replace the cached identity.
    pub fn save(&self, identity: &PlayerIdentity) -> Result<(), Error> {
        self.0
            .insert(PLAYER_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    pub fn clear(&self) {
        self.0.remove(PLAYER_KEY);
    }

    pub fn is_logged_in(&self) -> bool {
        self.load().is_some()
    }

    /// Cached identity or `401` pointing the client at setup.
    pub fn require_identity(&self) -> Result<PlayerIdentity, Error> {
        self.load().ok_or_else(|| {
            Error::unauthorized("player identity required")
                .with_details(json!({ "redirect": SETUP_REDIRECT }))
        })
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
