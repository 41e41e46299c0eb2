//! Typed client of the search API: transport, reconciliation of search results
//! with their parent company, debounced activity suggestions, session state and
//! the end-to-end search flows a front end drives.

pub mod api;
pub mod debounce;
pub mod error;
pub mod flows;
pub mod geocode;
pub mod reconcile;
pub mod session;
pub mod view;

pub use api::{HttpSirenApi, SirenApi};
pub use error::ClientError;
pub use geocode::{Geocoder, NominatimGeocoder, Place};
pub use reconcile::{reconcile, DisplayEntity, Entity};
pub use session::{Session, SessionState, TokenStore};

#[cfg(test)]
pub(crate) mod testing;
