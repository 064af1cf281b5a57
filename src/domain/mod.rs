//! Domain types for the travel agent
//!
//! The conversation state threaded through every pipeline stage, plus the
//! reference data (destinations) and derived data (itinerary days) it holds.

mod destination;
mod itinerary;
mod preferences;
mod state;

pub use destination::{Coordinates, Destination};
pub use itinerary::Day;
pub use preferences::{PreferenceKey, Preferences};
pub use state::{ChatTurn, ConversationState, Speaker};
