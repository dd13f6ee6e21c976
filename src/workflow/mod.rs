//! Betting workflows: the selection state machines behind the bet pages.
//!
//! `prediction` is the two-slot winner/bonus picker used on classics,
//! monuments, stage races and championships; `fantasy` is the 8-rider
//! roster builder for grand tours. Both are pure state machines wrapped in
//! a board that talks to a [`source::RaceSource`] — the live adapter is
//! [`crate::api::ApiClient`], tests plug in fixtures.

pub mod fantasy;
pub mod prediction;
pub mod search;
pub mod source;

pub use fantasy::{FantasyBoard, RosterPicker, RosterToggle};
pub use prediction::{PredictionBoard, PredictionPicker, Toggle};
pub use search::filter_riders;
pub use source::RaceSource;
