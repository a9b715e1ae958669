//! Client-side presentation state.

pub mod rsvp;
