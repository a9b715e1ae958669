//! Browser implementations of the supervisor seams.

pub mod clock;
pub mod iframe;

pub use clock::GlooClock;
pub use iframe::IframeEmbed;
