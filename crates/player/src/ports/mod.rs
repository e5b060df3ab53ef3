//! Player port definitions.
//!
//! The session core only talks to the outside world through these traits, so
//! the same core runs against a browser page, a terminal, or a test double.

pub mod outbound;
