//! Framing for single-performer movement diagrams.

pub(crate) mod movement;
