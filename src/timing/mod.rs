//! Beat-to-audio-time table.

pub(crate) mod beats;
