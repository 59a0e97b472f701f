//! Per-performer motion: movement primitives and the dot that sequences them.

pub(crate) mod command;
pub(crate) mod dot;
