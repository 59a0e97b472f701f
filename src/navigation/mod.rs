//! Navigation over a show: which sheet, beat and dot are on display.

pub(crate) mod delegate;
