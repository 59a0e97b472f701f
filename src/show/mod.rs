//! Show data model: sheets of dots, loaded from JSON and validated up front.

pub(crate) mod model;
