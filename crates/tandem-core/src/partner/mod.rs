//! Language partner domain module.

mod model;

pub use model::Partner;
