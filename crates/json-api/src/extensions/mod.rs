//! Extension traits

mod depot;
mod parse;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use parse::ParseFieldExt as _;
pub(crate) use result::ResultExt as _;
