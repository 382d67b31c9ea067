//! Report Handlers

pub(crate) mod sales;
