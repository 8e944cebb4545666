//! Converter features
//!
//! Each feature owns its arithmetic and the data tables it reads from.

pub mod unit_converter;
