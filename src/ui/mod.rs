//! Terminal presentation of installed versions

pub mod display;
