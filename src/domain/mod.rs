//! Sales domain: the record types and the validation stages that guard writes.

pub mod sale;
pub mod validation;
