pub(crate) mod action;
pub(crate) mod manifest;
pub(crate) mod parameters;
