//! User Handlers

pub(crate) mod delete;
pub(crate) mod me;
pub(crate) mod update_me;
