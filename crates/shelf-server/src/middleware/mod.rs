//! HTTP middleware layers.

pub(crate) mod security;
