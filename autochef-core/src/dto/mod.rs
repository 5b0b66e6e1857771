//! Data Transfer Objects for the transformation service
//!
//! Request and response bodies exactly as they travel over the wire.
//! Domain types are built from these at the client boundary.

pub mod bake;
pub mod magic;
