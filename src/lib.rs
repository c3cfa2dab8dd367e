// WayChat - creative-assistant chat core
// Library exports

pub mod chat;
pub mod completion;
pub mod config;
pub mod structure;
