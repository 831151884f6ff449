// View-model state — one aggregated record, broadcast to every subscriber.

pub mod search;
pub mod service;
pub mod view_model;
