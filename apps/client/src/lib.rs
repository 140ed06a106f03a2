//! NAVIQ terminal client: API bindings, page state, text views, the canned
//! career guide and the ambient canvas effects.

pub mod api;
pub mod app;
pub mod canvas;
pub mod chat;
pub mod cli;
pub mod config;
pub mod theme;
pub mod view;
