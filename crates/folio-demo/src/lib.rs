#![forbid(unsafe_code)]

//! Terminal front end for the Folio scene story.
//!
//! The binary wires real crossterm input into a
//! [`folio_runtime::Session`] and draws it with [`surface::TerminalSurface`].

pub mod app;
pub mod chime;
pub mod cli;
pub mod surface;
