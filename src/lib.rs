// Library root
// -----------
// This crate exposes the styler as a small library so the interactive
// front-end in `main.rs` stays thin and the state handling can be tested
// without a terminal or a network.
//
// Module responsibilities:
// - `state`: the state container (file, style, result, request status)
//   and its transitions.
// - `session`: runs the side effects the state asks for.
// - `api`: HTTP interaction with the stylization endpoint.
// - `ui`: the terminal flows, delegating everything else to `session`.
pub mod api;
pub mod config;
pub mod download;
pub mod error;
pub mod file;
pub mod preview;
pub mod session;
pub mod state;
pub mod style;
pub mod styled;
pub mod ui;
