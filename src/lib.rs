// Library root
// -----------
// This crate exposes the pieces of the `bakeit` command so they can be
// tested without a terminal or a live Pastery account. The binary
// (`main.rs`) only wires them together.
//
// Module responsibilities:
// - `config`: Loads `~/.config/bakeit.cfg` and its `[pastery]` section.
// - `input`: Decides what gets uploaded (file or stdin) and the default title.
// - `api`: Builds the paste request, talks to Pastery and interprets replies.
// - `ui`: Prints results and runs the best-effort clipboard/browser helpers.
// - `cli`: Argument parsing and the end-to-end flow of one invocation.
// - `error`: Error types shared by the modules above.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod ui;
