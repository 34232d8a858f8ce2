//! orgdir: organization directory explorer.
//!
//! Browse a catalog of organizations in the terminal, narrowing the list by
//! keyword and by faceted filters. The engine lives in `orgdir-core`, the
//! interactive shell in `orgdir-tui`; this crate adds the command-line entry
//! point and a headless mode that runs one search and prints the results.
//!
//! # Architecture
//!
//! ```text
//! catalog ──► orgdir-core engine ──► orgdir-tui (interactive)
//!                    │
//!                    └──────────────► headless (text / html on stdout)
//! ```

pub mod headless;
