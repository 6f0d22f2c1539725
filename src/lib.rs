//! Command line helpers for the nCore private tracker: a search tool that ranks
//! hits by seeders and a magnet tool that turns a downloaded `.torrent` into a
//! magnet link. Both print a single JSON object to stdout.

pub mod bencode;
pub mod cli;
pub mod config;
pub mod error;
pub mod magnet;
pub mod report;
pub mod search;
pub mod site;
pub mod torrent;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
