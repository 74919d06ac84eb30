//! Edge-list provider that loads whitespace-separated `source target [weight]`
//! lines into a labelled [`crowd_core::Graph`].

mod errors;
mod parse;
mod source;

pub use errors::{EdgeListError, EdgeListErrorCode};
pub use source::{EdgeListOptions, EdgeListSource};

#[cfg(test)]
mod tests;
