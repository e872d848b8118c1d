//! Text analysis applied to queries and headwords before matching.
//!
//! Matching in Kosha is a raw substring test, so analysis is limited to
//! normalization: no tokenization, stemming or case folding.

pub mod normalize;
