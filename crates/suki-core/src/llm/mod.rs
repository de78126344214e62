//! Inference endpoint abstractions for Suki.
//!
//! - `InferenceClient`: RPITIT trait for concrete endpoint clients
//! - `BoxInferenceClient`: object-safe wrapper for dynamic dispatch
//! - `FragmentDecoder`: newline-delimited JSON line splitter

pub mod box_provider;
pub mod fragment;
pub mod provider;
