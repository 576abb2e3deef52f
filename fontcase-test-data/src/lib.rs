//! Hand-built font containers and table payloads shared by the fontcase
//! tests.
//!
//! Everything here is synthetic: small, structurally valid images whose
//! interesting values are chosen to be easy to assert against.

pub mod bebuffer;
pub mod payload;
pub mod sfnt;
pub mod suitcase;
pub mod ttc;

pub use bebuffer::BeBuffer;
