//! Reconstructs X.509 trust chains from PEM bundles by matching each
//! certificate's Authority Key Identifier to another certificate's Subject
//! Key Identifier, independent of the order the certificates appear in.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
