// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod place;
pub mod route;
pub mod safety;
pub mod trip;

pub use place::*;
pub use route::*;
pub use safety::*;
pub use trip::*;
