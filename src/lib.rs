//! Density distributions of trapped Bose gases.
//!
//! The crate computes the chemical potential, atom numbers, sizes and
//! density profiles of three kinds of clouds held in a harmonic trap and
//! released for a time of flight:
//!
//! - Thomas-Fermi condensates ([`bec`]),
//! - thermal clouds of the ideal Bose gas ([`thermal`]),
//! - bimodal clouds made of both ([`bimodal`]).
//!
//! Densities are sampled on 1D, 2D or 3D coordinate grids ([`grid`],
//! [`density`]): a 3D grid gives the density, a 2D grid the column density
//! integrated along z and a 1D grid the line density integrated along y and z.
//! Integrating any of them reproduces the analytic atom number, which the
//! example programs print as a consistency check.

pub mod bec;
pub mod bimodal;
pub mod config;
pub mod constants;
pub mod density;
pub mod error;
pub mod expansion;
pub mod grid;
pub mod plot;
pub mod special;
pub mod thermal;
pub mod types;
pub mod utils;

pub use error::{SimbiError, SimbiResult};
