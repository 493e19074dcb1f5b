//! nomad-intel: schema-validated generative insights for digital-nomad planning.
//!
//! Hexagonal layout: `domain` holds the response contracts, `ports` the
//! generative boundary, `adapters` Gemini/mock/terminal UI, `usecases` the
//! prompt catalog and insight service.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
