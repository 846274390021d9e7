//! Talon Core
//!
//! Core types and abstractions for the Talon shift-claiming system.
//!
//! This crate contains:
//! - Domain types: Core business entities (JobPosting, ShiftSlot, Opening, etc.)
//! - DTOs: Data transfer objects for the remote hiring gateway wire formats

pub mod domain;
pub mod dto;
