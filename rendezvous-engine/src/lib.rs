//! Rendezvous planning engine.
//!
//! Given travelers with origins and travel modes and one shared destination,
//! works out who can meet whom en route, who leads each group, when everyone
//! has to leave, and how to describe and draw the result.

pub mod domain;
pub mod geometry;
pub mod grouping;
pub mod planner;
pub mod provider;
pub mod render;
