//! Jeepney route planner.
//!
//! Answers "which jeepneys do I ride, and where do I change?" for a fixed
//! network of routes: fewest transfers first, then fewest stops.

pub mod cache;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
