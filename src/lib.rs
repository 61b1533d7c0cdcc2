//! Driftboard - Real-time collaboration core for shared kanban boards
//!
//! This crate implements the ordering engine that keeps list and card
//! positions contiguous under concurrent edits, and the fan-out hub that
//! pushes mutation events to everyone viewing a board.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
