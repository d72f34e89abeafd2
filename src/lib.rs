//! Visa Guide - conversational assistant for student work-authorization questions
//!
//! This crate implements a scripted chat flow: greet the user, classify the
//! request with an external language understanding service, collect the
//! visa details it needs and answer from a fixed guidance table.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
