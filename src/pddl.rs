//! Main module for pddl library functionality

pub mod balance;
pub mod formatting;
pub mod lexing;
pub mod mode;
pub mod processor;
pub mod settings;
pub mod structure;
