//! # pddl
//!
//! Live syntax analysis for PDDL (Planning Domain Definition Language) inside a
//! text editor surface.
//!
//! Two cooperating pieces do the work:
//!
//! - a stream tokenizer ([lexing](pddl::lexing)) that classifies one line at a
//!   time for colorization and indentation, carrying bracket depth across lines;
//! - a structural tracker ([structure](pddl::structure)) that rescans the whole
//!   buffer after every edit and reports which lines opened a scope that is
//!   still open at the end of the buffer.
//!
//! Everything else in this crate (mode registration, balance checks, the
//! formatter, token dumps and configuration) is built on top of those two.

pub mod pddl;
