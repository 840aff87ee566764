//! Shared data model for the DataMAx ETL pipeline.
//!
//! Every pipeline component exchanges data through [`Table`], an ordered
//! in-memory table of [`Value`] cells with named columns. Entity-specific
//! knowledge (column names, dedup keys, required columns, target tables) lives
//! in [`Entity`], and the controlled vocabularies for trials live in
//! [`TrialPhase`] and [`TrialStatus`].
//!
//! - **table**: the in-memory table and cell values
//! - **entity**: drug / clinical trial descriptors
//! - **enums**: phase and status vocabularies with synonym lookup
//! - **date**: the single date parser shared by every phase

pub mod date;
pub mod entity;
pub mod enums;
mod error;
pub mod table;

pub use date::{DatePairOrder, format_date, parse_date, validate_date_pair};
pub use entity::{Entity, columns};
pub use enums::{TrialPhase, TrialStatus};
pub use error::{ModelError, Result};
pub use table::{Table, Value};
