//! Внешний API стола.
//!
//! - команды (commands.rs) – всё, что меняет состояние стола;
//! - запросы (queries.rs) – только чтение;
//! - DTO (dto.rs) – удобные структуры для фронта/CLI.

pub mod commands;
pub mod dto;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use queries::*;
