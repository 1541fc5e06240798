pub mod calculator;
pub mod history;
pub mod lines;
pub mod ranking;
pub mod score;
pub mod session;

pub use session::{Festival, UndoReport};
