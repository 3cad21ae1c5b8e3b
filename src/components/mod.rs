//! UI components.

pub mod graph_board;
