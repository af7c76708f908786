pub mod entities;
pub mod graph;
