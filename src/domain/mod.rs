//! Domain layer - value types of the question/answer exchange.

pub mod assistant;
