//! Route handlers outside the pricing API

pub mod health;
