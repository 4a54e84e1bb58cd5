//! Инфраструктурный слой вокруг движка: RNG-реализации для колоды.

pub mod rng;

pub use rng::*;
