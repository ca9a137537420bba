//! Client-side view state.

pub mod view;

pub use view::{DisplayValue, GameView, PlayerBlock, StatusColor};
