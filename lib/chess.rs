mod color;
mod fen;
mod r#move;
mod outcome;
mod piece;
mod placement;
mod position;
mod promotion;
mod role;
mod square;

pub use color::*;
pub use fen::*;
pub use outcome::*;
pub use piece::*;
pub use placement::*;
pub use position::*;
pub use promotion::*;
pub use r#move::*;
pub use role::*;
pub use square::*;
