pub mod appearance;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod gesture;
pub mod hand;
pub mod ornament;
pub mod placement;
pub mod pointer;
pub mod scene;
pub mod shape;
pub mod state;

pub use appearance::*;
pub use config::*;
pub use constants::*;
pub use error::FormationError;
pub use frame::*;
pub use gesture::*;
pub use hand::*;
pub use ornament::*;
pub use placement::*;
pub use pointer::*;
pub use scene::*;
pub use shape::*;
pub use state::*;
