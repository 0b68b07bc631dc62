pub mod collision;
pub mod drift;
pub mod ingest;
pub mod movement;
pub mod walls;

pub use collision::*;
pub use drift::*;
pub use ingest::*;
pub use movement::*;
pub use walls::*;
