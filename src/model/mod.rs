pub mod config;
pub mod decision;
pub mod detail;
pub mod inbox;
pub mod letter;
pub mod timestamp;

pub use config::*;
pub use decision::*;
pub use detail::*;
pub use inbox::*;
pub use letter::*;
