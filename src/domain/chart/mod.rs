//! Chart aggregate: the figure model, its value objects, theme and layout.

pub mod entities;
pub mod services;
pub mod theme;
pub mod value_objects;

pub use entities::*;
pub use services::*;
pub use theme::*;
pub use value_objects::*;
