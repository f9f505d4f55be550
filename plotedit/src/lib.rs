pub mod commit;
pub mod config;
pub mod editor;
pub mod error;
pub mod form;
pub mod schema;
pub mod style;

pub use editor::{edit_figure, FigureEditor};
