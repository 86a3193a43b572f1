pub mod row_window;
pub mod text_input;

pub use row_window::RowWindow;
pub use text_input::TextInputState;
