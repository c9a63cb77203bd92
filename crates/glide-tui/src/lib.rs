pub mod app;
pub mod event;
pub mod input;
pub mod page;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use page::Variant;
pub use terminal::TerminalHost;
pub use theme::Theme;
