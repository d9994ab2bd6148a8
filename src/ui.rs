mod footer;
mod header;
mod loading;
mod main_content;
mod movie_detail;
mod watchlist;
#[allow(clippy::module_inception)]
mod ui;

pub use self::ui::ui;
