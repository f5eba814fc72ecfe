pub mod allow_list;

pub use allow_list::{parse_list, EmailFilter, SlugFilter};
