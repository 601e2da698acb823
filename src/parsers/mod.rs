pub mod html;


pub use html::{extract_links, extract_text};
