pub mod page_loader;

pub use page_loader::load_page_files;
