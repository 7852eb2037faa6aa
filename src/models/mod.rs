pub mod loaders;
pub mod page;

pub use loaders::load_page_files;
pub use page::{BatchReport, ExtractedMetadata, PageFile, PageOutcome, RenameTarget};
