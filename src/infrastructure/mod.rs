pub mod extractor;
pub mod reporter;
pub mod splitter;

pub use extractor::{
    DocxTextExtractor, ExtractorRegistry, PdfTextExtractor, PlainTextExtractor, TextExtractor,
};
pub use reporter::{NoopReporter, Reporter, TracingReporter};
pub use splitter::{PdfSplitter, Splitter};
