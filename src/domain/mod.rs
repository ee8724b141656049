pub mod document;
pub mod record;

pub use document::RenderedDocument;
pub use record::TrendingRecord;
