pub mod grader;
pub mod importer;
pub mod option_splitter;

pub use grader::Grader;
pub use importer::Importer;
pub use option_splitter::OptionSplitter;
