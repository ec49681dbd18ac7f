pub mod idf;
pub mod report;
pub mod run;

pub use idf::idf;
pub use report::report;
pub use run::run;
