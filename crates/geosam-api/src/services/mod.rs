pub mod export;
pub mod run;

pub use export::ExportService;
pub use run::RunService;
