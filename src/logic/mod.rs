pub mod calculations;
pub mod export;
pub mod policy;
pub mod rules;
pub mod simulator;
pub mod snapshot;

pub use export::ExportedSettings;
pub use rules::RulesEngine;
pub use simulator::ReadingSimulator;
pub use snapshot::FieldSnapshot;
