pub mod account;
pub mod category;
pub mod edit;
pub mod recurring;
pub mod reference;
pub mod report;
pub mod settings;
pub mod snapshot;
pub mod transaction;
