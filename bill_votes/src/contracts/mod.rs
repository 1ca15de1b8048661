pub mod import_bill_votes;

pub use import_bill_votes::BillVotesImporter;
