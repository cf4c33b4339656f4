pub mod bank_store;

pub use bank_store::BankStore;
