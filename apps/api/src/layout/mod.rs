// Page budget applied to merged documents.
// Limits are pure data; the numbers come from `Config`.

pub mod budget;

pub use budget::PageBudget;
