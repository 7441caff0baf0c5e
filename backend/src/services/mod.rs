//! Business logic services for BukuToko

pub mod catalog;
pub mod reporting;
pub mod suppliers;
pub mod transactions;
pub mod users;

pub use catalog::CatalogService;
pub use reporting::ReportingService;
pub use suppliers::SupplierService;
pub use transactions::TransactionService;
pub use users::UserService;
