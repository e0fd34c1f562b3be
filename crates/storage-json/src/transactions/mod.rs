mod repository;

pub use repository::JsonTransactionRepository;
