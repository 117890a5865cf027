//! Persistence adapters

mod in_memory_card_repository;

pub use in_memory_card_repository::InMemoryCardRepository;
