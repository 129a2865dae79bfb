mod r#trait;
mod memory;

// Repository trait
pub use r#trait::Repository;

// Repository implementations
pub use memory::MemoryRepository;
