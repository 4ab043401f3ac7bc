//! Profile Module
//!
//! Everything between the stored profile document and what a view renders.
//!
//! # Module Structure
//!
//! ```text
//! profile/
//! ├── mod.rs           - Module exports and documentation
//! ├── store.rs         - ProfileStore contract and shared merge rules
//! ├── memory_store.rs  - In-memory store
//! ├── file_store.rs    - One JSON document per user on disk
//! ├── lists.rs         - Delimited-string list codec
//! ├── aggregator.rs    - RawProfile -> DisplayProfile (defaults, lists, BMI)
//! └── form.rs          - Typed setup/edit form -> partial RawProfile
//! ```
//!
//! # Data Flow
//!
//! 1. **Write**: `ProfileForm` → `to_partial` (lists joined) → `ProfileStore::merge`
//! 2. **Read**: `ProfileStore::get` → `RawProfile` → `ProfileAggregator::aggregate` → `DisplayProfile`

pub mod aggregator;
pub mod file_store;
pub mod form;
pub mod lists;
pub mod memory_store;
pub mod store;

pub use aggregator::{aggregate, compute_bmi, ProfileAggregator};
pub use file_store::FileProfileStore;
pub use form::ProfileForm;
pub use lists::{join_list, parse_list};
pub use memory_store::MemoryProfileStore;
pub use store::ProfileStore;
