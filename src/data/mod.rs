//! Data layer: core types, loading, filtering and the table view.
//!
//! Architecture:
//! ```text
//!  data/viz.csv / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Dataset (rounded, average derived)
//!   └──────────┘
//!        │
//!        ├──────────────► layout   slider bounds, marks, default Selection
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  Selection → filtered indices, region groups
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  table    │  column sort + per-column queries → visible rows
//!   └──────────┘
//!        │
//!        ▼
//!     export     visible rows → CSV, chart payloads → JSON
//! ```

pub mod error;
pub mod export;
pub mod filter;
pub mod layout;
pub mod loader;
pub mod model;
pub mod table;
