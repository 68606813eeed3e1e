pub mod column;
pub mod error;
pub mod parse;
pub mod set;
pub mod types;

pub use column::{ColumnFilter, ColumnFilterOptions, ColumnFilterState};
pub use error::FilterError;
pub use parse::FilterParser;
pub use set::{FilterSet, FilterSetState};
pub use types::*;
