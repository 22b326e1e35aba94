//! Member extensions built purely on the member builder's public surface.
//!
//! Nothing here reaches into `MemberBuilder` internals: edit masks and data
//! sources go through [`DirectiveSink`](crate::builder::DirectiveSink), and
//! the appearance feature registers itself as a child through
//! [`BuilderManager`](crate::builder::BuilderManager).

pub mod appearance;
pub mod data_source;
pub mod edit_mask;

pub use appearance::{AppearanceBuilder, AppearanceExt};
pub use data_source::DataSourceExt;
pub use edit_mask::{EditMaskExt, MaskableValue, RegexEditMaskExt, TextValue};
