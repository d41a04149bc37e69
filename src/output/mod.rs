//! Rendering of the sorted test listing.

mod formatter;
mod tabwriter;
mod template;

pub use formatter::{FormatSpec, OutputFormatter, JSON_FORMAT};
pub use tabwriter::{align, TabWriter};
pub use template::{Placeholders, Template};
