//! Document interchange formats.
//!
//! - **CellML** - CellML 1.0/1.1 XML with MathML equations (write only)
//!
//! ```text
//! ┌──────────────┐   to_text    ┌──────────────┐
//! │   Document   │ ───────────▶ │  Model text  │
//! └──────┬───────┘              └──────────────┘
//!        │ DocumentFormat::write
//!        ▼
//! ┌──────────────┐
//! │  CellML XML  │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use cellml_text::interchange::{CellmlXml, DocumentFormat};
//!
//! let bytes = CellmlXml.write(&document)?;
//! ```

mod cellml;
mod error;
mod format;

pub use cellml::{CellmlXml, namespace};
pub use error::InterchangeError;
pub use format::{DocumentFormat, FormatCapability};
