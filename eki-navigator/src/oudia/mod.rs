//! OuDiaSecond diagram file output.
//!
//! Diagram files are line-oriented `key=value` text, grouped into blocks
//! opened by a `Name.` line and closed by a lone `.`. Editors parse them
//! strictly by block, so every block is always emitted in a fixed order,
//! populated with defaults where the model has nothing to say.

mod serialize;
mod writer;

pub use serialize::{eki_jikoku, serialize, stop_cell};
pub use writer::{BOM, OudWriter};
