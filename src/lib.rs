//! Unit converter library
//!
//! Converts values within length, weight, temperature and volume, keeping a
//! bounded, persisted history of recent conversions.
//!
//! ```no_run
//! use unit_converter_lib::{open_store, AppSettings, Category, ConversionEngine};
//!
//! let settings = AppSettings::load_or_default();
//! let mut engine = ConversionEngine::new(open_store(&settings));
//! let conversion = engine.convert(Category::Length, 1.0, "mile", "meter")?;
//! println!("{}", conversion.formatted_result);
//! # Ok::<(), unit_converter_lib::CommandError>(())
//! ```

pub mod core;
pub mod shared;

pub use crate::core::features::unit_converter::{
    convert_value, format_number, parse_quantity, parse_value, swap, Conversion,
    ConversionEngine, PROMPT_ENTER_VALUE,
};
pub use crate::core::history::{
    open_store, HistoryLog, HistoryManager, KeyValueStore, MemoryStore, RedbStore,
    HISTORY_STORAGE_KEY, MAX_HISTORY_SIZE,
};
pub use crate::shared::settings::AppSettings;
pub use crate::shared::types::{Category, ConversionRecord, UnitDTO};
pub use crate::shared::{CommandError, CommandResult};
