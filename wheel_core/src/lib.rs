pub mod config;
pub mod csv;
pub mod dialog;
pub mod driver;
pub mod error;
pub mod item;
pub mod presentation;
pub mod reel;
pub mod rng;
pub mod spin;
pub mod wheel;

pub use crate::config::WheelConfig;
pub use crate::csv::{parse_items, parse_row, split_fields};
pub use crate::dialog::{CloseReason, DialogFields, DialogState, FocusTarget};
pub use crate::driver::{drive_spin, run_spin, SpinHost};
pub use crate::error::{WheelError, WheelResult};
pub use crate::item::Item;
pub use crate::presentation::{Presentation, SPINNING_CLASS};
pub use crate::reel::{build_reels, track_cells, Reel};
pub use crate::rng::{derive_floats, sha256_hex, RandomSource, ScriptedRng, SeededRng};
pub use crate::spin::{plan_spin, ReelMotion, SpinPhase, SpinPlan};
pub use crate::wheel::{SpinOutcome, Wheel};
