//! Disc-image patching for Yu-Gi-Oh! Forbidden Memories.
//!
//! Rules either search for a byte signature or write at a fixed address.
//! Before writing, each rule checks whether it has already been applied.
//! Every write is logged with the bytes it replaced so it can be undone.
//!
//! # Example
//!
//! ```
//! use ygofm_patch::{reverse, PatchEngine, PatchGroup, PatchRule, RuleStatus};
//!
//! let pristine = vec![0xAA, 0xBB, 0xCC, 0xDD];
//! let mut image = pristine.clone();
//!
//! let rule = PatchRule::signature_hex("demo", PatchGroup::Custom, "AABBCC", "112233")?;
//! let engine = PatchEngine::new(vec![rule]);
//!
//! let report = engine.apply(&mut image);
//! assert_eq!(image, [0x11, 0x22, 0x33, 0xDD]);
//!
//! // A second pass detects the patch and writes nothing.
//! let again = engine.apply(&mut image);
//! assert_eq!(again.outcomes[0].status, RuleStatus::AlreadyApplied);
//!
//! reverse(&mut image, &report.log);
//! assert_eq!(image, pristine);
//! # Ok::<(), ygofm_patch::Error>(())
//! ```

mod catalogue;
mod engine;
mod error;
mod log;
mod report;
mod reverse;
mod rule;

pub use catalogue::{catalogue, group_rules, select, DropRateMode, PatchGroup, CATALOGUE_VERSION};
pub use engine::{PatchEngine, PatchOptions};
pub use error::{Error, Result};
pub use log::{AppliedPatch, PatchLog};
pub use report::{PatchReport, PatchState, RuleInspection, RuleOutcome, RuleStatus};
pub use reverse::{reverse, reverse_rules, ReversalOutcome, ReversalReport, ReversalStatus};
pub use rule::{PatchRule, RuleTarget};
