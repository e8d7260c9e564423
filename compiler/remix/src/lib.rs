//! ReMix - compose many regular expressions into a few batched matchers.
//!
//! An engine ([`Remix`]) holds a tree of [`Spec`]s. Compiling flattens the
//! tree into namespaced leaves and joins adjacent leaves with compatible
//! flags into one alternation per batch, keeping exact track of which
//! capture groups belong to which leaf. Scanning then runs the batches
//! against a [`Subject`] token by token:
//!
//! - [`Remix::exec`] matches at the engine's cursor and advances it
//! - [`Remix::reject`] rewinds the last accepted match
//! - [`Remix::test`] is a cursor-free boolean probe
//!
//! Every accepted [`Match`] carries one capture slice per leaf, the
//! namespace and index of the leaf that fired, and the offset where the
//! next match starts.
//!
//! ```
//! use std::sync::Arc;
//! use remix::{Pattern, Registry, Remix, Subject};
//!
//! let mut re = Remix::new(Arc::new(Registry::new()));
//! re.add(Pattern::from_literal("/(foo)o/").unwrap())
//!     .add(Pattern::from_literal("/(bar)r/i").unwrap());
//! assert_eq!(re.to_debug_string().unwrap(), "/((foo)o)/g /((bar)r)/ig");
//!
//! let mut subject = Subject::new("foooBarr");
//! let m = re.exec(&mut subject).unwrap().unwrap();
//! assert_eq!(m.groups(), &[vec![Some("fooo"), Some("foo")], vec![None, None]]);
//! let m = re.exec(&mut subject).unwrap().unwrap();
//! assert_eq!(m.groups(), &[vec![None, None], vec![Some("Barr"), Some("Bar")]]);
//! assert!(re.exec(&mut subject).unwrap().is_none());
//! ```

mod engine;
mod error;
mod options;
mod program;
mod resolve;
mod scan;
mod spec;

pub use engine::Remix;
pub use error::RemixError;
pub use options::Options;
pub use program::{Batch, CompiledProgram, NamedLeaf};
pub use scan::{EngineId, Match, Position, ScanState, Subject};
pub use spec::{LazyFn, LazySpec, Spec};

pub use remix_pattern::{Flags, Pattern, PatternError};
pub use remix_template::{Definition, Registry, TemplateError};
