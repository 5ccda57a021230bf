//! `civic-lib` - In-process civic feedback board.
//!
//! Citizens file issues, politicians post broadcasts, moderators and admins
//! triage status, and every role comments. State is a single ordered
//! collection persisted as one versioned snapshot.
//!
//! # Quick Start
//!
//! ```no_run
//! use civic_lib::{Board, Category, Command, FileSlots, IssueStore, Role};
//!
//! let mut board = Board::open(IssueStore::new(FileSlots::new(".civic")));
//!
//! let outcome = board.dispatch(Role::Citizen, &Command::SubmitIssue {
//!     title: "Pothole".into(),
//!     description: "Large pothole on 5th".into(),
//!     category: Category::Roads,
//! }).unwrap();
//!
//! if let Some(denial) = outcome.denial() {
//!     eprintln!("{}", denial.reason().unwrap_or_default());
//! }
//! ```

pub mod board;
pub mod error;
pub mod model;
pub mod policy;
pub mod repo;
pub mod store;
pub mod util;
pub mod view;

pub use board::{Board, Command, NoChange, Outcome, apply};
pub use error::{BoardError, Result};
pub use model::{Category, Comment, Issue, Role, Status};
pub use policy::{Action, Authorization};
pub use repo::IssueRepository;
pub use store::{FileSlots, IssueStore, MemorySlots, SlotStore};
pub use view::{StatusCounts, StatusFilter};
