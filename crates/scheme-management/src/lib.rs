//! Scheme visibility and autocreation suppression for project workspaces.
//!
//! A [`Management`] record holds, for one user of one project, the ordered
//! visibility state of schemes ([`SchemeUserState`]) and the set of targets
//! the IDE must not auto-create schemes for
//! ([`SuppressBuildableAutocreation`]).
//!
//! Loading prefers the persisted `xcschememanagement.plist`; when there is
//! none, the record is derived from shared schemes, user schemes and the
//! project's targets (see [`reconcile`]).
//!
//! ```no_run
//! use scheme_fs::{ProjectLayout, StorageConfig};
//! use scheme_management::Management;
//! use scheme_model::{FsRegistry, Target};
//!
//! let layout = ProjectLayout::from_path("App.xcodeproj", StorageConfig::for_user("dev"));
//! let registry = FsRegistry::with_targets([Target::new("App", "App::App")]);
//!
//! let management = Management::load(&layout, &registry)?;
//! management.write(&layout, true)?;
//! # Ok::<(), scheme_management::Error>(())
//! ```

pub mod error;
pub mod logging;
pub mod management;
pub mod reconcile;
pub mod suppression;
pub mod user_state;

pub use error::{Error, Result};
pub use management::{Management, SCHEME_TYPE_TAG};
pub use reconcile::{Reconciliation, reconcile};
pub use suppression::SuppressBuildableAutocreation;
pub use user_state::{SchemeUserState, UserStateEntry};
