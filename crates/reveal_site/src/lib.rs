//! Reveal Site
//!
//! A headless portfolio site driven by the Reveal animation engine:
//!
//! - **Views**: navbar, about, resume, projects, contact and footer, each
//!   declaring its entrance choreography against its own lifecycle scope
//! - **Navigation**: a host that mounts navbar + page + footer per route and
//!   tears the previous page down first
//! - **Contact form**: local validation stub
//!
//! # Example
//!
//! ```rust
//! use reveal_site::{Route, Site};
//!
//! let mut site = Site::default();
//! site.navigate(Route::About);
//! site.settle(16.0, 1000);
//! assert!(!site.scheduler().has_active_animations());
//! ```

pub mod content;
pub mod form;
pub mod route;
pub mod site;
pub mod view;
pub mod views;

pub use form::{ContactForm, FormError, FormField};
pub use route::{Route, RouteError};
pub use site::Site;
pub use view::{mount, MountedView, Reveal, Stage, View};
