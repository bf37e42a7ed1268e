//! Typed façades, one per resource family.
//!
//! Each façade translates a domain operation into one [`RequestEngine`]
//! call; [`Bulk`] additionally drives an [`model::AutoPaginator`]. Façades
//! are cheap to create (they share the client's engine) and hold no state of
//! their own. None of them retries, caches, or backs off.
//!
//! [`RequestEngine`]: crate::RequestEngine

mod bulk;
mod changelog;
mod export;
mod laws;
mod search;
mod webhooks;

pub use bulk::{ArticlePaginator, Bulk};
pub use changelog::{Changelog, Stats};
pub use export::{Export, ExportDownload};
pub use laws::Laws;
pub use search::Search;
pub use webhooks::Webhooks;
