//! Graph service client: typed wire models, authenticated HTTP access, and
//! paginated collection aggregation.
//!
//! The seams are deliberate: [`GraphClient`] owns transport and token
//! concerns, [`PageSource`] abstracts continuation fetching so the
//! aggregator is testable without a server, and the models keep provider
//! extras in flattened maps for tagged lookup downstream.

mod client;
pub mod collection;
pub mod models;

pub use client::{GraphClient, QueryOptions};
pub use collection::{PageSource, aggregate};
pub use models::{
    Application, CanvasLayout, CollectionPage, HorizontalSection, SectionColumn, Site, SitePage,
    User, VerticalSection, WebPart,
};
