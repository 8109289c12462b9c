//! quake-lens – filtering and aggregation engine for seismic event viewers.
//!
//! Feed rows come in (already downloaded, as `.csv` or `.json`), get
//! normalized into [`Event`] records, and a [`ViewState`] derives everything
//! an interactive viewer renders: the filtered subset, facet value lists for
//! filter controls, per-place counts, and histogram bins over a selectable
//! numeric axis. All derivation is synchronous and recomputed in full on
//! every input change; rendering, networking, and persistence live elsewhere.

pub mod data;
pub mod state;

pub use data::aggregate::{AggregationAxis, BinCount, HISTOGRAM_BINS};
pub use data::filter::{FilterCriteria, FilterDimension};
pub use data::loader::load_file;
pub use data::model::{Catalog, Event, FacetDimension, Facets, NormalizeError, RawRecord};
pub use state::ViewState;
