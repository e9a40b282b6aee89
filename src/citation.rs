mod classify;
mod disambiguate;
mod naming;
mod resolve;
mod tagger;
mod tsv;


pub use classify::CitationClassifier;
pub use disambiguate::{DUPLICATE_WARNING, disambiguate};
pub use resolve::{LOOKBACK_WARNING, SUPRA_WARNING, SourceRegistry, long_form_sources, resolve};
pub use tagger::{HeuristicTagger, NameTagger};
pub use tsv::{SHEET_HEADER, SheetRow, parse_sheet, render_sheet};
