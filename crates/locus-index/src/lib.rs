//! Place-name resolution over a Tantivy gazetteer index.
//!
//! A [`Resolver`] turns an [`Occurrence`] (a raw place-name mention) into
//! ranked [`Candidate`]s:
//!
//! 1. The mention is escaped and searched as an exact phrase anchored to the
//!    end of indexed names.
//! 2. Only when that matches nothing, and the caller allows it, every word is
//!    searched again within an edit distance.
//! 3. Hits are ordered by the resolver's [`RankingPolicy`] (population first
//!    by default) and capped at the requested limit.
//!
//! # Example
//!
//! ```no_run
//! use locus_config::Config;
//! use locus_index::{IndexWriter, LocationRecord, Occurrence, Resolver};
//!
//! let path = std::path::Path::new("./gazetteer");
//! let mut writer = IndexWriter::open(path).unwrap();
//! writer
//!     .add_record(&LocationRecord::new(4930956, "Boston", 617_594).with_country("US"))
//!     .unwrap();
//! writer.commit().unwrap();
//!
//! let resolver = Resolver::open(path, &Config::default()).unwrap();
//! let candidates = resolver.search(&Occurrence::new("Bosten", 0), true).unwrap();
//! assert!(candidates[0].fuzzy);
//! ```

mod analyzer;
mod error;
mod fallback;
mod mapper;
mod query;
mod rank;
mod record;
mod resolver;
mod result;
mod schema;
mod session;
mod writer;

pub use analyzer::{LOCUS_TOKENIZER, NAME_END_MARKER, build_analyzer};
pub use error::IndexError;
pub use fallback::Phase;
pub use locus_config::RankingPolicy;
pub use mapper::map_hits;
pub use query::{LocationQuery, MatchStrategy, QueryBuilder, QueryCompiler};
pub use rank::RankKey;
pub use record::{LocationRecord, Occurrence};
pub use resolver::{Resolver, open_resolver};
pub use result::{Candidate, LocationHit, Resolution, SearchPage};
pub use schema::IndexSchema;
pub use session::{IndexSession, SessionProvider, TantivySession, TantivySessionProvider};
pub use writer::IndexWriter;
