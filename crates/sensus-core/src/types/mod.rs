//! Record-shape definitions shared by the evolution applier and the
//! aggregation engine.

pub mod column_spec;
pub mod flag_answer;
pub mod outcome;
pub mod record;
pub mod report;
pub mod tag_set;

pub use column_spec::{ColumnOp, ColumnSpec, DefaultValue, SemanticType};
pub use flag_answer::FlagAnswer;
pub use outcome::{EvolutionOutcome, EvolutionSummary};
pub use record::CongregantRecord;
pub use report::{AggregationReport, GroupCount, MetricValue, TagCount};
pub use tag_set::TagSet;
