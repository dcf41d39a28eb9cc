//! Fan-out/fan-in join of primary records with reference data.
//!
//! For each record the aggregator issues two independent lookups (animal,
//! staff) and merges the results into a display-ready row. All lookups of
//! one batch run concurrently and the call resolves only once every lookup
//! has settled; the method returns one completed collection, never a stream.

use std::sync::Arc;

use futures_util::future::{join, join_all};
use tracing::warn;

use super::ports::ReferenceStore;
use super::records::{JoinedRow, PrimaryRecord};

/// Joins primary records with animal and staff references.
#[derive(Clone)]
pub struct ReportAggregator {
    references: Arc<dyn ReferenceStore>,
}

impl ReportAggregator {
    /// Create an aggregator over the given reference store.
    pub fn new(references: Arc<dyn ReferenceStore>) -> Self {
        Self { references }
    }

    /// Resolve both references for every record and merge into rows.
    ///
    /// A record contributes a row only when both lookups succeed; any
    /// failure drops that record from the output with a warning, and never
    /// fails the batch. Display indices are the records' 1-based input
    /// positions, recomputed from scratch on every call.
    pub async fn aggregate<R>(&self, records: Vec<R>) -> Vec<JoinedRow<R>>
    where
        R: PrimaryRecord,
    {
        let lookups = records.into_iter().enumerate().map(|(position, record)| {
            let references = Arc::clone(&self.references);
            async move {
                let index = position + 1;
                let (animal, staff) = join(
                    references.animal(record.animal_id()),
                    references.staff(record.staff_id()),
                )
                .await;
                match (animal, staff) {
                    (Ok(animal), Ok(staff)) => Some(JoinedRow {
                        index,
                        animal_name: animal.animal_name,
                        staff_name: staff.display_name(),
                        record,
                    }),
                    (animal, staff) => {
                        for error in [animal.err(), staff.err()].into_iter().flatten() {
                            warn!(index, error = %error, "dropping record with unresolved reference");
                        }
                        None
                    }
                }
            }
        });

        // join_all is the batch barrier: no row is observable before the
        // slowest lookup in the batch has settled.
        join_all(lookups).await.into_iter().flatten().collect()
    }
}
