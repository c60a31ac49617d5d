use crate::error::{CutError, Result};
use crate::packer;
use crate::types::{BarResult, CutJob, Notice, Solution};

/// Most pieces one job may expand to. Every bar rescans the pieces still
/// left, so packing time grows with the square of this count.
pub const MAX_PIECES: u64 = 10_000;

pub struct Solver {
    job: CutJob,
}

impl Solver {
    pub fn new(job: CutJob) -> Self {
        Self { job }
    }

    pub fn solve(&self) -> Result<Solution> {
        let mut notices = Vec::new();
        let demand = self.normalized_demand(&mut notices)?;
        let lengths = &self.job.piece_lengths;

        let packing = packer::pack(self.job.raw_length, lengths, &demand)?;

        let bars = packing
            .configurations
            .into_iter()
            .zip(packing.waste)
            .map(|(cuts, waste)| BarResult { cuts, waste })
            .collect();
        let solution = Solution {
            bars,
            raw_length: self.job.raw_length,
            notices,
        };

        tracing::info!(
            raw_length = solution.raw_length,
            bars = solution.bar_count(),
            waste = solution.total_waste(),
            utilization = solution.utilization_percent(),
            "solved"
        );
        Ok(solution)
    }

    /// Validates the job and returns the demand to pack.
    fn normalized_demand(&self, notices: &mut Vec<Notice>) -> Result<Vec<u32>> {
        let lengths = &self.job.piece_lengths;
        if lengths.is_empty() {
            return Err(CutError::InputEmpty);
        }
        if self.job.raw_length == 0 {
            return Err(CutError::InvalidRawLength);
        }
        if let Some(index) = lengths.iter().position(|&l| l == 0) {
            return Err(CutError::InvalidPieceLength { index });
        }

        let demand = match &self.job.demand {
            Some(d) if !d.is_empty() => d.clone(),
            _ => {
                tracing::info!("{}", Notice::DemandDefaulted);
                notices.push(Notice::DemandDefaulted);
                vec![1; lengths.len()]
            }
        };
        if demand.len() != lengths.len() {
            return Err(CutError::DemandMismatch {
                lengths: lengths.len(),
                demand: demand.len(),
            });
        }

        let count = demand
            .iter()
            .try_fold(0u64, |acc, &c| acc.checked_add(c as u64))
            .unwrap_or(u64::MAX);
        if count > MAX_PIECES {
            return Err(CutError::TooManyPieces {
                count,
                max: MAX_PIECES,
            });
        }

        for (&length, &count) in lengths.iter().zip(&demand) {
            if count > 0 && length > self.job.raw_length {
                return Err(CutError::UnpackableDemand {
                    length,
                    raw_length: self.job.raw_length,
                });
            }
        }

        Ok(demand)
    }
}
