use crate::error::{CutError, Result};

/// Raw output of the greedy packer: one configuration and one waste value per bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Packing {
    pub configurations: Vec<Vec<u32>>,
    pub bars_used: usize,
    pub waste: Vec<u32>,
}

/// Packs the demanded pieces into bars of `raw_length`, largest pieces first.
///
/// Every bar takes, in one pass over the remaining pieces, each piece that
/// still fits. Fails without packing anything when the lists differ in size
/// or a piece is longer than the bar.
pub fn pack(raw_length: u32, piece_lengths: &[u32], demand: &[u32]) -> Result<Packing> {
    if piece_lengths.len() != demand.len() {
        return Err(CutError::DemandMismatch {
            lengths: piece_lengths.len(),
            demand: demand.len(),
        });
    }

    let mut pieces = expand_pieces(piece_lengths, demand);
    if let Some(&length) = pieces.iter().find(|&&l| l > raw_length) {
        return Err(CutError::UnpackableDemand { length, raw_length });
    }

    // Stable, so equal lengths keep their first-seen order
    pieces.sort_by(|a, b| b.cmp(a));

    let mut packing = Packing::default();
    while !pieces.is_empty() {
        let mut remaining = raw_length;
        let mut cuts = Vec::new();
        let mut left = Vec::with_capacity(pieces.len());

        for piece in pieces {
            if piece <= remaining {
                remaining -= piece;
                cuts.push(piece);
            } else {
                left.push(piece);
            }
        }

        tracing::debug!(bar = packing.bars_used + 1, ?cuts, waste = remaining, "bar cut");
        packing.configurations.push(cuts);
        packing.waste.push(remaining);
        packing.bars_used += 1;
        pieces = left;
    }

    Ok(packing)
}

fn expand_pieces(piece_lengths: &[u32], demand: &[u32]) -> Vec<u32> {
    let mut pieces = Vec::new();
    for (&length, &count) in piece_lengths.iter().zip(demand) {
        for _ in 0..count {
            pieces.push(length);
        }
    }
    pieces
}
