use serde::{Deserialize, Deserializer, Serialize};

/// Converts a number to `u32` when it is a non-negative integral value.
pub fn integral_u32(v: f64) -> Option<u32> {
    if v.is_finite() && v.fract() == 0.0 && v >= 0.0 && v <= u32::MAX as f64 {
        Some(v as u32)
    } else {
        None
    }
}

fn number_to_u32<E: serde::de::Error>(v: f64) -> Result<u32, E> {
    integral_u32(v).ok_or_else(|| E::custom(format!("expected a non-negative integer, got {v}")))
}

/// Accepts `6000` as well as `6000.0`, rejects fractional or negative values.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    number_to_u32(f64::deserialize(deserializer)?)
}

pub fn deserialize_u32_vec_from_numbers<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<f64>::deserialize(deserializer)?
        .into_iter()
        .map(number_to_u32::<D::Error>)
        .collect()
}

pub fn deserialize_opt_u32_vec_from_numbers<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Vec<f64>>::deserialize(deserializer)? {
        Some(values) => values
            .into_iter()
            .map(number_to_u32::<D::Error>)
            .collect::<Result<Vec<u32>, D::Error>>()
            .map(Some),
        None => Ok(None),
    }
}

/// Immutable description of one cutting job.
///
/// `piece_lengths` and `demand` are parallel lists. A missing or empty
/// `demand` means one unit of every length.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CutJob {
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub raw_length: u32,
    #[serde(deserialize_with = "deserialize_u32_vec_from_numbers")]
    pub piece_lengths: Vec<u32>,
    #[serde(
        default,
        deserialize_with = "deserialize_opt_u32_vec_from_numbers",
        skip_serializing_if = "Option::is_none"
    )]
    pub demand: Option<Vec<u32>>,
}

impl CutJob {
    pub fn new(raw_length: u32, piece_lengths: Vec<u32>, demand: Option<Vec<u32>>) -> Self {
        Self {
            raw_length,
            piece_lengths,
            demand,
        }
    }

    /// Same job with every length cut from a different stock length.
    pub fn with_raw_length(self, raw_length: u32) -> Self {
        Self { raw_length, ..self }
    }
}

/// Informational recoveries surfaced alongside a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// No demand was given, so one unit of every length was assumed.
    DemandDefaulted,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::DemandDefaulted => write!(
                f,
                "Demand list empty. A default demand of 1 to each cut length is assigned"
            ),
        }
    }
}

/// Cuts assigned to one raw bar and what is left of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarResult {
    pub cuts: Vec<u32>,
    pub waste: u32,
}

impl BarResult {
    pub fn used_length(&self) -> u64 {
        self.cuts.iter().map(|&c| c as u64).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub bars: Vec<BarResult>,
    pub raw_length: u32,
    pub notices: Vec<Notice>,
}

impl Solution {
    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    pub fn total_waste(&self) -> u64 {
        self.bars.iter().map(|b| b.waste as u64).sum()
    }

    pub fn total_stock_length(&self) -> u64 {
        self.raw_length as u64 * self.bars.len() as u64
    }

    /// Share of consumed stock that became pieces, in percent, rounded to one decimal.
    pub fn utilization_percent(&self) -> f64 {
        let total = self.total_stock_length();
        if total == 0 {
            return 0.0;
        }
        let used = (total - self.total_waste()) as u128;
        tenths_half_even(used * 1000, total as u128) as f64 / 10.0
    }

    /// Fewest bars any packing of these pieces could use.
    pub fn lower_bound(&self) -> usize {
        let total: u64 = self.bars.iter().map(BarResult::used_length).sum();
        if self.raw_length == 0 {
            return 0;
        }
        total.div_ceil(self.raw_length as u64) as usize
    }

    pub fn demand_defaulted(&self) -> bool {
        self.notices.contains(&Notice::DemandDefaulted)
    }
}

/// `num / den` rounded to the nearest integer, ties to even.
fn tenths_half_even(num: u128, den: u128) -> u128 {
    let (q, r) = (num / den, num % den);
    match (2 * r).cmp(&den) {
        std::cmp::Ordering::Less => q,
        std::cmp::Ordering::Greater => q + 1,
        std::cmp::Ordering::Equal => q + (q % 2),
    }
}
