use super::fingerprint::DeviceFingerprint;
use crate::config::FingerprintConfig;

pub const BASE_SCORE: i32 = 50;
pub const GPU_BONUS: i32 = 15;
pub const MEMORY_BONUS: i32 = 10;
pub const CPU_BONUS: i32 = 10;
pub const MULTI_INTERFACE_BONUS: i32 = 5;

/// Memory strictly above this (bytes) earns the memory bonus
pub const HIGH_MEMORY_BYTES: u64 = 16_000_000_000;
/// Logical CPU count at or above this earns the CPU bonus
pub const HIGH_CPU_COUNT: u32 = 8;

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 100;

/// Additive trust-score rules applied to a captured fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringRules {
    gpu_markers: Vec<String>,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::new(FingerprintConfig::default().gpu_markers)
    }
}

impl ScoringRules {
    pub fn new(gpu_markers: Vec<String>) -> Self {
        Self {
            gpu_markers: gpu_markers
                .into_iter()
                .map(|marker| marker.to_lowercase())
                .filter(|marker| !marker.is_empty())
                .collect(),
        }
    }

    pub fn has_gpu_marker(&self, processor: &str) -> bool {
        let processor = processor.to_lowercase();
        self.gpu_markers
            .iter()
            .any(|marker| processor.contains(marker.as_str()))
    }

    /// Score a fingerprint. Rules are applied in a fixed order and the sum is
    /// clamped to `[MIN_SCORE, MAX_SCORE]`.
    pub fn score(&self, fp: &DeviceFingerprint) -> u8 {
        let mut score = BASE_SCORE;

        if self.has_gpu_marker(&fp.processor) {
            score += GPU_BONUS;
        }
        if fp.memory_total > HIGH_MEMORY_BYTES {
            score += MEMORY_BONUS;
        }
        if fp.cpu_count >= HIGH_CPU_COUNT {
            score += CPU_BONUS;
        }
        if fp.distinct_interface_count() > 1 {
            score += MULTI_INTERFACE_BONUS;
        }

        score.clamp(MIN_SCORE, MAX_SCORE) as u8
    }
}
