//! Buffer capacities.

/// Capacity of the exported input region, in bytes.
pub const INPUT_CAPACITY: usize = 5050;

/// Capacity of the exported output region, in bytes.
pub const OUTPUT_CAPACITY: usize = 5050;

/// Capacity limits applied by a [`Kernel`](crate::Kernel).
///
/// The exported entry points use [`KernelConfig::DEFAULT`], which matches
/// the static regions. In-process callers may tighten the limits; a
/// request larger than `input_capacity` is malformed and a path longer
/// than `output_capacity` bytes is a capacity error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernelConfig {
    pub input_capacity: usize,
    pub output_capacity: usize,
}

impl KernelConfig {
    pub const DEFAULT: Self = Self {
        input_capacity: INPUT_CAPACITY,
        output_capacity: OUTPUT_CAPACITY,
    };
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
