use serde::{Deserialize, Serialize};

/// Running aggregate for one station within one owning scope (a decode
/// worker's local map, or the merged final map).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempStat {
    pub sum: f32,
    pub min: f32,
    pub max: f32,
    pub count: i32,
}

impl TempStat {
    pub fn new(temperature: f32) -> Self {
        Self {
            sum: temperature,
            min: temperature,
            max: temperature,
            count: 1,
        }
    }

    /// Fold one more observation into the aggregate.
    pub fn record(&mut self, temperature: f32) {
        self.sum += temperature;
        self.count += 1;
        if temperature < self.min {
            self.min = temperature;
        }
        if temperature > self.max {
            self.max = temperature;
        }
    }

    /// Combine with an aggregate for the same station from another scope.
    /// Associative and commutative, so worker maps can merge in any order.
    pub fn merge(&mut self, other: &TempStat) {
        self.sum += other.sum;
        self.count += other.count;
        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
    }

    pub fn mean(&self) -> f32 {
        self.sum / self.count as f32
    }
}
