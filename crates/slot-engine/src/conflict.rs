//! Resolve overlaps between schedule layers of different precedence.
//!
//! Layers are not trimmed against each other: a lower-precedence interval
//! that overlaps any interval of a higher layer is dropped whole, and the
//! higher layer takes its place. Adjacent intervals (one ends exactly when
//! the other starts) do not conflict.

use tracing::trace;

use crate::interval::{has_intersection, Interval};

/// Merge `layers`, given lowest precedence first.
///
/// The result lists each layer's intervals before the survivors of the
/// layers beneath it.
pub fn resolve_layers(layers: &[&[Interval]]) -> Vec<Interval> {
    let Some((base, higher)) = layers.split_first() else {
        return Vec::new();
    };

    higher.iter().fold(base.to_vec(), |below, layer| {
        let before = below.len();
        let survivors: Vec<Interval> = below
            .into_iter()
            .filter(|i| !conflicts_with_any(i, layer))
            .collect();
        trace!(
            overridden = before - survivors.len(),
            layer = layer.len(),
            "resolved schedule layer"
        );

        let mut merged = layer.to_vec();
        merged.extend(survivors);
        merged
    })
}

fn conflicts_with_any(interval: &Interval, layer: &[Interval]) -> bool {
    layer.iter().any(|other| has_intersection(interval, other))
}
