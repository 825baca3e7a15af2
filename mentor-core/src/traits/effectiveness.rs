/// Measured-effectiveness lookup for advice ids.
///
/// Backed by packet delivery feedback; retrieval blends this into the
/// trust component so advice that demonstrably helped ranks higher than
/// its provider confidence alone would place it.
pub trait IEffectivenessIndex: Send + Sync {
    /// Effectiveness in [0, 1] for an advice id, if any feedback exists.
    fn measured_effectiveness(&self, advice_id: &str) -> Option<f64>;
}

/// No-feedback default.
pub struct NoEffectiveness;

impl IEffectivenessIndex for NoEffectiveness {
    fn measured_effectiveness(&self, _advice_id: &str) -> Option<f64> {
        None
    }
}
